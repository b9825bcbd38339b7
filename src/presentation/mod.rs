//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command-line interface definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering for non-event results
//!
//! ## Usage
//!
//! ```ignore
//! use itempack::config::Config;
//! use itempack::presentation::factory;
//!
//! let config = Config::default();
//! let use_case = factory::create_convert_use_case(&config, Path::new("."));
//! let outcome = use_case.execute();
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, ColorWhen, Commands, ConvertArgs};
pub use factory::{create_clean_use_case, create_convert_use_case, create_event_sink};
pub use output::OutputFormat;
