//! Clean Use Case
//!
//! Removes the intermediate artifacts a conversion run owns:
//! - the staged copy of the input under the asset area
//! - the container artifact
//! - the temporary build directory
//!
//! followed by a refresh of the asset index. The same sweep runs at the end
//! of every conversion and on its own via `itempack clean`.

mod result;
mod use_case;

pub use result::{CleanupFailure, CleanupReport};
pub use use_case::{sweep, CleanUseCase};
