//! Console Event Sink
//!
//! Human-readable progress on stderr. Stage lines appear at normal
//! verbosity, cleanup detail and engine diagnostics only with `-v`.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

use crate::config::{ColorMode, Verbosity};
use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use crate::infrastructure::events::ci::{
    github_actions_annotation, running_in_github_actions, AnnotationLevel,
};

mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const ARROW: &str = "↳";
}

mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const ARROW: &str = "[>]";
}

mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const DIM: Color = Color::DarkGrey;
}

/// How the console renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStyle {
    pub color: bool,
    pub unicode: bool,
    /// Mirror failures as GitHub Actions annotations
    pub annotations: bool,
}

impl ConsoleStyle {
    /// Detect from the environment and the configured color mode
    pub fn detect(color: ColorMode) -> Self {
        Self::from_env(
            color,
            |key| std::env::var(key).ok(),
            io::stderr().is_terminal(),
        )
    }

    pub(crate) fn from_env(
        color: ColorMode,
        get_env: impl Fn(&str) -> Option<String>,
        is_tty: bool,
    ) -> Self {
        let term = get_env("TERM").unwrap_or_default();
        let dumb = term.eq_ignore_ascii_case("dumb");
        let is_ci = get_env("CI").is_some() || get_env("GITHUB_ACTIONS").is_some();

        let color = match color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => {
                is_tty && !dumb && get_env("NO_COLOR").is_none() && !is_ci
            }
        };

        Self {
            color,
            unicode: !dumb,
            annotations: get_env("GITHUB_ACTIONS").is_some_and(|v| v == "true"),
        }
    }

    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
            annotations: false,
        }
    }
}

/// Event sink printing progress for humans
pub struct ConsoleEventSink {
    verbosity: Verbosity,
    style: ConsoleStyle,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    /// Console sink writing to stderr
    pub fn stderr(verbosity: Verbosity, color: ColorMode) -> Self {
        let mut style = ConsoleStyle::detect(color);
        style.annotations = running_in_github_actions();
        Self::with_writer(verbosity, style, io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(
        verbosity: Verbosity,
        style: ConsoleStyle,
        writer: W,
    ) -> Self {
        Self {
            verbosity,
            style,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn icon(&self, unicode: &'static str, ascii: &'static str) -> &'static str {
        if self.style.unicode {
            unicode
        } else {
            ascii
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.style.color {
            format!("{}", text.with(color))
        } else {
            text.to_string()
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }

    fn annotate(&self, level: AnnotationLevel, message: &str, file: Option<&str>) {
        if self.style.annotations {
            self.line(github_actions_annotation(
                level,
                message,
                file,
                Some("itempack"),
            ));
        }
    }
}

impl PipelineEventSink for ConsoleEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let verbose = self.verbosity == Verbosity::Verbose;
        let quiet = self.verbosity == Verbosity::Quiet;

        match event {
            PipelineEvent::Started {
                source,
                output,
                platform,
            } => {
                if !quiet {
                    self.line(format!(
                        "Converting {} -> {} ({})",
                        source.display(),
                        output.display(),
                        platform
                    ));
                }
            }

            PipelineEvent::StageStarted { stage } => {
                if verbose {
                    let icon = self.icon(icons::PROGRESS, icons_ascii::PROGRESS);
                    self.line(format!("{} {}...", self.paint(colors::DIM, icon), stage.label()));
                }
            }

            PipelineEvent::StageCompleted { stage, detail } => {
                if !quiet {
                    let icon = self.icon(icons::SUCCESS, icons_ascii::SUCCESS);
                    self.line(format!(
                        "{} {}: {}",
                        self.paint(colors::SUCCESS, icon),
                        stage.label(),
                        detail
                    ));
                }
            }

            PipelineEvent::StageFailed { stage, path, error } => {
                let icon = self.icon(icons::ERROR, icons_ascii::ERROR);
                self.line(format!(
                    "{} {} failed: {}",
                    self.paint(colors::ERROR, icon),
                    stage.label(),
                    error
                ));
                let file = path.as_ref().map(|p| p.display().to_string());
                self.annotate(AnnotationLevel::Error, &error, file.as_deref());
            }

            PipelineEvent::EngineReported { report } => {
                if verbose {
                    let arrow = self.icon(icons::ARROW, icons_ascii::ARROW);
                    self.line(format!("  {} {}", self.paint(colors::DIM, arrow), report.summary()));
                }
            }

            PipelineEvent::ArtifactRemoved { path } => {
                if verbose {
                    let arrow = self.icon(icons::ARROW, icons_ascii::ARROW);
                    self.line(format!(
                        "  {} removed {}",
                        self.paint(colors::DIM, arrow),
                        path.display()
                    ));
                }
            }

            PipelineEvent::CleanupWarning { path, error } => {
                let icon = self.icon(icons::WARNING, icons_ascii::WARNING);
                self.line(format!(
                    "{} could not remove {}: {}",
                    self.paint(colors::WARNING, icon),
                    path.display(),
                    error
                ));
                let file = path.display().to_string();
                self.annotate(AnnotationLevel::Warning, &error, Some(&file));
            }

            PipelineEvent::Completed { output, size, hash } => {
                if !quiet {
                    let icon = self.icon(icons::SUCCESS, icons_ascii::SUCCESS);
                    self.line(format!(
                        "{} Wrote {} ({} bytes, {})",
                        self.paint(colors::SUCCESS, icon),
                        output.display(),
                        size,
                        hash.short()
                    ));
                }
            }

            PipelineEvent::Failed { error, .. } => {
                let icon = self.icon(icons::ERROR, icons_ascii::ERROR);
                self.line(format!("{} Conversion failed: {}", self.paint(colors::ERROR, icon), error));
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}
