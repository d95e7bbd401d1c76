mod error_output;
mod json;
mod progress;
mod sarif;
mod text;

pub use error_output::{ErrorOutput, print_error, print_warning, suggestion_for};
pub use json::JsonFormatter;
pub use progress::ScanProgress;
pub use sarif::SarifFormatter;
pub use text::{ColorMode, DEFAULT_SKIPPED_PREVIEW, TextFormatter};

use crate::error::Result;
use crate::project::CheckRunResult;

/// Trait for rendering a run result into an output format.
pub trait OutputFormatter {
    /// Render the run result into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, result: &CheckRunResult) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

pub(crate) mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
