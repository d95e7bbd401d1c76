//! Error and warning messages on stderr.
//!
//! Format: `✖ {type}: {message}` followed by an optional `help:` line.

use std::io::{IsTerminal, Write};

use crate::error::DocDoctorError;

use super::{ColorMode, ansi};

pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal(),
        };
        Self { use_colors }
    }

    /// Writes an error to a writer.
    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        suggestion: Option<&str>,
    ) {
        // stderr may be closed; nothing useful to do about a failed write.
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}✖ {error_type}:{} {message}",
                ansi::BOLD,
                ansi::RED,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "✖ {error_type}: {message}");
        }
        self.write_help(w, suggestion);
    }

    /// Writes a warning to a writer.
    pub fn write_warning<W: Write>(&self, w: &mut W, message: &str, suggestion: Option<&str>) {
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}⚠ Warning:{} {message}",
                ansi::BOLD,
                ansi::YELLOW,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "⚠ Warning: {message}");
        }
        self.write_help(w, suggestion);
    }

    fn write_help<W: Write>(&self, w: &mut W, suggestion: Option<&str>) {
        let Some(s) = suggestion else { return };
        if self.use_colors {
            let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
        } else {
            let _ = writeln!(w, "  help: {s}");
        }
    }

    /// Writes a crate error with a suggestion matching its category.
    pub fn write_doc_error<W: Write>(&self, w: &mut W, err: &DocDoctorError) {
        self.write_error(w, err.error_type(), &err.to_string(), suggestion_for(err));
    }
}

/// Next step for the user, when one is obvious.
#[must_use]
pub fn suggestion_for(err: &DocDoctorError) -> Option<&'static str> {
    match err {
        DocDoctorError::Config(_) | DocDoctorError::TomlParse(_) => {
            Some("fix .doc-doctor.toml or regenerate it with `doc-doctor init --force`")
        }
        DocDoctorError::InvalidPattern { .. } => {
            Some("check the glob syntax of `scan.exclude` entries")
        }
        DocDoctorError::RootNotFound(_) => Some("pass an existing directory as ROOT"),
        DocDoctorError::Store(_) => {
            Some("run `doc-doctor problems list` to see stored ids, or `problems clear` to reset")
        }
        _ => None,
    }
}

/// Prints a crate error to stderr.
pub fn print_error(mode: ColorMode, err: &DocDoctorError) {
    let mut stderr = std::io::stderr().lock();
    ErrorOutput::new(mode).write_doc_error(&mut stderr, err);
}

/// Prints a warning to stderr.
pub fn print_warning(mode: ColorMode, message: &str) {
    let mut stderr = std::io::stderr().lock();
    ErrorOutput::new(mode).write_warning(&mut stderr, message, None);
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
