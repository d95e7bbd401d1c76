use std::fmt::Write;
use std::path::PathBuf;

use crate::checker::{ProblemRecord, ProblemType};
use crate::error::Result;
use crate::path_utils::relative_slash_path;
use crate::project::CheckRunResult;

use super::{OutputFormatter, ansi};

/// Skipped files listed before the "and N more" line, unless verbose.
pub const DEFAULT_SKIPPED_PREVIEW: usize = 5;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
    root: Option<PathBuf>,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose >= 1` every skipped file is listed.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
            root: None,
        }
    }

    /// Print problem paths relative to `root`.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn type_color(problem_type: ProblemType) -> &'static str {
        match problem_type {
            ProblemType::SyntaxError => ansi::RED,
            _ => ansi::YELLOW,
        }
    }

    fn format_problem(&self, problem: &ProblemRecord, output: &mut String) {
        let path = relative_slash_path(&problem.file_path, self.root.as_deref());
        let kind = self.colorize(
            problem.problem_type.as_str(),
            Self::type_color(problem.problem_type),
        );
        let _ = writeln!(
            output,
            "{path}:{}:{}: {kind} {}: {}",
            problem.line, problem.column, problem.function_name, problem.description
        );
        if !problem.function_signature.is_empty() {
            let _ = writeln!(output, "    {}", problem.function_signature);
        }
    }

    fn format_skipped(&self, skipped: &[String], output: &mut String) {
        let count = skipped.len();
        let noun = if count == 1 { "file" } else { "files" };
        let _ = writeln!(output, "Skipped {count} {noun}:");

        let shown = if self.verbose >= 1 {
            count
        } else {
            count.min(DEFAULT_SKIPPED_PREVIEW)
        };
        for reason in &skipped[..shown] {
            let _ = writeln!(output, "  {reason}");
        }
        if shown < count {
            let _ = writeln!(
                output,
                "  ... and {} more (use -v to list all)",
                count - shown
            );
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &CheckRunResult) -> Result<String> {
        let mut output = String::new();

        if !result.success {
            let _ = writeln!(output, "{}", self.colorize(&result.summary(), ansi::RED));
            return Ok(output);
        }

        for problem in &result.problems {
            self.format_problem(problem, &mut output);
        }
        if result.has_problems() {
            output.push('\n');
        }

        if !result.skipped_files.is_empty() {
            self.format_skipped(&result.skipped_files, &mut output);
            output.push('\n');
        }

        if let Some(message) = &result.error_message {
            let _ = writeln!(output, "{} {message}", self.colorize("Note:", ansi::CYAN));
        }

        let color = if result.has_problems() {
            ansi::YELLOW
        } else {
            ansi::GREEN
        };
        let _ = writeln!(output, "{}", self.colorize(&result.summary(), color));

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
