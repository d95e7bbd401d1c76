use serde::Serialize;

use crate::checker::ProblemRecord;

/// Aggregate outcome of one project run.
///
/// `problems` never exceeds the run's problem cap, and `checked_files` only
/// counts files whose functions were fully evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckRunResult {
    pub success: bool,
    pub total_files: usize,
    pub checked_files: usize,
    /// `"<relative path> (<reason>)"`, in enumeration order.
    pub skipped_files: Vec<String>,
    pub problems: Vec<ProblemRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub cancelled: bool,
}

impl CheckRunResult {
    /// A successful, still-empty run over `total_files` candidates.
    #[must_use]
    pub fn new(total_files: usize) -> Self {
        Self {
            success: true,
            total_files,
            ..Self::default()
        }
    }

    /// A run that could not start or could not enumerate files.
    #[must_use]
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Record a run-level message; later messages are appended after `"; "`.
    pub fn note_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error_message = Some(match self.error_message.take() {
            Some(existing) => format!("{existing}; {message}"),
            None => message,
        });
    }

    #[must_use]
    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped_files.len()
    }

    /// One-line headline plus the checked/total count.
    #[must_use]
    pub fn summary(&self) -> String {
        if !self.success {
            return format!(
                "check failed: {}",
                self.error_message.as_deref().unwrap_or("unknown error")
            );
        }

        let headline = if self.problems.is_empty() {
            "no problems found".to_string()
        } else if self.problems.len() == 1 {
            "check complete, found 1 problem".to_string()
        } else {
            format!("check complete, found {} problems", self.problems.len())
        };
        format!(
            "{headline}\nchecked {}/{} files",
            self.checked_files, self.total_files
        )
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
