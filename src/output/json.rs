use std::path::PathBuf;

use serde::Serialize;

use crate::checker::ProblemRecord;
use crate::error::Result;
use crate::path_utils::relative_slash_path;
use crate::project::CheckRunResult;

use super::OutputFormatter;

#[derive(Default)]
pub struct JsonFormatter {
    root: Option<PathBuf>,
}

impl JsonFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Emit file paths relative to `root`.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary<'a>,
    problems: Vec<JsonProblem<'a>>,
    skipped_files: &'a [String],
}

#[derive(Serialize)]
struct Summary<'a> {
    success: bool,
    total_files: usize,
    checked_files: usize,
    skipped_files: usize,
    problems: usize,
    cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonProblem<'a> {
    #[serde(rename = "type")]
    problem_type: &'static str,
    type_code: u8,
    file: String,
    function: &'a str,
    signature: &'a str,
    line: usize,
    column: usize,
    description: &'a str,
    snippet: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &CheckRunResult) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                success: result.success,
                total_files: result.total_files,
                checked_files: result.checked_files,
                skipped_files: result.skipped_files.len(),
                problems: result.problems.len(),
                cancelled: result.cancelled,
                error_message: result.error_message.as_deref(),
            },
            problems: result
                .problems
                .iter()
                .map(|p| self.convert_problem(p))
                .collect(),
            skipped_files: &result.skipped_files,
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

impl JsonFormatter {
    fn convert_problem<'a>(&self, problem: &'a ProblemRecord) -> JsonProblem<'a> {
        JsonProblem {
            problem_type: problem.problem_type.as_str(),
            type_code: problem.problem_type.code(),
            file: relative_slash_path(&problem.file_path, self.root.as_deref()),
            function: &problem.function_name,
            signature: &problem.function_signature,
            line: problem.line,
            column: problem.column,
            description: &problem.description,
            snippet: &problem.snippet,
        }
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
