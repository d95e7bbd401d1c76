use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analyzer::FunctionRecord;

/// Snippets are cut to this many characters of the function body.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Function name carried by file-level syntax error problems.
pub const SYNTAX_ERROR_FUNCTION_NAME: &str = "<syntax-error>";

/// Kind of documentation defect. Discriminants are stable and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemType {
    ParamMissing = 1,
    ReturnMissing = 2,
    BriefMissing = 3,
    /// Reserved; nothing emits it yet.
    ContentChanged = 4,
    SyntaxError = 5,
}

impl ProblemType {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::ParamMissing),
            2 => Some(Self::ReturnMissing),
            3 => Some(Self::BriefMissing),
            4 => Some(Self::ContentChanged),
            5 => Some(Self::SyntaxError),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParamMissing => "PARAM_MISSING",
            Self::ReturnMissing => "RETURN_MISSING",
            Self::BriefMissing => "BRIEF_MISSING",
            Self::ContentChanged => "CONTENT_CHANGED",
            Self::SyntaxError => "SYNTAX_ERROR",
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documentation defect, or a file-level syntax error summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub problem_type: ProblemType,
    pub file_path: PathBuf,
    pub function_name: String,
    pub function_signature: String,
    pub line: usize,
    pub column: usize,
    pub description: String,
    pub snippet: String,
}

impl ProblemRecord {
    /// Problem located at `function`, with a snippet cut from its body.
    #[must_use]
    pub fn for_function(
        problem_type: ProblemType,
        function: &FunctionRecord,
        description: String,
    ) -> Self {
        Self {
            problem_type,
            file_path: function.file_path.clone(),
            function_name: function.function_name.clone(),
            function_signature: function.function_signature.clone(),
            line: function.line,
            column: function.column,
            description,
            snippet: truncate_chars(&function.function_body, SNIPPET_MAX_CHARS).to_string(),
        }
    }

    /// File-level syntax error record: sentinel name, empty signature and snippet.
    #[must_use]
    pub fn syntax_error(
        file_path: PathBuf,
        line: usize,
        column: usize,
        description: String,
    ) -> Self {
        Self {
            problem_type: ProblemType::SyntaxError,
            file_path,
            function_name: SYNTAX_ERROR_FUNCTION_NAME.to_string(),
            function_signature: String::new(),
            line,
            column,
            description,
            snippet: String::new(),
        }
    }
}

/// Longest prefix of `s` with at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(idx, _)| &s[..idx])
}

#[cfg(test)]
#[path = "problem_tests.rs"]
mod tests;
