use std::path::PathBuf;

use serde::Serialize;

/// A function definition discovered in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    /// Path of the file the function was found in
    pub file_path: PathBuf,
    /// Function name (last identifier before the parameter list)
    pub function_name: String,
    /// Header text up to and excluding the opening brace
    pub function_signature: String,
    /// Nearest preceding block comment, or empty
    pub comment: String,
    /// Text from the opening brace to the first closing brace
    pub function_body: String,
    /// Line of the signature start (1-indexed)
    pub line: usize,
    /// Column of the signature start (1-indexed, in characters)
    pub column: usize,
}

/// Reason a single file could not be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseErrorCode {
    UnsupportedFileType,
    ReadError,
}

impl ParseErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            Self::ReadError => "READ_ERROR",
        }
    }
}

impl std::fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scanning one file from disk.
#[derive(Debug, Clone, Serialize)]
pub enum FileScan {
    Parsed(Vec<FunctionRecord>),
    Failed { code: ParseErrorCode, message: String },
}

impl FileScan {
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Human-readable skip reason for a failed scan.
    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Parsed(_) => None,
            Self::Failed { code, message } => Some(format!("{code}: {message}")),
        }
    }
}
