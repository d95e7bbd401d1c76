use std::path::Path;

use regex::Regex;

use super::types::FunctionRecord;

/// Approximate C/C++ function definition header: type tokens, name, parameter list, `{`.
///
/// This is a flat-text heuristic, not a grammar. Control statements shaped like
/// `if (x) {` match as functions named `if`, and nested braces truncate the body.
const FUNCTION_PATTERN: &str =
    r"([A-Za-z0-9_\s*]+?)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)]*\)\s*\{";

/// Names produced by the header pattern on control statements.
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch"];

/// Trait for extracting function definitions from source text.
pub trait FunctionParser {
    /// Extract every function definition in `content`, in source order.
    fn scan(&self, content: &str, file_path: &Path) -> Vec<FunctionRecord>;
}

/// Regex-driven scanner for C and C++ sources.
pub struct SourceScanner {
    fn_pattern: Regex,
    skip_control_statements: bool,
}

impl Default for SourceScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceScanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fn_pattern: Regex::new(FUNCTION_PATTERN).expect("Invalid regex"),
            skip_control_statements: false,
        }
    }

    /// Drop matches named after control keywords (`if`, `for`, ...).
    #[must_use]
    pub const fn with_skip_control_statements(mut self, skip: bool) -> Self {
        self.skip_control_statements = skip;
        self
    }

    fn is_control_statement(name: &str) -> bool {
        CONTROL_KEYWORDS.contains(&name)
    }
}

impl FunctionParser for SourceScanner {
    fn scan(&self, content: &str, file_path: &Path) -> Vec<FunctionRecord> {
        let mut functions = Vec::new();

        for caps in self.fn_pattern.captures_iter(content) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let function_name = caps.get(2).map_or("", |m| m.as_str());
            if self.skip_control_statements && Self::is_control_statement(function_name) {
                continue;
            }

            let matched = whole.as_str();
            let leading_ws = matched.len() - matched.trim_start().len();
            let start = whole.start() + leading_ws;
            let (line, column) = line_column(content, start);

            // The pattern always ends on the opening brace.
            let brace = whole.end() - 1;

            functions.push(FunctionRecord {
                file_path: file_path.to_path_buf(),
                function_name: function_name.to_string(),
                function_signature: matched[..matched.len() - 1].trim().to_string(),
                comment: preceding_block_comment(content, start).to_string(),
                function_body: body_until_first_close(&content[brace..]).to_string(),
                line,
                column,
            });
        }

        functions
    }
}

/// 1-indexed line and character column of a byte offset.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Text from the opening brace through the first `}` (not depth-aware).
fn body_until_first_close(rest: &str) -> &str {
    rest.find('}').map_or(rest, |end| &rest[..=end])
}

/// The `/* ... */` block ending right before `start`, separated by whitespace only.
fn preceding_block_comment(content: &str, start: usize) -> &str {
    let before = content[..start].trim_end();
    let Some(inner) = before.strip_suffix("*/") else {
        return "";
    };
    // Block comments do not nest: the comment opens at the first `/*` after
    // the previous comment's `*/`.
    let from = inner.rfind("*/").map_or(0, |end| end + 2);
    inner[from..]
        .find("/*")
        .map_or("", |open| &before[from + open..])
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
