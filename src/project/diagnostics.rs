//! Syntax diagnostics consumed by project runs.
//!
//! A file with at least one [`Severity::Error`] diagnostic is reported as a
//! single syntax error and is not scanned for functions.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocDoctorError, Result};
use crate::path_utils::relative_slash_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// One diagnostic; `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(default = "first_position")]
    pub line: usize,
    #[serde(default = "first_position")]
    pub column: usize,
}

const fn first_position() -> usize {
    1
}

impl Diagnostic {
    #[must_use]
    pub fn error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            line,
            column,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Provides diagnostics for a file. Sources that know nothing about a file
/// return an empty list.
pub trait DiagnosticsSource {
    fn diagnostics(&self, path: &Path, content: &str) -> Vec<Diagnostic>;
}

/// Reports nothing; every file is treated as error-free.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl DiagnosticsSource for NoDiagnostics {
    fn diagnostics(&self, _path: &Path, _content: &str) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Queries every source in order and concatenates their results.
impl DiagnosticsSource for Vec<Box<dyn DiagnosticsSource>> {
    fn diagnostics(&self, path: &Path, content: &str) -> Vec<Diagnostic> {
        self.iter()
            .flat_map(|source| source.diagnostics(path, content))
            .collect()
    }
}

#[derive(Deserialize)]
struct ExportedDiagnostic {
    path: String,
    #[serde(flatten)]
    diagnostic: Diagnostic,
}

/// Diagnostics exported by an external compiler or editor run.
///
/// The export is a JSON array:
///
/// ```json
/// [{"path": "src/a.c", "severity": "error", "message": "expected ';'", "line": 3, "column": 9}]
/// ```
///
/// Relative paths are resolved against the project root.
#[derive(Debug, Default, Clone)]
pub struct JsonDiagnostics {
    root: Option<std::path::PathBuf>,
    by_file: HashMap<String, Vec<Diagnostic>>,
}

impl JsonDiagnostics {
    /// Read an export file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid export.
    pub fn load(path: &Path, root: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| DocDoctorError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, root)
    }

    /// Parse an export from a string.
    ///
    /// # Errors
    /// Returns an error if the JSON is not an array of diagnostics.
    pub fn from_json(json: &str, root: &Path) -> Result<Self> {
        let entries: Vec<ExportedDiagnostic> = serde_json::from_str(json)?;
        let mut by_file: HashMap<String, Vec<Diagnostic>> = HashMap::new();
        for entry in entries {
            let path = root.join(&entry.path);
            by_file
                .entry(relative_slash_path(&path, Some(root)))
                .or_default()
                .push(entry.diagnostic);
        }
        tracing::debug!(files = by_file.len(), "loaded diagnostics export");
        Ok(Self {
            root: Some(root.to_path_buf()),
            by_file,
        })
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.by_file.len()
    }
}

impl DiagnosticsSource for JsonDiagnostics {
    fn diagnostics(&self, path: &Path, _content: &str) -> Vec<Diagnostic> {
        let key = relative_slash_path(path, self.root.as_deref());
        self.by_file.get(&key).cloned().unwrap_or_default()
    }
}

/// Built-in check for unbalanced `()`, `[]` and `{}`.
///
/// Comments, string and character literals, and preprocessor lines are
/// ignored. Reports unexpected or mismatched closers, unclosed openers,
/// unterminated literals and unterminated block comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelimiterDiagnostics;

impl DiagnosticsSource for DelimiterDiagnostics {
    fn diagnostics(&self, _path: &Path, content: &str) -> Vec<Diagnostic> {
        check_delimiters(content)
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Code,
    LineComment,
    BlockComment { line: usize, column: usize },
    Literal { quote: char, line: usize, column: usize },
    Preprocessor,
}

const fn opener_for(closer: char) -> char {
    match closer {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

fn literal_kind(quote: char) -> &'static str {
    if quote == '"' {
        "string literal"
    } else {
        "character literal"
    }
}

fn check_delimiters(content: &str) -> Vec<Diagnostic> {
    let chars: Vec<char> = content.chars().collect();
    let mut found = Vec::new();
    let mut open: Vec<(char, usize, usize)> = Vec::new();
    let mut mode = Mode::Code;
    let (mut line, mut column) = (1, 0);
    let mut at_line_start = true;
    // Set after a backslash inside a literal or a preprocessor line.
    let mut escaped = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        column += 1;

        match mode {
            Mode::Code => match c {
                '/' if next == Some('/') => {
                    mode = Mode::LineComment;
                    i += 1;
                    column += 1;
                }
                '/' if next == Some('*') => {
                    mode = Mode::BlockComment { line, column };
                    i += 1;
                    column += 1;
                }
                '#' if at_line_start => mode = Mode::Preprocessor,
                '\'' if is_digit_separator(&chars, i) => {}
                '"' | '\'' => {
                    mode = Mode::Literal {
                        quote: c,
                        line,
                        column,
                    };
                }
                '(' | '[' | '{' => open.push((c, line, column)),
                ')' | ']' | '}' => match open.last().copied() {
                    Some((opener, ..)) if opener == opener_for(c) => {
                        open.pop();
                    }
                    Some((opener, open_line, open_column)) => {
                        found.push(Diagnostic::error(
                            format!(
                                "'{c}' does not match '{opener}' opened at line {open_line}, column {open_column}"
                            ),
                            line,
                            column,
                        ));
                        open.pop();
                    }
                    None => found.push(Diagnostic::error(format!("unexpected '{c}'"), line, column)),
                },
                _ => {}
            },
            Mode::LineComment => {}
            Mode::BlockComment { .. } => {
                if c == '*' && next == Some('/') {
                    mode = Mode::Code;
                    i += 1;
                    column += 1;
                }
            }
            Mode::Literal {
                quote,
                line: start_line,
                column: start_column,
            } => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    mode = Mode::Code;
                } else if c == '\n' {
                    found.push(Diagnostic::error(
                        format!("unterminated {}", literal_kind(quote)),
                        start_line,
                        start_column,
                    ));
                    mode = Mode::Code;
                }
            }
            Mode::Preprocessor => {
                if c == '\\' {
                    escaped = true;
                } else if c == '/' && next == Some('*') {
                    mode = Mode::BlockComment { line, column };
                    escaped = false;
                    i += 1;
                    column += 1;
                } else if c != '\n' && !c.is_whitespace() {
                    escaped = false;
                }
            }
        }

        if c == '\n' {
            match mode {
                Mode::LineComment => mode = Mode::Code,
                Mode::Preprocessor if !escaped => mode = Mode::Code,
                _ => {}
            }
            if matches!(mode, Mode::Preprocessor) {
                escaped = false;
            }
            line += 1;
            column = 0;
            at_line_start = true;
        } else if !c.is_whitespace() {
            at_line_start = false;
        }
        i += 1;
    }

    match mode {
        Mode::BlockComment { line, column } => {
            found.push(Diagnostic::error("unterminated block comment", line, column));
        }
        Mode::Literal {
            quote,
            line,
            column,
        } => found.push(Diagnostic::error(
            format!("unterminated {}", literal_kind(quote)),
            line,
            column,
        )),
        _ => {}
    }
    found.extend(
        open.into_iter()
            .map(|(opener, line, column)| Diagnostic::error(format!("unclosed '{opener}'"), line, column)),
    );
    found
}

/// `'` between digits of a number, as in `1'000'000` or `0xFF'FF`.
fn is_digit_separator(chars: &[char], idx: usize) -> bool {
    if idx == 0
        || !chars[idx - 1].is_ascii_hexdigit()
        || !chars.get(idx + 1).is_some_and(|c| c.is_ascii_hexdigit())
    {
        return false;
    }
    // The token must be a number, not an identifier such as `u8` in `u8'a'`.
    let token_start = chars[..idx]
        .iter()
        .rposition(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '\''))
        .map_or(0, |pos| pos + 1);
    chars[token_start].is_ascii_digit()
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
