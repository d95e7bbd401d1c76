//! In-memory collaborators shared by unit tests.

use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use crate::project::{Diagnostic, DiagnosticsSource, Severity};
use crate::source_fs::SourceFs;

/// Source files held in memory; sizes can be faked independently of content.
#[derive(Default)]
pub struct MemorySourceFs {
    files: HashMap<PathBuf, Vec<u8>>,
    sizes: HashMap<PathBuf, u64>,
    unreadable: Vec<PathBuf>,
}

impl MemorySourceFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.as_bytes().to_vec());
        self
    }

    pub fn with_size(mut self, path: impl Into<PathBuf>, size: u64) -> Self {
        self.sizes.insert(path.into(), size);
        self
    }

    /// Stat succeeds, read fails.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files.insert(path.clone(), Vec::new());
        self.unreadable.push(path);
        self
    }
}

impl SourceFs for MemorySourceFs {
    fn file_size(&self, path: &Path) -> std::io::Result<u64> {
        if let Some(size) = self.sizes.get(path) {
            return Ok(*size);
        }
        self.files
            .get(path)
            .map(|c| c.len() as u64)
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(Error::new(ErrorKind::PermissionDenied, "permission denied"));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }
}

/// Diagnostics keyed by path.
#[derive(Default)]
pub struct MemoryDiagnostics {
    entries: HashMap<PathBuf, Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, path: impl Into<PathBuf>, message: &str, line: usize) -> Self {
        self.entries.entry(path.into()).or_default().push(Diagnostic {
            severity: Severity::Error,
            message: message.to_string(),
            line,
            column: 1,
        });
        self
    }

    pub fn with_warning(mut self, path: impl Into<PathBuf>, message: &str, line: usize) -> Self {
        self.entries.entry(path.into()).or_default().push(Diagnostic {
            severity: Severity::Warning,
            message: message.to_string(),
            line,
            column: 1,
        });
        self
    }
}

impl DiagnosticsSource for MemoryDiagnostics {
    fn diagnostics(&self, path: &Path, _content: &str) -> Vec<Diagnostic> {
        self.entries.get(path).cloned().unwrap_or_default()
    }
}

/// The two-integer `add` function used across tests.
pub const ADD_FN: &str = "int add(int a, int b) {\n    return a + b;\n}\n";

pub const ADD_FN_DOCUMENTED: &str = "/**\n * @brief Adds two integers.\n * @param a first\n * @param b second\n * @return the sum\n */\nint add(int a, int b) {\n    return a + b;\n}\n";
