use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::analyzer::SUPPORTED_EXTENSIONS;
use crate::error::{DocDoctorError, Result};

/// Key in `[whitelist.functions]` whose entries apply to every file.
pub const GLOBAL_FUNCTION_KEY: &str = "*";

/// Default cap on candidate files per run.
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Default cap on collected problems per run.
pub const DEFAULT_MAX_PROBLEMS: usize = 1000;

/// Files larger than this are skipped (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Root configuration, read from `.doc-doctor.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Exemptions from documentation checks.
    #[serde(default)]
    pub whitelist: WhitelistConfig,

    /// File discovery and run limits.
    #[serde(default)]
    pub scan: ScanConfig,
}

impl Config {
    /// Trim whitelist entries and drop empty ones.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.whitelist = self.whitelist.normalized();
        self
    }
}

/// Whitelist settings, snapshotted once per run.
///
/// ```toml
/// [whitelist]
/// check_main_function = false
/// files = ["src/legacy/", "test/"]
/// return_types = ["void"]
///
/// [whitelist.functions]
/// "src/file1.c" = ["function1", "int function2(int x)"]
/// "*" = ["helper"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhitelistConfig {
    /// Check `main` like any other function.
    #[serde(default)]
    pub check_main_function: bool,

    /// Workspace-relative path prefixes exempt from checking.
    #[serde(default, rename = "files")]
    pub file_whitelist: IndexSet<String>,

    /// Relative file path (or `"*"`) to exempt function names or exact signatures.
    #[serde(default, rename = "functions")]
    pub function_whitelist: IndexMap<String, IndexSet<String>>,

    /// Return types whose functions are exempt, e.g. `"void"` or `"unsigned long"`.
    #[serde(default, rename = "return_types")]
    pub return_type_whitelist: IndexSet<String>,
}

impl WhitelistConfig {
    #[must_use]
    pub fn normalized(self) -> Self {
        let function_whitelist = self
            .function_whitelist
            .into_iter()
            .filter_map(|(file, names)| {
                let names = trim_entries(names);
                (!names.is_empty()).then_some((file, names))
            })
            .collect();

        Self {
            check_main_function: self.check_main_function,
            file_whitelist: trim_entries(self.file_whitelist),
            function_whitelist,
            return_type_whitelist: trim_entries(self.return_type_whitelist),
        }
    }

    /// Entries listed for `key`, if any.
    #[must_use]
    pub fn functions_for(&self, key: &str) -> Option<&IndexSet<String>> {
        self.function_whitelist.get(key)
    }
}

fn trim_entries(entries: IndexSet<String>) -> IndexSet<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

/// File discovery and run limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Source extensions to enumerate.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from enumeration.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Maximum candidate files per run.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Maximum file size in bytes; larger files are skipped.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Maximum problems per run; reaching it stops the run.
    #[serde(default = "default_max_problems")]
    pub max_problems: usize,

    /// Drop matches named `if`, `for`, `while`, `switch` or `catch`.
    #[serde(default)]
    pub skip_control_statements: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_problems: DEFAULT_MAX_PROBLEMS,
            skip_control_statements: false,
        }
    }
}

impl ScanConfig {
    /// Reject extensions the scanner cannot read; such files would be
    /// enumerated and then always skipped.
    ///
    /// # Errors
    /// Returns a `Config` error naming the first unsupported extension.
    pub fn check_extensions(&self) -> Result<()> {
        match self
            .extensions
            .iter()
            .find(|ext| !SUPPORTED_EXTENSIONS.contains(&ext.trim_start_matches('.')))
        {
            Some(ext) => Err(DocDoctorError::Config(format!(
                "scan.extensions: unsupported extension \"{ext}\" (supported: {})",
                SUPPORTED_EXTENSIONS.join(", ")
            ))),
            None => Ok(()),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["c".to_string(), "cpp".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

const fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

const fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

const fn default_max_problems() -> usize {
    DEFAULT_MAX_PROBLEMS
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
