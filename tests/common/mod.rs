#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the doc-doctor binary.
#[macro_export]
macro_rules! doc_doctor {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("doc-doctor"))
    };
}

/// Undocumented two-parameter function: brief, two params and return missing.
pub const UNDOCUMENTED_ADD: &str = "int add(int a, int b) {\n    return a + b;\n}\n";

pub const DOCUMENTED_ADD: &str = "/**\n * @brief Adds two integers.\n * @param a first\n * @param b second\n * @return the sum\n */\nint add(int a, int b) {\n    return a + b;\n}\n";

/// Creates a temporary workspace with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Creates `.doc-doctor.toml` in the workspace root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".doc-doctor.toml", content);
    }

    /// Reads `.doc-doctor/problems.json` as JSON.
    pub fn stored_problems(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.join(".doc-doctor/problems.json"))
            .expect("Failed to read problem store");
        serde_json::from_str(&content).expect("Problem store is not valid JSON")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
