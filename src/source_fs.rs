//! File access used by the checker, behind a trait so runs can be driven from memory in tests.

use std::io;
use std::path::Path;

/// Read and stat source files.
pub trait SourceFs {
    /// Size of the file in bytes.
    ///
    /// # Errors
    /// Returns an error if the file metadata cannot be read.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Raw file contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSourceFs;

impl SourceFs for RealSourceFs {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        std::fs::metadata(path).map(|m| m.len())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn real_fs_reports_size_and_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.c");
        fs::write(&path, "int x;").unwrap();

        let source_fs = RealSourceFs;
        assert_eq!(source_fs.file_size(&path).unwrap(), 6);
        assert_eq!(source_fs.read(&path).unwrap(), b"int x;");
    }

    #[test]
    fn real_fs_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.c");
        assert!(RealSourceFs.file_size(&path).is_err());
        assert!(RealSourceFs.read(&path).is_err());
    }
}
