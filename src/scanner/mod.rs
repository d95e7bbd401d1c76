mod filter;

pub use filter::{FileFilter, SourceFilter};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{DocDoctorError, Result};

/// Candidate files for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Sorted paths, at most the configured cap.
    pub files: Vec<PathBuf>,
    /// More candidates existed than the cap allowed.
    pub truncated: bool,
}

/// Source of candidate files for a project run.
pub trait FileEnumerator {
    /// Project root that relative paths are computed against.
    fn root(&self) -> &Path;

    /// List candidate files.
    ///
    /// # Errors
    /// Returns an error if the root does not exist or cannot be walked.
    fn enumerate(&self) -> Result<Enumeration>;
}

/// Walks a directory tree and keeps files accepted by the filter.
pub struct DirectoryEnumerator<F: FileFilter> {
    root: PathBuf,
    filter: F,
    max_files: usize,
}

impl<F: FileFilter> DirectoryEnumerator<F> {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, filter: F, max_files: usize) -> Self {
        Self {
            root: root.into(),
            filter,
            max_files,
        }
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

impl DirectoryEnumerator<SourceFilter> {
    /// Enumerator using the `[scan]` extensions, excludes and file cap.
    ///
    /// # Errors
    /// Returns an error if an exclude pattern is invalid.
    pub fn from_config(root: impl Into<PathBuf>, scan: &ScanConfig) -> Result<Self> {
        Ok(Self::new(
            root,
            SourceFilter::from_config(scan)?,
            scan.max_files,
        ))
    }
}

impl<F: FileFilter> FileEnumerator for DirectoryEnumerator<F> {
    fn root(&self) -> &Path {
        &self.root
    }

    fn enumerate(&self) -> Result<Enumeration> {
        if !self.root.is_dir() {
            return Err(DocDoctorError::RootNotFound(self.root.clone()));
        }

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || self.filter.should_descend(self.relative(e.path()))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(DocDoctorError::Io(err.into()));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && self.filter.should_include(self.relative(entry.path()))
            {
                files.push(entry.into_path());
            }
        }

        files.sort();
        let truncated = files.len() > self.max_files;
        files.truncate(self.max_files);

        tracing::debug!(
            root = %self.root.display(),
            files = files.len(),
            truncated,
            "enumerated candidate files"
        );
        Ok(Enumeration { files, truncated })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
