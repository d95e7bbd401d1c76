use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::ScanConfig;
use crate::error::{DocDoctorError, Result};

pub trait FileFilter {
    /// Whether a file (relative to the scan root) is a candidate.
    fn should_include(&self, path: &Path) -> bool;

    /// Whether a directory (relative to the scan root) should be walked at all.
    fn should_descend(&self, _dir: &Path) -> bool {
        true
    }
}

/// Extension allow-list plus glob exclusions.
pub struct SourceFilter {
    extensions: Vec<String>,
    exclude: GlobSet,
}

impl SourceFilter {
    /// Create a filter for the given extensions (without dots) and exclude globs.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| DocDoctorError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let exclude = builder
            .build()
            .map_err(|source| DocDoctorError::InvalidPattern {
                pattern: exclude_patterns.join(", "),
                source,
            })?;

        Ok(Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            exclude,
        })
    }

    /// Build the filter from `[scan]` settings.
    ///
    /// # Errors
    /// Returns an error if an extension cannot be scanned or any exclude
    /// pattern is invalid.
    pub fn from_config(scan: &ScanConfig) -> Result<Self> {
        scan.check_extensions()?;
        Self::new(scan.extensions.clone(), &scan.exclude)
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.is_match(path)
    }
}

impl FileFilter for SourceFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_valid_extension(path) && !self.is_excluded(path)
    }

    fn should_descend(&self, dir: &Path) -> bool {
        // `**/name/**` only matches paths below `name`, so test a child path.
        !self.is_excluded(&dir.join("_"))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
