use std::path::{Path, PathBuf};

use crate::error::{DocDoctorError, Result};

use super::Config;

/// Result of loading a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    /// The loaded, normalized configuration.
    pub config: Config,
    /// File the configuration came from; `None` when defaults were used.
    pub source: Option<PathBuf>,
}

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be read or parsed.
    fn load(&self) -> Result<LoadResult>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

pub const LOCAL_CONFIG_NAME: &str = ".doc-doctor.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Platform-specific configuration directory for doc-doctor.
    ///
    /// - Windows: `%APPDATA%\doc-doctor`
    /// - macOS: `~/Library/Application Support/doc-doctor`
    /// - Linux: `~/.config/doc-doctor`
    fn config_dir(&self) -> Option<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "doc-doctor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.doc-doctor.toml` in the project root (current directory if unset)
/// 2. `config.toml` in the platform user config directory
/// 3. `Config::default()` if no config found
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
    project_root: Option<PathBuf>,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fs: RealFileSystem,
            project_root: None,
        }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self {
            fs,
            project_root: None,
        }
    }

    /// Look for the local config in `root` instead of the current directory.
    #[must_use]
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.project_root
            .clone()
            .or_else(|| self.fs.current_dir().ok())
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate(&config)?;
        Ok(config.normalized())
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<LoadResult> {
        let candidates = [self.local_config_path(), self.user_config_path()];
        for path in candidates.into_iter().flatten() {
            if self.fs.exists(&path) {
                return self.load_from_path(&path);
            }
        }

        Ok(LoadResult {
            config: Config::default(),
            source: None,
        })
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| DocDoctorError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::parse_config(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
        })
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.scan.max_files == 0 {
        return Err(DocDoctorError::Config(
            "scan.max_files must be greater than 0".to_string(),
        ));
    }
    if config.scan.max_problems == 0 {
        return Err(DocDoctorError::Config(
            "scan.max_problems must be greater than 0".to_string(),
        ));
    }
    if config.scan.extensions.is_empty() {
        return Err(DocDoctorError::Config(
            "scan.extensions must not be empty".to_string(),
        ));
    }
    config.scan.check_extensions()?;
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
