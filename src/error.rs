use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocDoctorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Problem store error: {0}")]
    Store(String),

    #[error("workspace root not found: {}", .0.display())]
    RootNotFound(PathBuf),
}

impl DocDoctorError {
    /// Short category name, used in machine-readable error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "Serialization",
            Self::Store(_) => "Store",
            Self::RootNotFound(_) => "Workspace",
        }
    }
}

pub type Result<T> = std::result::Result<T, DocDoctorError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
