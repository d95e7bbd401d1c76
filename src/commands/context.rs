use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::Result;
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, SarifFormatter, TextFormatter,
};

/// Load the configuration for a workspace.
///
/// An explicit `config_path` wins; otherwise `.doc-doctor.toml` in
/// `project_root`, then the user config directory, then defaults.
///
/// # Errors
/// Returns an error if a config file exists but cannot be read or parsed.
pub(crate) fn load_config(
    config_path: Option<&Path>,
    no_config: bool,
    project_root: &Path,
) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new().with_project_root(project_root);
    let loaded = config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))?;
    if let Some(source) = &loaded.source {
        tracing::info!(path = %source.display(), "using configuration file");
    }
    Ok(loaded.config)
}

/// Canonical form of `path`, or `path` unchanged if it cannot be resolved.
pub(crate) fn resolve(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Formatter for `format`. Problem paths are printed relative to `root`.
pub(crate) fn formatter_for(
    format: OutputFormat,
    color: ColorMode,
    verbose: u8,
    root: &Path,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::with_verbose(color, verbose).with_root(root)),
        OutputFormat::Json => Box::new(JsonFormatter::new().with_root(root)),
        OutputFormat::Sarif => Box::new(SarifFormatter::new().with_root(root)),
    }
}

/// Write a report to `output_path`, or to stdout when `None`.
///
/// # Errors
/// Returns an error if the file or stdout cannot be written.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str) -> Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, content)?;
            tracing::debug!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
