mod parser;
mod types;

pub use parser::{FunctionParser, SourceScanner};
pub use types::{FileScan, FunctionRecord, ParseErrorCode};

use std::path::Path;

use crate::source_fs::SourceFs;

/// Extensions the scanner understands.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["c", "cpp"];

/// Returns true if the path has a `.c` or `.cpp` extension.
#[must_use]
pub fn is_supported_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Validate the extension and read a source file as text.
///
/// Invalid UTF-8 is replaced, not rejected.
///
/// # Errors
/// Returns the error code and message for unsupported extensions and read failures.
pub fn load_source<F>(fs: &F, path: &Path) -> Result<String, (ParseErrorCode, String)>
where
    F: SourceFs + ?Sized,
{
    if !is_supported_source(path) {
        return Err((
            ParseErrorCode::UnsupportedFileType,
            "only .c / .cpp files are supported".to_string(),
        ));
    }

    let bytes = fs
        .read(path)
        .map_err(|e| (ParseErrorCode::ReadError, e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read one file and extract its functions.
///
/// Unsupported extensions and read failures are reported in the returned
/// [`FileScan`], never as an error.
pub fn check_file<F, P>(fs: &F, parser: &P, path: &Path) -> FileScan
where
    F: SourceFs + ?Sized,
    P: FunctionParser + ?Sized,
{
    match load_source(fs, path) {
        Ok(content) => FileScan::Parsed(parser.scan(&content, path)),
        Err((code, message)) => FileScan::Failed { code, message },
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
