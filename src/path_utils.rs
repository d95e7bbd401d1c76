use std::path::Path;

/// Workspace-relative path with forward slashes.
///
/// Falls back to the full path (still slash-normalized) when `root` is unset
/// or `path` is not inside it.
///
/// # Examples
///
/// - `/ws/src/a.c` under root `/ws` becomes `src/a.c`
/// - `/elsewhere/a.c` under root `/ws` stays `/elsewhere/a.c`
/// - `src\legacy\a.c` with no root becomes `src/legacy/a.c`
#[must_use]
pub fn relative_slash_path(path: &Path, root: Option<&Path>) -> String {
    let path = dunce::simplified(path);
    let relative = root
        .and_then(|root| path.strip_prefix(dunce::simplified(root)).ok())
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(path);
    to_slash(&relative.to_string_lossy())
}

/// Replace every backslash with a forward slash.
#[must_use]
pub fn to_slash(s: &str) -> String {
    s.replace('\\', "/")
}
