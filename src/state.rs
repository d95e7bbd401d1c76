//! Project state on disk: the `.doc-doctor/` directory, root discovery and
//! locked, atomic writes of state files.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const STATE_DIR_NAME: &str = ".doc-doctor";
const PROBLEMS_FILENAME: &str = "problems.json";
const CONFIG_FILENAME: &str = ".doc-doctor.toml";

/// Default lock timeout in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

const LOCK_POLL_INTERVAL_MS: u64 = 50;

#[must_use]
pub fn state_dir(project_root: &Path) -> PathBuf {
    project_root.join(STATE_DIR_NAME)
}

/// `<root>/.doc-doctor/problems.json`
#[must_use]
pub fn problems_path(project_root: &Path) -> PathBuf {
    state_dir(project_root).join(PROBLEMS_FILENAME)
}

/// Ensure the parent directory exists for a given path.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Walk up from `start` to the nearest directory holding `.git/` or
/// `.doc-doctor.toml`.
///
/// Returns the canonicalized `start` when no marker is found.
#[must_use]
pub fn discover_project_root(start: &Path) -> PathBuf {
    let abs_start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    abs_start
        .ancestors()
        .find(|dir| dir.join(".git").is_dir() || dir.join(CONFIG_FILENAME).is_file())
        .map_or_else(|| abs_start.clone(), Path::to_path_buf)
}

/// Seconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn current_unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[derive(Debug)]
pub enum LockError {
    Timeout,
    Io(io::Error),
}

impl From<io::Error> for LockError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "lock acquisition timed out"),
            Self::Io(e) => write!(f, "lock I/O error: {e}"),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeout => None,
            Self::Io(e) => Some(e),
        }
    }
}

/// Exclusive lock on a sidecar `<path>.lock` file, released on drop.
#[derive(Debug)]
pub struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Lock `<path>.lock`, polling until `timeout_ms` elapses.
///
/// # Errors
/// - `LockError::Timeout` if the lock is still held by someone else after `timeout_ms`
/// - `LockError::Io` if the lock file cannot be opened or locked
pub fn lock_exclusive(path: &Path, timeout_ms: u64) -> Result<LockGuard, LockError> {
    ensure_parent_dir(path)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path(path))?;

    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(LOCK_POLL_INTERVAL_MS);

    loop {
        match file.try_lock() {
            Ok(()) => return Ok(LockGuard { file }),
            Err(TryLockError::WouldBlock) => {
                if start.elapsed() >= timeout {
                    return Err(LockError::Timeout);
                }
                thread::sleep(poll_interval);
            }
            Err(TryLockError::Error(e)) => return Err(LockError::Io(e)),
        }
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

/// Write `bytes` to a temporary sibling, then rename it over `path`.
///
/// # Errors
/// Returns an error if the temporary file cannot be written or renamed.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
