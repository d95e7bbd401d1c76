use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checker::ProblemRecord;
use crate::error::{DocDoctorError, Result};
use crate::state::{self, DEFAULT_LOCK_TIMEOUT_MS, LockError, LockGuard};

use super::{ProblemStatus, ProblemStore, StoredProblem};

const STORE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    /// Ids are never reused, even after `clear`.
    next_id: u64,
    problems: Vec<StoredProblem>,
}

/// Problems kept in a JSON file, by default `<root>/.doc-doctor/problems.json`.
///
/// Every operation holds an exclusive lock on `<file>.lock` and rewrites the
/// file atomically.
pub struct JsonProblemStore {
    path: PathBuf,
    lock_timeout_ms: u64,
    clock: fn() -> u64,
}

impl JsonProblemStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
            clock: state::current_unix_timestamp,
        }
    }

    /// Store at the default location under `project_root`.
    #[must_use]
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(state::problems_path(project_root))
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<LockGuard> {
        state::lock_exclusive(&self.path, self.lock_timeout_ms).map_err(|err| match err {
            LockError::Timeout => DocDoctorError::Store(format!(
                "{} is locked by another process",
                self.path.display()
            )),
            LockError::Io(source) => DocDoctorError::FileRead {
                path: self.path.clone(),
                source,
            },
        })
    }

    fn read(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile {
                version: STORE_VERSION,
                next_id: 1,
                problems: Vec::new(),
            });
        }
        let json = std::fs::read_to_string(&self.path).map_err(|source| {
            DocDoctorError::FileRead {
                path: self.path.clone(),
                source,
            }
        })?;
        let file: StoreFile = serde_json::from_str(&json)?;
        if file.version != STORE_VERSION {
            return Err(DocDoctorError::Store(format!(
                "unsupported problem store version {} in {}",
                file.version,
                self.path.display()
            )));
        }
        Ok(file)
    }

    /// Give `problems` the next ids and the current timestamp, and add them to `file`.
    fn append(&self, file: &mut StoreFile, problems: &[ProblemRecord]) -> Vec<StoredProblem> {
        let check_timestamp = (self.clock)();
        let start = file.next_id;
        let saved: Vec<StoredProblem> = problems
            .iter()
            .zip(start..)
            .map(|(problem, id)| StoredProblem {
                id,
                check_timestamp,
                status: ProblemStatus::Normal,
                problem: problem.clone(),
            })
            .collect();
        file.next_id = start + saved.len() as u64;
        file.problems.extend(saved.iter().cloned());
        saved
    }

    fn write(&self, file: &StoreFile) -> Result<()> {
        let json = serde_json::to_string_pretty(file)?;
        state::atomic_write(&self.path, json.as_bytes())?;
        Ok(())
    }
}

impl ProblemStore for JsonProblemStore {
    fn save(&self, problems: &[ProblemRecord]) -> Result<Vec<StoredProblem>> {
        let _guard = self.lock()?;
        let mut file = self.read()?;
        let saved = self.append(&mut file, problems);
        self.write(&file)?;
        tracing::debug!(count = saved.len(), path = %self.path.display(), "saved problems");
        Ok(saved)
    }

    /// Clear and insert under one lock, with a single write.
    fn replace_all(&self, problems: &[ProblemRecord]) -> Result<Vec<StoredProblem>> {
        let _guard = self.lock()?;
        let mut file = self.read()?;
        file.problems.clear();
        let saved = self.append(&mut file, problems);
        self.write(&file)?;
        tracing::debug!(count = saved.len(), path = %self.path.display(), "replaced problems");
        Ok(saved)
    }

    fn load_all(&self) -> Result<Vec<StoredProblem>> {
        let _guard = self.lock()?;
        Ok(self.read()?.problems)
    }

    fn update_status(&self, id: u64, status: ProblemStatus) -> Result<()> {
        let _guard = self.lock()?;
        let mut file = self.read()?;
        let problem = file
            .problems
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DocDoctorError::Store(format!("no problem with id {id}")))?;
        problem.status = status;
        self.write(&file)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock()?;
        let mut file = self.read()?;
        file.problems.clear();
        self.write(&file)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
