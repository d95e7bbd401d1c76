//! Persisted problems from previous runs.

mod json;
mod types;

pub use json::JsonProblemStore;
pub use types::{ProblemStatus, StoredProblem};

use crate::checker::ProblemRecord;
use crate::error::Result;

/// Persistence for problems found by check runs.
pub trait ProblemStore {
    /// Append problems with fresh ids and the current timestamp.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    fn save(&self, problems: &[ProblemRecord]) -> Result<Vec<StoredProblem>>;

    /// Every stored problem, in insertion order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    fn load_all(&self) -> Result<Vec<StoredProblem>>;

    /// # Errors
    /// Returns an error if no problem has this id, or the store cannot be written.
    fn update_status(&self, id: u64, status: ProblemStatus) -> Result<()>;

    /// Remove every stored problem.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    fn clear(&self) -> Result<()>;

    /// Clear, then save `problems`. An empty slice leaves the store empty.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    fn replace_all(&self, problems: &[ProblemRecord]) -> Result<Vec<StoredProblem>> {
        self.clear()?;
        self.save(problems)
    }
}
