use serde::{Deserialize, Serialize};

use crate::checker::ProblemRecord;

/// Review state of a stored problem; persisted as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ProblemStatus {
    #[default]
    Normal,
    Ignored,
}

impl From<ProblemStatus> for u8 {
    fn from(status: ProblemStatus) -> Self {
        match status {
            ProblemStatus::Normal => 0,
            ProblemStatus::Ignored => 1,
        }
    }
}

impl TryFrom<u8> for ProblemStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Ignored),
            other => Err(format!("unknown problem status {other}")),
        }
    }
}

impl std::fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Ignored => "ignored",
        })
    }
}

/// A problem as kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProblem {
    pub id: u64,
    /// Unix seconds of the run that found it.
    pub check_timestamp: u64,
    #[serde(default)]
    pub status: ProblemStatus,
    #[serde(flatten)]
    pub problem: ProblemRecord,
}
