use serde::{Deserialize, Serialize};

use crate::models::ScanInfo;

/// Linear per-run state: forward transitions only. A run that aborts on a
/// decode failure stays in `Parsing`; there is no partial terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    NotStarted,
    Parsing,
    Completed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not-started"),
            Self::Parsing => write!(f, "parsing"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Counters and scan metadata for one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub scan: ScanInfo,
    /// Findings offered to the assembler.
    pub findings_seen: u64,
    /// Records submitted to the sink (before duplicate resolution).
    pub submitted: u64,
    /// Findings dropped by the validity gate.
    pub skipped: u64,
    /// Submissions merged into an already-seen instance id.
    pub merged: u64,
}

impl RunReport {
    /// Distinct records delivered to the caller's sink.
    pub fn delivered(&self) -> u64 {
        self.submitted - self.merged
    }
}
