use serde::{Deserialize, Serialize};

/// Inbound payload for a scan.
///
/// `site` is optional at the type level so a missing field reaches the
/// handler and is reported as invalid input instead of a body rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub site: Option<String>,
}

impl ScanRequest {
    pub fn new(site: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
        }
    }
}

/// Why a scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// Every candidate was admitted and classified.
    Exhausted,
    /// The result cap was reached and the remaining candidates were skipped.
    CapReached,
}

impl ScanStatus {
    pub fn is_cap_reached(self) -> bool {
        matches!(self, ScanStatus::CapReached)
    }
}

/// Counters describing a finished scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Dictionary entries considered.
    pub entries: usize,
    /// Candidate URLs generated (entries x suffix variants).
    pub candidates: usize,
    /// Candidates admitted and probed.
    pub probed: usize,
    /// Probes that answered 200 and were recorded.
    pub found: usize,
    pub not_found: usize,
    pub errored: usize,
    /// Candidates never admitted because the cap was reached first.
    pub skipped: usize,
    /// Probes that answered 200 after the cap was already filled.
    pub discarded: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    /// Found URLs in completion order.
    pub files: Vec<String>,
    pub status: ScanStatus,
    pub message: String,
    pub stats: ScanStats,
}

impl ScanResponse {
    pub fn new(
        files: Vec<String>,
        status: ScanStatus,
        message: String,
        stats: ScanStats,
    ) -> Self {
        ScanResponse {
            files,
            status,
            message,
            stats,
        }
    }
}
