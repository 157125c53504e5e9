use pathprobe_model::{ScanResponse, ScanStats, ScanStatus};

/// Outcome of one scan invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Found URLs in completion order, not dictionary order.
    pub files: Vec<String>,
    pub status: ScanStatus,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn stopped_early(&self) -> bool {
        self.status.is_cap_reached()
    }

    /// Human-readable summary returned to callers.
    pub fn message(&self) -> String {
        match self.status {
            ScanStatus::Exhausted => {
                format!("scanned all {} entries.", self.stats.entries)
            }
            ScanStatus::CapReached => format!(
                "stopped early after finding {} files (result cap reached).",
                self.files.len()
            ),
        }
    }

    pub fn into_response(self) -> ScanResponse {
        let message = self.message();
        ScanResponse::new(self.files, self.status, message, self.stats)
    }
}
