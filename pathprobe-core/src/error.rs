use std::path::PathBuf;

use thiserror::Error;

/// Errors that cross the core boundary.
///
/// Per-probe transport failures never appear here; they are folded into
/// [`crate::probe::ProbeOutcome::Errored`] and counted in the scan result.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("failed to load dictionary {}", path.display())]
    DictionaryLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ScanError {
    pub fn invalid_site(reason: impl std::fmt::Display) -> Self {
        ScanError::InvalidInput(format!("Invalid site URL: {reason}"))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScanError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
