//! # pathprobe-core
//!
//! Core library for the pathprobe service: given a base URL and a wordlist,
//! find which guessed paths exist on the target server.
//!
//! ## Overview
//!
//! - **Dictionary**: an ordered, immutable wordlist shared by every scan
//! - **Target**: validation of the submitted site URL and the probe prefix
//! - **Candidates**: expansion of entries into guess URLs via suffix variants
//! - **Probing**: one bounded-time HTTP request per candidate, classified
//! - **Scanning**: the bounded-concurrency scheduler with a strict result cap
//!
//! ## Feature Flags
//!
//! - `mocks`: exposes `MockProber` for downstream tests
//!
//! ## Examples
//!
//! ```no_run
//! use std::{sync::Arc, time::Duration};
//!
//! use pathprobe_core::{
//!     Dictionary, HttpProber, ProbeSettings, ScanSettings, Scanner,
//! };
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let dictionary = Dictionary::parse("admin\nlogin\n.git/HEAD\n");
//!     let prober = HttpProber::new(&ProbeSettings {
//!         timeout: Duration::from_secs(2),
//!         ..ProbeSettings::default()
//!     })?;
//!
//!     let scanner = Scanner::new(Arc::new(prober))
//!         .with_settings(ScanSettings::new(5, 50));
//!     let result = scanner.scan(Some("https://example.com"), &dictionary).await?;
//!
//!     println!("{}", result.message());
//!     for url in &result.files {
//!         println!("{url}");
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Candidate URL generation and suffix variants
pub mod candidate;

/// Wordlist loading and entries
pub mod dictionary;

/// Error types
pub mod error;

/// HTTP probe executor and outcome classification
pub mod probe;

/// Bounded-concurrency scan scheduler
pub mod scan;

/// Site URL validation and prefix derivation
pub mod target;

pub use candidate::{Candidate, CandidateGenerator, SuffixVariant};
pub use dictionary::{Dictionary, DictionaryEntry};
pub use error::{Result, ScanError};
#[cfg(any(test, feature = "mocks"))]
#[cfg_attr(docsrs, doc(cfg(feature = "mocks")))]
pub use probe::MockProber;
pub use probe::{
    DEFAULT_PROBE_TIMEOUT, DEFAULT_USER_AGENT, HttpProber, ProbeFailure,
    ProbeMethod, ProbeOutcome, ProbeSettings, Prober,
};
pub use scan::{ScanResult, ScanSettings, Scanner, scan};
pub use target::{ScanTarget, TargetScope};

pub use pathprobe_model::{ScanResponse, ScanStats, ScanStatus};
