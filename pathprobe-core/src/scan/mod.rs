//! Bounded-concurrency scan scheduler.
//!
//! A scan moves through `Idle -> Running -> Draining -> Terminal`:
//!
//! - **Running**: a fixed pool of workers claims candidates from a shared
//!   cursor, so at most `concurrency` probes are ever in flight.
//! - **Draining**: once the found count reaches the cap, the stop flag is
//!   raised. No new candidate is admitted; probes already in flight finish
//!   normally.
//! - **Terminal**: every worker has been joined and the result is assembled.
//!
//! The cap is strict. Found slots are reserved atomically before a URL is
//! recorded, so at most `max_results` URLs are returned. A 200 that arrives
//! after the cap is full is counted in `stats.discarded` and dropped. Up to
//! `concurrency - 1` probes may be admitted after the cap is reached.
//!
//! `files` is ordered by completion, which is nondeterministic whenever
//! `concurrency > 1`.

mod result;
mod scheduler;
mod settings;

pub use result::ScanResult;
pub use settings::{DEFAULT_CONCURRENCY, DEFAULT_MAX_RESULTS, ScanSettings};

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::info;

use crate::{
    candidate::CandidateGenerator,
    dictionary::Dictionary,
    error::Result,
    probe::{HttpProber, ProbeSettings, Prober},
    target::{ScanTarget, TargetScope},
};

use scheduler::ScanRun;

/// Runs scans against a shared prober.
///
/// A `Scanner` holds no per-scan state; concurrent calls to [`Scanner::scan`]
/// each get their own counters and accumulators.
#[derive(Clone)]
pub struct Scanner {
    prober: Arc<dyn Prober>,
    generator: Arc<CandidateGenerator>,
    settings: ScanSettings,
    scope: TargetScope,
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("generator", &self.generator)
            .field("settings", &self.settings)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            generator: Arc::new(CandidateGenerator::default()),
            settings: ScanSettings::default(),
            scope: TargetScope::default(),
        }
    }

    pub fn with_settings(mut self, settings: ScanSettings) -> Self {
        self.settings = ScanSettings {
            concurrency: settings.concurrency.max(1),
            ..settings
        };
        self
    }

    pub fn with_generator(mut self, generator: CandidateGenerator) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    pub fn with_scope(mut self, scope: TargetScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    pub fn generator(&self) -> &CandidateGenerator {
        &self.generator
    }

    pub fn scope(&self) -> TargetScope {
        self.scope
    }

    /// Validate `site` and scan it with every entry in `dictionary`.
    ///
    /// Fails only with [`ScanError::InvalidInput`](crate::ScanError), before
    /// any request is made. Probe failures are folded into the result.
    pub async fn scan(
        &self,
        site: Option<&str>,
        dictionary: &Dictionary,
    ) -> Result<ScanResult> {
        let target = ScanTarget::parse(site, self.scope)?;
        Ok(self.scan_target(&target, dictionary).await)
    }

    /// Scan an already validated target.
    pub async fn scan_target(
        &self,
        target: &ScanTarget,
        dictionary: &Dictionary,
    ) -> ScanResult {
        let started = Instant::now();
        let run = Arc::new(ScanRun::new(
            target.clone(),
            dictionary.clone(),
            Arc::clone(&self.generator),
            self.settings.max_results,
        ));
        let workers = self.settings.worker_count(run.total());

        info!(
            target: "scan::summary",
            site = %target.site(),
            prefix = %target.prefix(),
            candidates = run.total(),
            workers,
            cap = self.settings.max_results,
            "scan started"
        );

        scheduler::drive(
            Arc::clone(&run),
            Arc::clone(&self.prober),
            workers,
            self.settings.request_delay,
        )
        .await;

        let result = run.finish(started);
        info!(
            target: "scan::summary",
            site = %target.site(),
            status = ?result.status,
            found = result.stats.found,
            probed = result.stats.probed,
            not_found = result.stats.not_found,
            errored = result.stats.errored,
            skipped = result.stats.skipped,
            discarded = result.stats.discarded,
            elapsed_ms = result.stats.elapsed_ms,
            "scan finished"
        );
        result
    }
}

/// One-shot scan with default probe settings apart from `timeout`.
///
/// `base_url` is validated before the HTTP client is built, so invalid input
/// never touches the network.
pub async fn scan(
    base_url: &str,
    dictionary: &Dictionary,
    concurrency: usize,
    cap: usize,
    timeout: Duration,
) -> Result<ScanResult> {
    let target = ScanTarget::parse(Some(base_url), TargetScope::default())?;
    let prober = HttpProber::new(&ProbeSettings {
        timeout,
        ..ProbeSettings::default()
    })?;

    let scanner = Scanner::new(Arc::new(prober))
        .with_settings(ScanSettings::new(concurrency, cap));
    Ok(scanner.scan_target(&target, dictionary).await)
}
