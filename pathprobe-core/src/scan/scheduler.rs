//! Per-invocation scan state and the worker loop that drains it.
//!
//! Candidates form a flat plan indexed `0..total` (entry-major, suffix-minor).
//! Each worker claims the next index from a shared cursor, probes it and
//! records the outcome. Admission stops once the stop flag is raised; probes
//! already admitted run to completion.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use pathprobe_model::{ScanStats, ScanStatus};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::{
    candidate::{Candidate, CandidateGenerator},
    dictionary::Dictionary,
    probe::{ProbeOutcome, Prober},
    target::ScanTarget,
};

use super::result::ScanResult;

pub(super) struct ScanRun {
    target: ScanTarget,
    dictionary: Dictionary,
    generator: Arc<CandidateGenerator>,
    total: usize,
    cap: usize,
    cursor: AtomicUsize,
    found: AtomicUsize,
    stop: AtomicBool,
    files: Mutex<Vec<String>>,
    probed: AtomicUsize,
    not_found: AtomicUsize,
    errored: AtomicUsize,
    discarded: AtomicUsize,
}

impl ScanRun {
    pub(super) fn new(
        target: ScanTarget,
        dictionary: Dictionary,
        generator: Arc<CandidateGenerator>,
        cap: usize,
    ) -> Self {
        let total = generator.candidate_count(&dictionary);
        Self {
            target,
            dictionary,
            generator,
            total,
            cap,
            cursor: AtomicUsize::new(0),
            found: AtomicUsize::new(0),
            // A zero cap admits nothing.
            stop: AtomicBool::new(cap == 0),
            files: Mutex::new(Vec::with_capacity(cap.min(total))),
            probed: AtomicUsize::new(0),
            not_found: AtomicUsize::new(0),
            errored: AtomicUsize::new(0),
            discarded: AtomicUsize::new(0),
        }
    }

    pub(super) fn total(&self) -> usize {
        self.total
    }

    /// Claim the next unprobed candidate, or `None` once the plan is drained
    /// or the cap has stopped admission.
    fn admit(&self) -> Option<Candidate> {
        if self.stop.load(Ordering::Acquire) {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::AcqRel);
        if index >= self.total {
            return None;
        }
        self.generator
            .nth(self.target.prefix(), &self.dictionary, index)
    }

    fn record(&self, candidate: Candidate, outcome: ProbeOutcome) {
        self.probed.fetch_add(1, Ordering::AcqRel);
        match outcome {
            ProbeOutcome::Found => self.record_found(candidate),
            ProbeOutcome::NotFound(_) => {
                self.not_found.fetch_add(1, Ordering::Relaxed);
            }
            ProbeOutcome::Errored(_) => {
                self.errored.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn record_found(&self, candidate: Candidate) {
        let cap = self.cap;
        let reserved = self.found.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |found| (found < cap).then_some(found + 1),
        );

        match reserved {
            Ok(previous) => {
                self.files.lock().push(candidate.into_url());
                if previous + 1 >= cap {
                    self.stop.store(true, Ordering::Release);
                }
            }
            Err(_) => {
                self.stop.store(true, Ordering::Release);
                self.discarded.fetch_add(1, Ordering::Relaxed);
                debug!(
                    target: "scan::probe",
                    url = %candidate,
                    "found after cap was reached, discarding"
                );
            }
        }
    }

    /// Assemble the result. Only called after every worker has been joined.
    pub(super) fn finish(&self, started: Instant) -> ScanResult {
        let files = std::mem::take(&mut *self.files.lock());
        let probed = self.probed.load(Ordering::Acquire);
        let skipped = self.total.saturating_sub(probed);
        let discarded = self.discarded.load(Ordering::Acquire);

        // A dead worker leaves candidates skipped without the cap filling.
        let cap_filled = files.len() >= self.cap && skipped > 0;
        let status = if cap_filled || discarded > 0 {
            ScanStatus::CapReached
        } else {
            ScanStatus::Exhausted
        };

        let stats = ScanStats {
            entries: self.dictionary.len(),
            candidates: self.total,
            probed,
            found: files.len(),
            not_found: self.not_found.load(Ordering::Acquire),
            errored: self.errored.load(Ordering::Acquire),
            skipped,
            discarded,
            elapsed_ms: u64::try_from(started.elapsed().as_millis())
                .unwrap_or(u64::MAX),
        };

        ScanResult {
            files,
            status,
            stats,
        }
    }
}

/// Spawn `workers` tasks over `run` and wait for all of them.
///
/// Dropping the returned future aborts every worker still running.
pub(super) async fn drive(
    run: Arc<ScanRun>,
    prober: Arc<dyn Prober>,
    workers: usize,
    delay: Duration,
) {
    let mut tasks = JoinSet::new();
    for worker in 0..workers {
        let run = Arc::clone(&run);
        let prober = Arc::clone(&prober);
        tasks.spawn(async move {
            work(worker, &run, prober.as_ref(), delay).await;
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!(target: "scan::summary", "Scan worker failed: {}", e);
        }
    }
}

async fn work(
    worker: usize,
    run: &ScanRun,
    prober: &dyn Prober,
    delay: Duration,
) {
    let mut handled = 0usize;
    while let Some(candidate) = run.admit() {
        let outcome = prober.probe(&candidate).await;
        run.record(candidate, outcome);
        handled += 1;

        if !delay.is_zero() && !run.stop.load(Ordering::Acquire) {
            tokio::time::sleep(delay).await;
        }
    }
    debug!(target: "scan::probe", worker, handled, "worker drained");
}
