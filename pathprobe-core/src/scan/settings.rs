use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Scheduler knobs for one [`Scanner`](super::Scanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Worker pool size, and so the in-flight ceiling. Never below 1.
    pub concurrency: usize,
    /// Found URLs are never recorded past this count.
    pub max_results: usize,
    /// Fixed pause a worker takes after each probe.
    pub request_delay: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            max_results: DEFAULT_MAX_RESULTS,
            request_delay: Duration::ZERO,
        }
    }
}

impl ScanSettings {
    pub fn new(concurrency: usize, max_results: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            max_results,
            ..Self::default()
        }
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub(crate) fn worker_count(&self, candidates: usize) -> usize {
        self.concurrency.max(1).min(candidates)
    }
}
