use std::time::Duration;

use pathprobe_core::{
    CandidateGenerator, DEFAULT_USER_AGENT, ProbeMethod, ProbeSettings,
    ScanSettings, SuffixVariant, TargetScope,
    scan::{DEFAULT_CONCURRENCY, DEFAULT_MAX_RESULTS},
};

pub const DEFAULT_TIMEOUT_MS: u64 = 2_500;

/// Scan tuning resolved from defaults, file and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Worker pool size per scan; also the in-flight request ceiling.
    pub concurrency: usize,
    /// Found URLs returned per scan before admission stops.
    pub max_results: usize,
    /// Per-probe bound covering connect, redirects and headers.
    pub timeout_ms: u64,
    pub method: ProbeMethod,
    /// Applied to every entry in this order.
    pub suffixes: Vec<SuffixVariant>,
    pub scope: TargetScope,
    /// Fixed pause each worker takes after a probe.
    pub request_delay_ms: u64,
    pub follow_redirects: bool,
    pub user_agent: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            max_results: DEFAULT_MAX_RESULTS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            method: ProbeMethod::default(),
            suffixes: vec![SuffixVariant::Plain],
            scope: TargetScope::default(),
            request_delay_ms: 0,
            follow_redirects: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScannerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            method: self.method,
            timeout: self.timeout(),
            user_agent: self.user_agent.clone(),
            follow_redirects: self.follow_redirects,
        }
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings::new(self.concurrency, self.max_results)
            .with_request_delay(Duration::from_millis(self.request_delay_ms))
    }

    pub fn generator(&self) -> CandidateGenerator {
        CandidateGenerator::new(self.suffixes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_service() {
        let config = ScannerConfig::default();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.max_results, 50);
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.method, ProbeMethod::Head);
        assert_eq!(config.scope, TargetScope::Origin);
    }

    #[test]
    fn converts_into_core_settings() {
        let config = ScannerConfig {
            concurrency: 8,
            request_delay_ms: 150,
            suffixes: vec![SuffixVariant::Plain, SuffixVariant::Dir],
            ..ScannerConfig::default()
        };

        let scan = config.scan_settings();
        assert_eq!(scan.concurrency, 8);
        assert_eq!(scan.request_delay, Duration::from_millis(150));
        assert_eq!(config.generator().variants_per_entry(), 2);
        assert!(config.probe_settings().follow_redirects);
    }
}
