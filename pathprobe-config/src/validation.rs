use thiserror::Error;
use url::Url;

use super::models::{Config, CorsConfig};

/// Concurrency above this still loads, with a warning.
pub const HIGH_CONCURRENCY_THRESHOLD: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("SCAN_CONCURRENCY must be at least 1")]
    ZeroConcurrency,
    #[error("SCAN_TIMEOUT_MS must be greater than zero")]
    ZeroTimeout,
    #[error("SCAN_SUFFIXES must name at least one suffix variant")]
    EmptySuffixes,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();
    let scanner = &config.scanner;

    if scanner.concurrency == 0 {
        return Err(ConfigGuardRailError::ZeroConcurrency);
    }
    if scanner.timeout_ms == 0 {
        return Err(ConfigGuardRailError::ZeroTimeout);
    }
    if scanner.suffixes.is_empty() {
        return Err(ConfigGuardRailError::EmptySuffixes);
    }

    validate_cors(&config.cors)?;

    if scanner.concurrency > HIGH_CONCURRENCY_THRESHOLD {
        warnings.push_with_hint(
            format!(
                "SCAN_CONCURRENCY={} opens that many connections per scan",
                scanner.concurrency
            ),
            "Targets may throttle or ban aggressive scanners; stay near the default of 5",
        );
    }

    if scanner.max_results == 0 {
        warnings.push_with_hint(
            "SCAN_MAX_RESULTS is 0; every scan will return no files",
            "Set SCAN_MAX_RESULTS to a positive value",
        );
    }

    if config.cors.is_wildcard_included()
        && config.cors.allowed_origins.len() > 1
    {
        warnings.push(
            "CORS_ALLOWED_ORIGINS mixes `*` with explicit origins; any origin is allowed",
        );
    }

    Ok(warnings)
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_origins.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_ORIGINS must include at least one origin"
                .into(),
        });
    }

    for origin in &cors.allowed_origins {
        if origin.trim() == "*" {
            continue;
        }
        let parsed = Url::parse(origin).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid origin `{}` in CORS_ALLOWED_ORIGINS",
                    origin
                ),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigGuardRailError::InvalidCorsConfig {
                reason: format!("origin `{}` must use http or https", origin),
            });
        }
    }

    Ok(())
}
