use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{
    loader::error::ConfigLoadError,
    util::{non_empty_var, parse_bool_var, parse_csv_var, parse_var},
};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub scanner: FileScannerConfig,
    #[serde(default)]
    pub dictionary: FileDictionaryConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Enumerated values stay as text here so file and environment share one
/// parser and one error shape.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileScannerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileDictionaryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub scan_concurrency: Option<usize>,
    pub scan_max_results: Option<usize>,
    pub scan_timeout_ms: Option<u64>,
    pub scan_method: Option<String>,
    pub scan_suffixes: Option<Vec<String>>,
    pub scan_scope: Option<String>,
    pub scan_request_delay_ms: Option<u64>,
    pub scan_follow_redirects: Option<bool>,
    pub scan_user_agent: Option<String>,
    pub dictionary_path: Option<PathBuf>,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl EnvConfig {
    pub fn gather() -> Result<Self, ConfigLoadError> {
        let server_port = match parse_var::<u16>("PORT")? {
            Some(port) => Some(port),
            None => parse_var::<u16>("SERVER_PORT")?,
        };

        Ok(Self {
            config_path: non_empty_var("PATHPROBE_CONFIG").map(PathBuf::from),
            server_host: non_empty_var("SERVER_HOST"),
            server_port,
            scan_concurrency: parse_var("SCAN_CONCURRENCY")?,
            scan_max_results: parse_var("SCAN_MAX_RESULTS")?,
            scan_timeout_ms: parse_var("SCAN_TIMEOUT_MS")?,
            scan_method: non_empty_var("SCAN_METHOD"),
            scan_suffixes: parse_csv_var("SCAN_SUFFIXES"),
            scan_scope: non_empty_var("SCAN_SCOPE"),
            scan_request_delay_ms: parse_var("SCAN_REQUEST_DELAY_MS")?,
            scan_follow_redirects: parse_bool_var("SCAN_FOLLOW_REDIRECTS")?,
            scan_user_agent: non_empty_var("SCAN_USER_AGENT"),
            dictionary_path: non_empty_var("DICTIONARY_PATH")
                .map(PathBuf::from),
            cors_allowed_origins: parse_csv_var("CORS_ALLOWED_ORIGINS"),
        })
    }
}
