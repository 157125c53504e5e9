pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use pathprobe_core::SuffixVariant;
use tracing::debug;

use self::error::ConfigLoadError;
use super::{
    models::{
        Config, ConfigMetadata, CorsConfig, DictionaryConfig, ServerConfig,
        default_cors_origins,
        scanner::ScannerConfig,
        sources::{EnvConfig, FileConfig, FileScannerConfig},
    },
    validation::{self, ConfigWarnings},
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["pathprobe.toml", "config/pathprobe.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let env_config = EnvConfig::gather()?;
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = compose_config(
            file_config,
            env_config,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        // An explicitly named file must exist; defaults are best effort.
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if metadata.config_path.is_none() {
        warnings.push_with_hint(
            "No pathprobe.toml detected; using defaults and environment variables",
            "Pass --config or set PATHPROBE_CONFIG to load a configuration file",
        );
    }

    let FileConfig {
        server: file_server,
        scanner: file_scanner,
        dictionary: file_dictionary,
        cors: file_cors,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| ServerConfig::default().host),
        port: env
            .server_port
            .or(file_server.port)
            .unwrap_or(ServerConfig::default().port),
    };

    let scanner = compose_scanner(&env, file_scanner)?;

    let dictionary = DictionaryConfig {
        path: env
            .dictionary_path
            .clone()
            .or(file_dictionary.path)
            .unwrap_or_else(|| DictionaryConfig::default().path),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .clone()
            .or(file_cors.allowed_origins)
            .unwrap_or_else(default_cors_origins),
    };

    let config = Config {
        server,
        scanner,
        dictionary,
        cors,
        metadata,
    };

    let guard_warnings = validation::apply_guard_rails(&config)?;
    warnings.extend(guard_warnings);

    Ok((config, warnings))
}

fn compose_scanner(
    env: &EnvConfig,
    file: FileScannerConfig,
) -> Result<ScannerConfig, ConfigLoadError> {
    let defaults = ScannerConfig::default();

    let method = match env.scan_method.as_deref() {
        Some(raw) => parse_named("SCAN_METHOD", raw)?,
        None => match file.method.as_deref() {
            Some(raw) => parse_named("scanner.method", raw)?,
            None => defaults.method,
        },
    };

    let scope = match env.scan_scope.as_deref() {
        Some(raw) => parse_named("SCAN_SCOPE", raw)?,
        None => match file.scope.as_deref() {
            Some(raw) => parse_named("scanner.scope", raw)?,
            None => defaults.scope,
        },
    };

    let suffixes = match (&env.scan_suffixes, &file.suffixes) {
        (Some(raw), _) => parse_suffixes("SCAN_SUFFIXES", raw)?,
        (None, Some(raw)) => parse_suffixes("scanner.suffixes", raw)?,
        (None, None) => defaults.suffixes,
    };

    Ok(ScannerConfig {
        concurrency: env
            .scan_concurrency
            .or(file.concurrency)
            .unwrap_or(defaults.concurrency),
        max_results: env
            .scan_max_results
            .or(file.max_results)
            .unwrap_or(defaults.max_results),
        timeout_ms: env
            .scan_timeout_ms
            .or(file.timeout_ms)
            .unwrap_or(defaults.timeout_ms),
        method,
        suffixes,
        scope,
        request_delay_ms: env
            .scan_request_delay_ms
            .or(file.request_delay_ms)
            .unwrap_or(defaults.request_delay_ms),
        follow_redirects: env
            .scan_follow_redirects
            .or(file.follow_redirects)
            .unwrap_or(defaults.follow_redirects),
        user_agent: env
            .scan_user_agent
            .clone()
            .or(file.user_agent)
            .unwrap_or(defaults.user_agent),
    })
}

fn parse_named<T>(key: &str, raw: &str) -> Result<T, ConfigLoadError>
where
    T: FromStr<Err = String>,
{
    raw.parse::<T>()
        .map_err(|reason| ConfigLoadError::InvalidValue {
            key: key.to_string(),
            reason,
        })
}

fn parse_suffixes(
    key: &str,
    raw: &[String],
) -> Result<Vec<SuffixVariant>, ConfigLoadError> {
    raw.iter()
        .map(|value| parse_named::<SuffixVariant>(key, value))
        .collect()
}
