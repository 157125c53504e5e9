//! Configuration library for pathprobe.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables (a `.env` file is read first when present). The
//! server applies its CLI flags on top of the loaded [`Config`].

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::scanner::ScannerConfig;
pub use models::{
    Config, ConfigMetadata, CorsConfig, DictionaryConfig, ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
