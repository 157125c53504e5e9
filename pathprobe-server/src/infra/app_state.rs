use std::{fmt, sync::Arc};

use pathprobe_config::Config;
use pathprobe_core::{Dictionary, HttpProber, Prober, ScanError, Scanner};

/// Shared, read-only state handed to every handler.
///
/// Nothing here is mutated per request; each scan builds its own counters.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dictionary: Dictionary,
    pub scanner: Arc<Scanner>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("dictionary_entries", &self.dictionary.len())
            .field("scanner", &self.scanner)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build the production state: an [`HttpProber`] configured from
    /// `config.scanner`.
    pub fn from_config(
        config: Config,
        dictionary: Dictionary,
    ) -> Result<Self, ScanError> {
        let prober = HttpProber::new(&config.scanner.probe_settings())?;
        Ok(Self::with_prober(config, dictionary, Arc::new(prober)))
    }

    /// Same wiring as [`AppState::from_config`] with a caller-supplied prober.
    pub fn with_prober(
        config: Config,
        dictionary: Dictionary,
        prober: Arc<dyn Prober>,
    ) -> Self {
        let scanner = Scanner::new(prober)
            .with_settings(config.scanner.scan_settings())
            .with_generator(config.scanner.generator())
            .with_scope(config.scanner.scope);

        Self {
            config: Arc::new(config),
            dictionary,
            scanner: Arc::new(scanner),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }
}
