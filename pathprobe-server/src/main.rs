use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser};
use pathprobe_config::{Config, ConfigLoad, ConfigLoader, ConfigWarnings};
use pathprobe_core::Dictionary;
use pathprobe_server::{AppState, create_app, infra::telemetry};
use tracing::{info, warn};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "pathprobe-server")]
#[command(
    about = "Probe a site for paths drawn from a wordlist over a small HTTP API"
)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// TOML configuration file
    #[arg(short, long, env = "PATHPROBE_CONFIG")]
    config: Option<PathBuf>,

    /// Wordlist to load at startup (overrides config)
    #[arg(short, long, env = "DICTIONARY_PATH")]
    dictionary: Option<PathBuf>,

    /// Alternate .env file to read before the environment
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_server(cli.serve).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = args.env_file.clone() {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(path) = args.dictionary.clone() {
        config.dictionary.path = path;
    }

    telemetry::init_tracing();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }
    log_warnings(&warnings);

    Ok(config)
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => {
                warn!(
                    message = %warning.message,
                    hint = %hint,
                    "configuration warning"
                )
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(&args)?;

    let dictionary = Dictionary::load(&config.dictionary.path)
        .context("dictionary is required at startup")?;
    if dictionary.is_empty() {
        warn!(
            path = %config.dictionary.path.display(),
            "dictionary has no entries; every scan will report 0 entries"
        );
    }

    let scanner = &config.scanner;
    info!(
        concurrency = scanner.concurrency,
        max_results = scanner.max_results,
        timeout_ms = scanner.timeout_ms,
        method = %scanner.method,
        scope = %scanner.scope,
        suffixes = ?scanner.suffixes,
        request_delay_ms = scanner.request_delay_ms,
        follow_redirects = scanner.follow_redirects,
        "scanner settings"
    );

    let bind_address = config.server.bind_address();
    let state = AppState::from_config(config, dictionary)
        .context("failed to build HTTP client")?;
    let router = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("Starting pathprobe on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
