use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Per-probe lines stay at info so hits are visible.
                    "info,scan::summary=info,scan::probe=info,tower_http=warn"
                        .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
