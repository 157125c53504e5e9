use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::debug;

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "pathprobe is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let scanner = &state.config().scanner;
    let suffixes: Vec<&str> =
        scanner.suffixes.iter().map(|suffix| suffix.as_str()).collect();
    let dictionary_status = if state.dictionary().is_empty() {
        "empty"
    } else {
        "loaded"
    };

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "dictionary": {
                "status": dictionary_status,
                "entries": state.dictionary().len(),
                "path": state.config().dictionary.path.display().to_string(),
            },
            "scanner": {
                "concurrency": scanner.concurrency,
                "max_results": scanner.max_results,
                "timeout_ms": scanner.timeout_ms,
                "method": scanner.method.as_str(),
                "suffixes": suffixes,
                "scope": scanner.scope.as_str(),
                "follow_redirects": scanner.follow_redirects,
            },
        },
    }))
}
