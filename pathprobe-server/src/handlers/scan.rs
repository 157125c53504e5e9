use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pathprobe_model::{ScanRequest, ScanResponse};
use tracing::info;

use crate::infra::{app_state::AppState, errors::AppResult};

/// Run one scan against the submitted site.
///
/// The body is taken as a `Result` so malformed JSON surfaces through
/// [`AppError`](crate::infra::errors::AppError) with the usual error shape.
pub async fn scan_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> AppResult<Json<ScanResponse>> {
    let Json(request) = payload?;
    info!(site = ?request.site, "scan requested");

    let result = state
        .scanner()
        .scan(request.site.as_deref(), state.dictionary())
        .await?;

    Ok(Json(result.into_response()))
}
