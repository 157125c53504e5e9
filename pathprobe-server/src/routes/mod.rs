pub mod v1;

use crate::{AppState, handlers::scan::scan_handler};
use axum::{Router, routing::post};

/// Create the main API router with all versions
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        // Unversioned path kept for existing clients
        .route("/scan", post(scan_handler))
        .nest("/api/v1", v1::create_v1_router())
}
