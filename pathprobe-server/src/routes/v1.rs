use axum::{Router, routing::post};

use crate::{AppState, handlers::scan::scan_handler};

pub const SCAN: &str = "/scan";

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new().route(SCAN, post(scan_handler))
}
