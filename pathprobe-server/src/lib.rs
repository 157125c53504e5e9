//! HTTP surface of pathprobe.
//!
//! `POST /scan` and `POST /api/v1/scan` accept `{"site": "<url>"}` and return
//! the discovered URLs with a status message. `GET /ping` and `GET /health`
//! report liveness and the active scanner settings.

pub mod app;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use app::create_app;
pub use infra::app_state::AppState;
