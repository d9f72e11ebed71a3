pub mod ask_handler;
pub mod ask_payload;
pub mod ask_response;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

pub use state::AppState;

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/ask", post(ask_handler::ask))
        .route("/health", get(ask_handler::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
