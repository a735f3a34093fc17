//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, http, obs};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/json", get(http::counter::serve_json))
        .route("/html", get(http::counter::serve_html))
        .route("/metrics", get(obs::serve_metrics))
        .with_state(state)
}
