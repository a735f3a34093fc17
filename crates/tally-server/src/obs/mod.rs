//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics behind `DashMap` and rendered by the
//! `/metrics` handler in Prometheus text exposition format. This endpoint
//! is deliberately outside the counting logic: it sets no cookies and
//! never touches the store.

pub mod metrics;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::app_state::AppState;

/// `GET /metrics`: Prometheus text exposition.
pub async fn serve_metrics(State(app): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        app.metrics().render(),
    )
}
