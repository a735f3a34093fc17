//! Counter endpoints (shared algorithm, JSON/HTML render variants).
//!
//! Per request:
//! - resolve "now" in the configured timezone
//! - pick a track id (`If-None-Match` header, then cookie, else mint one)
//! - suppress the increment when a recent `previous_count` cookie is set
//! - otherwise record the visit through the sink
//! - render, then attach ETag / Cache-Control and the cookie pair
//!
//! The `previous_count` value is trusted verbatim: a client can forge it
//! to change its own displayed count, but never the persisted one.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

use tally_core::error::{CounterError, Result};
use tally_core::store::Visit;
use tally_core::{clock, render, track};

use crate::app_state::AppState;
use crate::http::addr;

const TRACK_ID_COOKIE: &str = "track_id";
const PREVIOUS_COUNT_COOKIE: &str = "previous_count";

/// Duplicate-suppression window.
const PREVIOUS_COUNT_TTL: Duration = Duration::minutes(30);
/// Returning-client window.
const TRACK_ID_TTL: Duration = Duration::days(365);

/// Forces revalidation on every request so intermediaries never serve a
/// stale count.
const CACHE_CONTROL_VALUE: &str = "private, must-revalidate, proxy-revalidate";

/// Render variant, selected by route.
#[derive(Debug, Clone, Copy)]
enum Variant {
    Json,
    Html,
}

impl Variant {
    fn as_str(self) -> &'static str {
        match self {
            Variant::Json => "json",
            Variant::Html => "html",
        }
    }
}

/// `GET /json`: `{"count": N}`.
pub async fn serve_json(
    State(app): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    serve(app, peer, headers, jar, Variant::Json).await
}

/// `GET /html`: sprite-rendered digits.
pub async fn serve_html(
    State(app): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    serve(app, peer, headers, jar, Variant::Html).await
}

async fn serve(
    app: AppState,
    peer: SocketAddr,
    headers: HeaderMap,
    jar: CookieJar,
    variant: Variant,
) -> Response {
    app.metrics()
        .requests
        .inc(&[("endpoint", variant.as_str())]);

    match respond(&app, peer, &headers, jar, variant).await {
        Ok(res) => res,
        Err(e) => {
            app.metrics()
                .store_errors
                .inc(&[("endpoint", variant.as_str())]);
            tracing::error!(error = %e, endpoint = variant.as_str(), "counter request failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn respond(
    app: &AppState,
    peer: SocketAddr,
    headers: &HeaderMap,
    jar: CookieJar,
    variant: Variant,
) -> Result<Response> {
    let cfg = app.cfg();
    let now = clock::now_in(cfg.timezone);

    // If-None-Match takes precedence over the cookie; the cookie is only
    // consulted when the header is absent (or unreadable/empty).
    let header_id = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());
    let cookie_id = jar.get(TRACK_ID_COOKIE).map(|c| c.value());
    let track_id = track::resolve_track_id(header_id.or(cookie_id));

    let previous = jar
        .get(PREVIOUS_COUNT_COOKIE)
        .map(|c| track::parse_previous_count(c.value()))
        .unwrap_or(0);

    let count = if previous > 0 {
        app.metrics()
            .suppressed
            .inc(&[("endpoint", variant.as_str())]);
        tracing::debug!(previous, "repeat inside the suppression window");
        previous
    } else {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(track::sanitize_user_agent)
            .unwrap_or("")
            .to_string();
        let visit = Visit {
            remote_addr: addr::client_addr(headers, peer),
            user_agent,
            track_id: track_id.clone(),
        };
        let count = app.sink().record(now, visit).await?;
        app.metrics()
            .visits
            .inc(&[("endpoint", variant.as_str())]);
        count
    };

    let body = match variant {
        Variant::Json => (
            [(header::CONTENT_TYPE, "application/json")],
            render::render_json(count)?,
        )
            .into_response(),
        Variant::Html => Html(render::render_html(count, &cfg.sprite_sheet())).into_response(),
    };

    let jar = jar
        .add(
            Cookie::build((PREVIOUS_COUNT_COOKIE, count.to_string()))
                .path("/")
                .max_age(PREVIOUS_COUNT_TTL),
        )
        .add(
            Cookie::build((TRACK_ID_COOKIE, track_id.clone()))
                .path("/")
                .max_age(TRACK_ID_TTL),
        );

    let etag = HeaderValue::from_str(&track_id)
        .map_err(|e| CounterError::Internal(format!("etag header: {e}")))?;
    let extra = [
        (header::ETAG, etag),
        (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE)),
    ];

    Ok((jar, extra, body).into_response())
}
