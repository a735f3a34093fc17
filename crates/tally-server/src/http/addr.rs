//! Client address resolution.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Resolve the client address for the visit log: the first
/// `X-Forwarded-For` entry when a reverse proxy supplied one, else the
/// socket peer address.
pub fn client_addr(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| peer.ip().to_string())
}
