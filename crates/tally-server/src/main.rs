//! tally server binary.
//!
//! A traditional web hit counter:
//! - JSON endpoint: /json
//! - HTML sprite endpoint: /html
//! - Prometheus text metrics: /metrics
//!
//! Configuration comes from the environment (LISTEN_ADDR, LOCK_FILENAME,
//! COUNT_FILENAME, LOG_DIRNAME, TZ, IMAGE_URL, IMAGE_WIDTH, IMAGE_HEIGHT,
//! MIN_DIGITS); logging from RUST_LOG.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use tally_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_env().expect("config load failed");

    // The store treats a missing log directory as a fatal request error,
    // so create the configured one up front.
    std::fs::create_dir_all(&cfg.log_dirname).expect("log directory create failed");

    let listen: SocketAddr = cfg.listen;
    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "tally-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server failed");
}
