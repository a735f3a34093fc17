//! Shared error type across tally crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, CounterError>;

/// Unified error type used by core and server.
///
/// The counter has a deliberately flat taxonomy: malformed client input is
/// normalized upstream and never reaches this type, so everything here is
/// either a startup configuration problem or a filesystem failure that is
/// fatal to the current request.
#[derive(Debug, Error)]
pub enum CounterError {
    /// Filesystem failure inside the store critical section (lock, count
    /// file, log append). Propagated to the caller without retry.
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid configuration, detected at startup.
    #[error("config: {0}")]
    Config(String),
    /// Internal server error.
    #[error("internal: {0}")]
    Internal(String),
}
