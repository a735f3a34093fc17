//! Async seam over the blocking counter store.
//!
//! The request handler talks to a `VisitSink` rather than the store
//! directly: the production sink moves the store's blocking file I/O onto
//! the tokio blocking pool, and tests substitute call-counting fakes to
//! verify the duplicate-suppression contract.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use tally_core::error::{CounterError, Result};
use tally_core::store::{CounterStore, Visit};

#[async_trait]
pub trait VisitSink: Send + Sync {
    /// Record one countable visit, returning the authoritative new count.
    async fn record(&self, stamp: DateTime<FixedOffset>, visit: Visit) -> Result<u64>;
}

/// Production sink: the file-backed store, run on the blocking pool.
pub struct FileSink {
    store: CounterStore,
}

impl FileSink {
    pub fn new(store: CounterStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VisitSink for FileSink {
    async fn record(&self, stamp: DateTime<FixedOffset>, visit: Visit) -> Result<u64> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.increment_and_log(stamp, &visit))
            .await
            .map_err(|e| CounterError::Internal(format!("store task join: {e}")))?
    }
}
