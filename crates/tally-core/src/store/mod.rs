//! Counter store: the persisted count plus the append-only visit log.
//!
//! The critical section (read count -> increment -> rewrite -> append one
//! log row) runs under an exclusive advisory file lock, so at most one
//! mutator is active across all cooperating processes that honor the same
//! lock path. Everything outside `increment_and_log` is unsynchronized by
//! design; callers do their parsing and rendering without the lock.

mod lock;
mod log;

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use lock::LockGuard;

/// One counted request, as it lands in the visit log.
#[derive(Debug, Clone)]
pub struct Visit {
    pub remote_addr: String,
    pub user_agent: String,
    pub track_id: String,
}

/// Owns the count file and the month-bucketed log files; no other
/// component writes them.
///
/// The store is cheap to clone (paths only) and holds no open descriptors
/// between calls; the lock file is reopened per increment.
#[derive(Debug, Clone)]
pub struct CounterStore {
    lock_path: PathBuf,
    count_path: PathBuf,
    log_dir: PathBuf,
}

impl CounterStore {
    pub fn new(
        lock_path: impl Into<PathBuf>,
        count_path: impl Into<PathBuf>,
        log_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            lock_path: lock_path.into(),
            count_path: count_path.into(),
            log_dir: log_dir.into(),
        }
    }

    /// Increment the persisted count and append one log row, returning the
    /// new count.
    ///
    /// Blocks until the advisory lock is acquired (no timeout); the guard
    /// releases it on every exit path. Filesystem errors propagate to the
    /// caller without retry, leaving the count file in whatever state the
    /// failed step reached.
    pub fn increment_and_log(
        &self,
        stamp: DateTime<FixedOffset>,
        visit: &Visit,
    ) -> Result<u64> {
        let _lock = LockGuard::acquire(&self.lock_path)?;

        let count = self.read_count()? + 1;
        fs::write(&self.count_path, count.to_string())?;
        log::append_row(&self.log_dir, stamp, count, visit)?;

        tracing::debug!(count, track_id = %visit.track_id, "visit recorded");
        Ok(count)
    }

    /// Current persisted value. A missing file, empty file, or content
    /// that does not parse as a decimal integer all read as zero.
    fn read_count(&self) -> Result<u64> {
        match fs::read(&self.count_path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).trim().parse().unwrap_or(0)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}
