//! Advisory-lock guard.

use std::fs::OpenOptions;
use std::path::Path;

use fs2::FileExt;

use crate::error::Result;

/// Exclusive advisory lock keyed by a filesystem path.
///
/// `acquire` blocks until the lock is granted. The lock is released when
/// the guard drops, which covers success and `?`-propagation paths alike.
#[derive(Debug)]
pub struct LockGuard {
    file: std::fs::File,
}

impl LockGuard {
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // Unlock errors have no recovery path here; closing the descriptor
        // releases the lock at the OS level regardless.
        let _ = FileExt::unlock(&self.file);
    }
}
