//! tally core: counter persistence, client-input validation, and rendering.
//!
//! This crate defines the pieces of the hit counter that are independent of
//! any HTTP framework: the file-backed counter store with its advisory lock
//! and visit log, timezone resolution, track-id / user-agent normalization,
//! and the two count renderers. It intentionally carries no async runtime
//! dependency so it can be exercised from plain synchronous tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `CounterError`/`Result`; malformed
//! client input is normalized, never an error.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod render;
pub mod store;
pub mod track;

/// Shared result type.
pub use error::{CounterError, Result};
