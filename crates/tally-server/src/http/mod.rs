//! HTTP layer: the counter endpoints plus client-input helpers.

pub mod addr;
pub mod counter;
