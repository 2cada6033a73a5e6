//! Shared traits used across Ripple crates.

pub mod cancellation;

pub use cancellation::{Cancellable, CancellationToken};
