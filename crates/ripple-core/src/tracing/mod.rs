//! Tracing setup for Ripple.

pub mod setup;

pub use setup::init_tracing;
