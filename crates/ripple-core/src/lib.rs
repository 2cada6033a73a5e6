//! ripple-core — shared foundation for the Ripple impact engine.
//!
//! Method identity, configuration, error taxonomy, inspection events,
//! cooperative cancellation, and tracing setup. Every other crate in the
//! workspace depends on this one and nothing heavier.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use types::method_ref::MethodRef;
