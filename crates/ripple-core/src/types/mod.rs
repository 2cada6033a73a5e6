//! Core value types.

pub mod collections;
pub mod method_ref;

pub use method_ref::MethodRef;
