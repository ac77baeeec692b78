//! Small, well-tested primitives: value-semantics vector math, spherical
//! geometry, device attitude types, and deterministic float ordering.
//!
//! Nothing here depends on anything outside the standard library.

pub mod attitude;
pub mod math;

pub use attitude::*;
