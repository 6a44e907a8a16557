//! HTTP protocol types
//!
//! Provides the method type shared by the descriptor model and both synthesizers.

mod method;

pub use method::*;
