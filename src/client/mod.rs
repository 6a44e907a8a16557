//! HTTP client functionality

pub mod http;

pub use http::{build_client, execute};
