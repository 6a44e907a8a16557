//! Request building module
//!
//! Synthesizes the live HTTP request and the URL shared with the curl preview.

mod builder;
mod url;

pub use builder::{build_request, content_type_source, ContentTypeSource};
pub use url::{build_url, canonicalize_query, encode_pairs};
