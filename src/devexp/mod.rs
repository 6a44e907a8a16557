//! Developer Experience features
//!
//! - **Curl Generation**: render a stored request as an equivalent curl command
//!
//! ```bash
//! reqbook run -c users-api -r get-user --offline
//!
//! # Output:
//! # curl -X GET 'https://api.example.com/v1/users?id=7'
//! ```

pub mod curl;

pub use curl::{format_curl_pretty, generate_curl_command};
