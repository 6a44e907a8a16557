//! reqbook library interface
//!
//! Keeps reusable HTTP request descriptors in named collections on disk, edits
//! them interactively, and either sends them or renders them as curl commands.
//!
//! # Module Organization
//!
//! - [`models`] - Request descriptor and its on-disk format
//! - [`body`] - Picks the single active body of a descriptor
//! - [`request`] - HTTP request synthesis
//! - [`devexp`] - Curl command synthesis
//! - [`store`] - Collections on disk
//! - [`workflow`] - Guided creation and the edit/merge workflow
//! - [`errors`] - Error types (ReqbookError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod body;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod devexp;
pub mod errors;
pub mod http;
pub mod models;
pub mod output;
pub mod prompts;
pub mod request;
pub mod status;
pub mod store;
pub mod uploads;
pub mod workflow;

pub use errors::{ReqbookError, Result};
pub use models::RequestDescriptor;
pub use status::ExitStatus;
