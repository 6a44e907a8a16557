//! Error types for reqbook

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reqbook
#[derive(Error, Debug)]
pub enum ReqbookError {
    #[error("Malformed request descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("Malformed edit: {0}")]
    MalformedEdit(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("{0}")]
    Argument(String),
}

impl ReqbookError {
    /// Map an IO error on `path`, turning `NotFound` into [`ReqbookError::FileNotFound`]
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ReqbookError::FileNotFound(path.into())
        } else {
            ReqbookError::Io(err)
        }
    }
}

impl From<dialoguer::Error> for ReqbookError {
    fn from(err: dialoguer::Error) -> Self {
        ReqbookError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReqbookError>;
