//! Application configuration

mod config;

pub use config::{AppConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME};
