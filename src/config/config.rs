//! Config file handling

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ReqbookError, Result};

/// Overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "REQBOOK_CONFIG_DIR";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

const DEFAULT_EDITOR: &str = "vim";

/// reqbook configuration
///
/// Built once at startup and passed to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub editor: String,
    pub collection_directory: PathBuf,
    pub temporary_files_directory: PathBuf,
    pub always_edit_body: bool,
    pub always_edit_domain: bool,
    pub always_edit_path: bool,
    pub always_edit_query_params: bool,
    pub always_edit_headers: bool,
    pub always_edit_method: bool,
    pub always_edit_content_type: bool,
    pub always_edit_all: bool,
}

impl AppConfig {
    /// Defaults with both directories inside `config_dir`
    pub fn defaults_in(config_dir: &Path, editor: Option<String>) -> Self {
        Self {
            editor: editor
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            collection_directory: config_dir.join("collections"),
            temporary_files_directory: config_dir.join("tmp"),
            always_edit_body: true,
            ..Self::default()
        }
    }

    /// Load configuration
    ///
    /// An explicit file must exist. Otherwise `config.yaml` in the config
    /// directory is used, written with defaults on first use.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                let base = path.parent().unwrap_or(Path::new("."));
                let config = Self::read(path, base)?;
                config.ensure_directories()?;
                Ok(config)
            }
            None => Self::load_or_init(&Self::default_config_dir()),
        }
    }

    /// Load `config.yaml` from `config_dir`, creating it with defaults when absent
    pub fn load_or_init(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join(CONFIG_FILE_NAME);

        let config = if config_file.exists() {
            Self::read(&config_file, config_dir)?
        } else {
            let config = Self::defaults_in(config_dir, std::env::var("EDITOR").ok());
            config.write(&config_file)?;
            info!(path = %config_file.display(), "Created default configuration");
            config
        };

        config.ensure_directories()?;
        Ok(config)
    }

    fn read(path: &Path, base: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration");

        let content = fs::read_to_string(path)
            .map_err(|e| ReqbookError::Config(format!("Failed to read config {}: {}", path.display(), e)))?;

        let mut config: AppConfig = if content.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| ReqbookError::Config(format!("Invalid config YAML in {}: {}", path.display(), e)))?
        };

        config.fill_missing(base);
        Ok(config)
    }

    /// Give empty keys their defaults relative to `base`
    fn fill_missing(&mut self, base: &Path) {
        let defaults = Self::defaults_in(base, std::env::var("EDITOR").ok());

        if self.editor.trim().is_empty() {
            self.editor = defaults.editor;
        }
        if self.collection_directory.as_os_str().is_empty() {
            self.collection_directory = defaults.collection_directory;
        }
        if self.temporary_files_directory.as_os_str().is_empty() {
            self.temporary_files_directory = defaults.temporary_files_directory;
        }
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ReqbookError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| ReqbookError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| ReqbookError::Config(format!("Failed to write config {}: {}", path.display(), e)))
    }

    fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.collection_directory, &self.temporary_files_directory] {
            fs::create_dir_all(dir)
                .map_err(|e| ReqbookError::Config(format!("Failed to create {}: {}", dir.display(), e)))?;
        }
        Ok(())
    }

    /// Get the default config directory
    pub fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        dirs::config_dir()
            .map(|p| p.join("reqbook"))
            .unwrap_or_else(|| PathBuf::from(".reqbook"))
    }
}
