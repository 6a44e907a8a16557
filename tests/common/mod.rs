//! Common test utilities for reqbook integration tests
//!
//! Every test gets its own configuration directory so collections never leak
//! between tests or into the user's real configuration.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// A host that should never be resolved (for offline tests)
pub const DUMMY_DOMAIN: &str = "http://this-should.never-resolve";

/// Exit status codes matching the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
}

impl CliResponse {
    /// Check if stdout contains a substring
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }

    /// Non-empty stdout lines
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().filter(|l| !l.trim().is_empty()).collect()
    }
}

/// An isolated configuration directory with its own collections
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// Config with every `alwaysEdit*` switch off so runs never open an editor
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = format!(
            "editor: \"true\"\n\
             collectionDirectory: {}\n\
             temporaryFilesDirectory: {}\n\
             alwaysEditBody: false\n\
             alwaysEditDomain: false\n\
             alwaysEditPath: false\n\
             alwaysEditQueryParams: false\n\
             alwaysEditHeaders: false\n\
             alwaysEditMethod: false\n\
             alwaysEditContentType: false\n\
             alwaysEditAll: false\n",
            dir.path().join("collections").display(),
            dir.path().join("tmp").display(),
        );
        std::fs::write(dir.path().join("config.yaml"), config).expect("Failed to write config");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn collections(&self) -> PathBuf {
        self.dir.path().join("collections")
    }

    pub fn descriptor_path(&self, collection: &str, request: &str) -> PathBuf {
        self.collections().join(collection).join(format!("{}.json", request))
    }

    /// Store a descriptor document as-is
    pub fn add_request(&self, collection: &str, request: &str, document: serde_json::Value) -> PathBuf {
        let path = self.descriptor_path(collection, request);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create collection");
        let text = serde_json::to_string_pretty(&document).unwrap();
        std::fs::write(&path, text).expect("Failed to write descriptor");
        path
    }

    /// Store a descriptor built from the common fields
    pub fn add_simple(
        &self,
        collection: &str,
        request: &str,
        method: &str,
        domain: &str,
        path: &str,
        extra: serde_json::Value,
    ) -> PathBuf {
        let mut document = serde_json::json!({
            "collection": collection,
            "request_name": request,
            "method": method,
            "domain": domain,
            "path": path,
        });
        if let (Some(doc), Some(extra)) = (document.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                doc.insert(k.clone(), v.clone());
            }
        }
        self.add_request(collection, request, document)
    }

    /// Command for the reqbook binary pointed at this environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_reqbook"));
        cmd.env("REQBOOK_CONFIG_DIR", self.dir.path())
            .env_remove("REQBOOK_LOG")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null());
        cmd
    }

    /// Run reqbook with the given arguments
    pub fn run(&self, args: &[&str]) -> CliResponse {
        let output = self.command().args(args).output().expect("Failed to execute reqbook");
        CliResponse {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_status: ExitStatus::from(output.status.code().unwrap_or(1)),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
