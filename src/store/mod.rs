//! Descriptor storage
//!
//! Collections are directories under a root, each request one pretty-printed
//! JSON file: `<root>/<collection>/<name>.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sanitize_filename::Options as SanitizeOptions;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{ReqbookError, Result};
use crate::models::RequestDescriptor;

const DESCRIPTOR_EXTENSION: &str = "json";

/// Where the edit and create workflows hand finished descriptors
pub trait DescriptorSink {
    fn persist(&mut self, descriptor: &RequestDescriptor) -> Result<()>;
}

/// Filesystem-backed collection store
#[derive(Debug, Clone)]
pub struct CollectionStore {
    root: PathBuf,
}

impl CollectionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    pub fn descriptor_path(&self, collection: &str, name: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", name, DESCRIPTOR_EXTENSION))
    }

    /// Collection names, sorted
    pub fn list_collections(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| ReqbookError::from_io(e, &self.root))? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Request names of one collection, or `collection/name` across all of them
    pub fn list_requests(&self, collection: Option<&str>) -> Result<Vec<String>> {
        match collection {
            Some(collection) => {
                check_name("collection", collection)?;
                self.requests_in(collection)
            }
            None => {
                let mut all = Vec::new();
                for collection in self.list_collections()? {
                    all.extend(
                        self.requests_in(&collection)?
                            .into_iter()
                            .map(|name| format!("{}/{}", collection, name)),
                    );
                }
                Ok(all)
            }
        }
    }

    fn requests_in(&self, collection: &str) -> Result<Vec<String>> {
        let dir = self.collection_dir(collection);
        let mut names = Vec::new();

        for entry in fs::read_dir(&dir).map_err(|e| ReqbookError::from_io(e, &dir))? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(DESCRIPTOR_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Create the collection directory if it does not exist
    pub fn ensure_collection(&self, collection: &str) -> Result<PathBuf> {
        check_name("collection", collection)?;
        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load and normalize one descriptor
    pub fn load(&self, collection: &str, name: &str) -> Result<RequestDescriptor> {
        check_name("collection", collection)?;
        check_name("request", name)?;

        let path = self.descriptor_path(collection, name);
        debug!(path = %path.display(), "Loading request descriptor");

        let content = fs::read_to_string(&path).map_err(|e| ReqbookError::from_io(e, &path))?;
        let mut descriptor = RequestDescriptor::from_json(&content)?;
        descriptor.normalize();
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Validate and atomically write a descriptor
    ///
    /// Writes a temp file in the collection directory and renames it over the
    /// target, so a failed save leaves the previous file untouched.
    pub fn save(&self, descriptor: &RequestDescriptor) -> Result<PathBuf> {
        descriptor.validate()?;
        check_name("request", &descriptor.name)?;

        let dir = self.ensure_collection(&descriptor.collection)?;
        let path = self.descriptor_path(&descriptor.collection, &descriptor.name);

        let mut content = descriptor.to_pretty_json()?;
        content.push('\n');

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&path).map_err(|e| ReqbookError::Io(e.error))?;

        debug!(path = %path.display(), "Saved request descriptor");
        Ok(path)
    }

    pub fn remove(&self, collection: &str, name: &str) -> Result<()> {
        check_name("collection", collection)?;
        check_name("request", name)?;

        let path = self.descriptor_path(collection, name);
        fs::remove_file(&path).map_err(|e| ReqbookError::from_io(e, &path))
    }

    pub fn remove_collection(&self, collection: &str) -> Result<()> {
        check_name("collection", collection)?;

        let dir = self.collection_dir(collection);
        fs::remove_dir_all(&dir).map_err(|e| ReqbookError::from_io(e, &dir))
    }
}

impl DescriptorSink for CollectionStore {
    fn persist(&mut self, descriptor: &RequestDescriptor) -> Result<()> {
        self.save(descriptor).map(|_| ())
    }
}

/// Reject names that are empty or would not survive as a file name
fn check_name(kind: &str, name: &str) -> Result<()> {
    let sanitized = sanitize_filename::sanitize_with_options(name, SanitizeOptions {
        replacement: "_",
        windows: true,
        truncate: true,
    });

    if name.trim().is_empty() || sanitized != name {
        return Err(ReqbookError::MalformedDescriptor(format!(
            "{} name {:?} is not a valid file name",
            kind, name
        )));
    }

    Ok(())
}
