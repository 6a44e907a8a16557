//! Multipart form data handling
//!
//! File parts are streamed from disk with a known length, so large uploads are
//! never loaded into memory.

use reqwest::blocking::multipart::{Form, Part};
use std::fs::File;
use std::path::Path;

use crate::body::{PartValue, ResolvedPart};
use crate::errors::{ReqbookError, Result};

/// Build a multipart form from resolved parts, in stored order
pub fn build_multipart_form(parts: &[ResolvedPart]) -> Result<Form> {
    let mut form = Form::new();

    for part in parts {
        form = match &part.value {
            PartValue::Text(text) => form.text(part.key.clone(), text.clone()),
            PartValue::File(path) => form.part(part.key.clone(), create_file_part(path)?),
        };
    }

    Ok(form)
}

/// Create a streaming file part; a missing file is `FileNotFound`
fn create_file_part(path: &Path) -> Result<Part> {
    let file = File::open(path).map_err(|e| ReqbookError::from_io(e, path))?;
    let length = file.metadata().map_err(|e| ReqbookError::from_io(e, path))?.len();

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "file".to_string());

    let part = Part::reader_with_length(file, length)
        .file_name(filename)
        .mime_str(&guess_mime_type(path))?;

    Ok(part)
}

/// Content type of a file part, from its extension
fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}
