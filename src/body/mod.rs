//! Body resolution
//!
//! A descriptor stores four mutually exclusive body fields, but a hand-edited file
//! can set several at once. [`resolve`] picks exactly one active body by fixed
//! precedence, so the HTTP and curl synthesizers always agree on what is sent:
//!
//! 1. raw body (an empty string still counts)
//! 2. binary file body
//! 3. multipart parts (when at least one part has a value)
//! 4. form fields (when non-empty)
//!
//! The stored content type plays no part in the choice.

use std::path::PathBuf;

use crate::models::{FormFieldsDict, MultipartPart, RequestDescriptor};

/// Value of one resolved multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(PathBuf),
}

/// A multipart part with exactly one value kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPart {
    pub key: String,
    pub value: PartValue,
}

impl ResolvedPart {
    /// Resolve a stored part; text wins over a file path, no value drops the part
    fn from_stored(part: &MultipartPart) -> Option<Self> {
        let value = match (&part.plain_text_value, &part.binary_file_path_value) {
            (Some(text), _) => PartValue::Text(text.clone()),
            (None, Some(path)) => PartValue::File(path.clone()),
            (None, None) => return None,
        };
        Some(Self { key: part.key.clone(), value })
    }
}

/// The single active body of a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedBody {
    None,
    Raw(String),
    BinaryFile(PathBuf),
    Multipart(Vec<ResolvedPart>),
    FormEncoded(FormFieldsDict),
}

impl ResolvedBody {
    /// Short name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedBody::None => "none",
            ResolvedBody::Raw(_) => "raw",
            ResolvedBody::BinaryFile(_) => "binary-file",
            ResolvedBody::Multipart(_) => "multipart",
            ResolvedBody::FormEncoded(_) => "form-urlencoded",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResolvedBody::None)
    }
}

/// Select the active body of `descriptor`
pub fn resolve(descriptor: &RequestDescriptor) -> ResolvedBody {
    let body = &descriptor.body;

    if let Some(raw) = &body.raw_body {
        return ResolvedBody::Raw(raw.clone());
    }

    if let Some(path) = &body.binary_file_body {
        return ResolvedBody::BinaryFile(path.clone());
    }

    if let Some(parts) = &body.multipart_body {
        let resolved: Vec<ResolvedPart> = parts.iter().filter_map(ResolvedPart::from_stored).collect();
        if !resolved.is_empty() {
            return ResolvedBody::Multipart(resolved);
        }
    }

    if let Some(fields) = &body.form_url_encoded {
        if !fields.is_empty() {
            return ResolvedBody::FormEncoded(fields.clone());
        }
    }

    ResolvedBody::None
}
