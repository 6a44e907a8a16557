//! Core data types and type aliases
//!
//! # Why IndexMap?
//!
//! We use [`IndexMap`] for all user-facing dictionaries so a descriptor file keeps
//! the order the user wrote it in. Synthesis never depends on that order: query
//! strings and form bodies are re-encoded canonically on use.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// TYPE ALIASES
// =============================================================================

/// Query parameters dictionary
pub type QueryParamsDict = IndexMap<String, String>;

/// Headers dictionary - one value per header name, never a `Content-Type` entry
pub type HeadersDict = IndexMap<String, String>;

/// Form fields dictionary (for `application/x-www-form-urlencoded` bodies)
pub type FormFieldsDict = IndexMap<String, String>;

/// Header name owned by [`ContentType`] rather than by [`HeadersDict`]
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Deserialize a JSON `null` as the type's default value
///
/// Descriptor files written by older tools store empty maps as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// CONTENT TYPE
// =============================================================================

/// The content type stored on a descriptor
///
/// Five values are recognized and steer guided body prompts; anything else is kept
/// verbatim as [`ContentType::Custom`]. The content type is advisory: the active
/// body is always chosen by [`crate::body::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    /// No content type; no `Content-Type` header is sent
    #[default]
    Unset,
    Json,
    Xml,
    OctetStream,
    MultipartFormData,
    FormUrlEncoded,
    Custom(String),
}

impl ContentType {
    pub const JSON: &'static str = "application/json";
    pub const XML: &'static str = "application/xml";
    pub const OCTET_STREAM: &'static str = "application/octet-stream";
    pub const MULTIPART_FORM_DATA: &'static str = "multipart/form-data";
    pub const FORM_URL_ENCODED: &'static str = "application/x-www-form-urlencoded";

    /// The recognized content types, in the order they are offered for selection
    pub const RECOGNIZED: [ContentType; 5] = [
        ContentType::Json,
        ContentType::Xml,
        ContentType::OctetStream,
        ContentType::MultipartFormData,
        ContentType::FormUrlEncoded,
    ];

    /// Parse a stored value, trimming surrounding whitespace
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return ContentType::Unset;
        }

        Self::RECOGNIZED
            .iter()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(value))
            .cloned()
            .unwrap_or_else(|| ContentType::Custom(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Unset => "",
            ContentType::Json => Self::JSON,
            ContentType::Xml => Self::XML,
            ContentType::OctetStream => Self::OCTET_STREAM,
            ContentType::MultipartFormData => Self::MULTIPART_FORM_DATA,
            ContentType::FormUrlEncoded => Self::FORM_URL_ENCODED,
            ContentType::Custom(value) => value,
        }
    }

    /// Whether this is one of the five recognized values
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ContentType::Unset | ContentType::Custom(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ContentType::Unset)
    }

    /// File extension for editing a raw body of this type
    pub fn editor_extension(&self) -> &'static str {
        match self {
            ContentType::Json => ".json",
            ContentType::Xml => ".xml",
            _ => ".txt",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        ContentType::parse(&value)
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        ContentType::parse(value)
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Custom(custom) => custom,
            other => other.as_str().to_string(),
        }
    }
}
