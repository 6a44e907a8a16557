//! Request descriptor: one stored, reusable HTTP request
//!
//! The serialized form is the on-disk descriptor file format:
//!
//! ```json
//! {
//!   "collection": "users-api",
//!   "request_name": "get-user",
//!   "domain": "https://api.example.com/",
//!   "path": "/v1/users/",
//!   "method": "GET",
//!   "query_params": {"id": "7"},
//!   "headers": {"X-Trace": "1"},
//!   "content_type": "",
//!   "body": {
//!     "raw_body": null,
//!     "binary_file_body": null,
//!     "multipart_body": null,
//!     "form_url_encoded": null
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::types::{null_as_default, ContentType, FormFieldsDict, HeadersDict, QueryParamsDict, CONTENT_TYPE_HEADER};
use crate::errors::{ReqbookError, Result};
use crate::http::HttpMethod;

/// One part of a multipart body
///
/// A part carries either a text value or a file path. Hand-edited files may set
/// both; the text value wins (see [`crate::body::resolve`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartPart {
    pub key: String,
    #[serde(default)]
    pub plain_text_value: Option<String>,
    #[serde(default)]
    pub binary_file_path_value: Option<PathBuf>,
}

impl MultipartPart {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            plain_text_value: Some(value.into()),
            binary_file_path_value: None,
        }
    }

    pub fn file(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            plain_text_value: None,
            binary_file_path_value: Some(path.into()),
        }
    }
}

/// The stored body fields of a descriptor
///
/// Under normal construction at most one field is set. `None` means absent and is
/// distinct from an empty value: `Some("")` is a populated raw body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    #[serde(default)]
    pub raw_body: Option<String>,
    #[serde(default)]
    pub binary_file_body: Option<PathBuf>,
    #[serde(default)]
    pub multipart_body: Option<Vec<MultipartPart>>,
    #[serde(default)]
    pub form_url_encoded: Option<FormFieldsDict>,
}

impl BodyDescriptor {
    pub fn raw(text: impl Into<String>) -> Self {
        Self { raw_body: Some(text.into()), ..Self::default() }
    }

    pub fn binary_file(path: impl Into<PathBuf>) -> Self {
        Self { binary_file_body: Some(path.into()), ..Self::default() }
    }

    pub fn multipart(parts: Vec<MultipartPart>) -> Self {
        Self { multipart_body: Some(parts), ..Self::default() }
    }

    pub fn form(fields: FormFieldsDict) -> Self {
        Self { form_url_encoded: Some(fields), ..Self::default() }
    }

    /// Whether no body field is set at all
    pub fn is_absent(&self) -> bool {
        self.raw_body.is_none()
            && self.binary_file_body.is_none()
            && self.multipart_body.is_none()
            && self.form_url_encoded.is_none()
    }
}

/// A stored HTTP request definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Name of the owning collection (a directory under the collections root)
    pub collection: String,
    #[serde(rename = "request_name")]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: String,
    /// Kept as written so hand-edited files load; checked by [`Self::validate`]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_params: QueryParamsDict,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HeadersDict,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: ContentType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: BodyDescriptor,
}

impl RequestDescriptor {
    pub fn new(collection: impl Into<String>, name: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            collection: collection.into(),
            name: name.into(),
            domain: String::new(),
            path: String::new(),
            method: method.as_str().to_string(),
            query_params: QueryParamsDict::new(),
            headers: HeadersDict::new(),
            content_type: ContentType::Unset,
            body: BodyDescriptor::default(),
        }
    }

    /// Domain with surrounding whitespace and `/` separators stripped
    pub fn trimmed_domain(&self) -> &str {
        self.domain.trim().trim_matches('/')
    }

    /// Path with surrounding whitespace and `/` separators stripped
    pub fn trimmed_path(&self) -> &str {
        self.path.trim().trim_matches('/')
    }

    /// Query parameters with whitespace trimmed from keys and values
    pub fn trimmed_query_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query_params.iter().map(|(k, v)| (k.trim(), v.trim()))
    }

    /// The parsed method, or `MalformedDescriptor`
    pub fn http_method(&self) -> Result<HttpMethod> {
        self.method.parse()
    }

    /// The name of a `Content-Type` entry in `headers`, if one sneaked in
    pub fn content_type_header(&self) -> Option<&str> {
        self.headers
            .keys()
            .map(String::as_str)
            .find(|k| k.trim().eq_ignore_ascii_case(CONTENT_TYPE_HEADER))
    }

    /// A header key that repeats an earlier one when case is ignored
    fn duplicate_header(&self) -> Option<&str> {
        let keys: Vec<&str> = self.headers.keys().map(|k| k.trim()).collect();
        keys.iter()
            .enumerate()
            .find(|(i, key)| keys[..*i].iter().any(|earlier| earlier.eq_ignore_ascii_case(key)))
            .map(|(_, key)| *key)
    }

    /// Check the descriptor invariants
    pub fn validate(&self) -> Result<()> {
        self.http_method()?;

        if let Some(key) = self.content_type_header() {
            return Err(ReqbookError::MalformedDescriptor(format!(
                "headers must not carry {:?}; set the content type instead",
                key
            )));
        }

        if let Some(key) = self.duplicate_header() {
            return Err(ReqbookError::MalformedDescriptor(format!(
                "header {:?} is given more than once (names are case-insensitive)",
                key
            )));
        }

        if self.name.trim().is_empty() {
            return Err(ReqbookError::MalformedDescriptor("request name is empty".to_string()));
        }

        if self.collection.trim().is_empty() {
            return Err(ReqbookError::MalformedDescriptor("collection is empty".to_string()));
        }

        Ok(())
    }

    /// Canonicalize fields in place
    ///
    /// Upper-cases a recognized method, trims query keys/values and the content
    /// type. Domain and path are stored as written and trimmed on use.
    pub fn normalize(&mut self) {
        if let Ok(method) = self.http_method() {
            self.method = method.as_str().to_string();
        }

        self.query_params = self
            .query_params
            .iter()
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();

        self.content_type = ContentType::parse(self.content_type.as_str());
    }

    /// Parse a descriptor document
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to the pretty-printed on-disk format
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    fn sample() -> RequestDescriptor {
        let mut d = RequestDescriptor::new("users-api", "get-user", HttpMethod::Get);
        d.domain = "https://api.example.com/".to_string();
        d.path = "/v1/users/".to_string();
        d.query_params = indexmap! { "id".to_string() => "7".to_string() };
        d
    }

    #[test]
    fn test_trimmed_domain_and_path() {
        let d = sample();
        assert_eq!(d.trimmed_domain(), "https://api.example.com");
        assert_eq!(d.trimmed_path(), "v1/users");
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_method() {
        let mut d = sample();
        d.method = "FETCH".to_string();
        assert!(matches!(d.validate(), Err(ReqbookError::MalformedDescriptor(_))));
    }

    #[test]
    fn test_validate_rejects_content_type_header() {
        let mut d = sample();
        d.headers.insert("content-type".to_string(), "text/plain".to_string());
        let err = d.validate().unwrap_err();
        assert!(matches!(err, ReqbookError::MalformedDescriptor(_)));
        assert!(err.to_string().contains("content-type"));
    }

    #[test]
    fn test_validate_rejects_headers_differing_only_by_case() {
        let mut d = sample();
        d.headers = indexmap! {
            "X-A".to_string() => "1".to_string(),
            "x-a".to_string() => "2".to_string(),
        };
        let err = d.validate().unwrap_err();
        assert!(matches!(err, ReqbookError::MalformedDescriptor(_)));
        assert!(err.to_string().contains("\"x-a\""));

        d.headers = indexmap! {
            "X-A".to_string() => "1".to_string(),
            "X-B".to_string() => "2".to_string(),
        };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_normalize() {
        let mut d = sample();
        d.method = "post".to_string();
        d.query_params = indexmap! { " q ".to_string() => " rust lang ".to_string() };
        d.content_type = ContentType::Custom(" text/csv ".to_string());
        d.normalize();

        assert_eq!(d.method, "POST");
        assert_eq!(d.query_params.get("q").map(String::as_str), Some("rust lang"));
        assert_eq!(d.content_type.as_str(), "text/csv");
    }

    #[test]
    fn test_round_trip_preserves_absent_vs_empty() {
        let mut d = sample();
        d.body = BodyDescriptor {
            raw_body: Some(String::new()),
            binary_file_body: None,
            multipart_body: Some(Vec::new()),
            form_url_encoded: None,
        };

        let parsed = RequestDescriptor::from_json(&d.to_pretty_json().unwrap()).unwrap();
        assert_eq!(parsed, d);
        assert_eq!(parsed.body.raw_body.as_deref(), Some(""));
        assert_eq!(parsed.body.multipart_body, Some(Vec::new()));
        assert!(parsed.body.form_url_encoded.is_none());
    }

    #[test]
    fn test_round_trip_multipart_parts() {
        let mut d = sample();
        d.method = "POST".to_string();
        d.content_type = ContentType::MultipartFormData;
        d.body = BodyDescriptor::multipart(vec![
            MultipartPart::text("name", "avatar"),
            MultipartPart::file("file", "/tmp/avatar.png"),
        ]);

        let parsed = RequestDescriptor::from_json(&d.to_pretty_json().unwrap()).unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn test_loads_file_with_null_maps() {
        let text = r#"{
            "collection": "c",
            "request_name": "r",
            "domain": "http://localhost:8080",
            "path": "",
            "method": "GET",
            "query_params": null,
            "headers": null,
            "content_type": "",
            "body": {"raw_body": null, "binary_file_body": null, "multipart_body": null, "form_url_encoded": null}
        }"#;

        let d = RequestDescriptor::from_json(text).unwrap();
        assert!(d.query_params.is_empty());
        assert!(d.headers.is_empty());
        assert!(d.content_type.is_unset());
        assert!(d.body.is_absent());
    }

    #[test]
    fn test_loads_file_with_null_content_type() {
        let text = r#"{
            "collection": "c",
            "request_name": "r",
            "domain": "http://localhost:8080",
            "method": "POST",
            "content_type": null,
            "body": {"raw_body": "hello"}
        }"#;

        let d = RequestDescriptor::from_json(text).unwrap();
        assert!(d.content_type.is_unset());
        assert_eq!(d.body.raw_body.as_deref(), Some("hello"));
    }

    #[test]
    fn test_serialized_field_names() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_pretty_json().unwrap()).unwrap();
        assert_eq!(value["request_name"], "get-user");
        assert_eq!(value["content_type"], "");
        assert!(value["body"]["raw_body"].is_null());
        assert!(value["body"]["form_url_encoded"].is_null());
    }
}
