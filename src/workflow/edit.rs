//! Edit/merge workflow
//!
//! A loaded descriptor moves `Loaded -> Editing -> Persisted`, or straight to
//! `Abandoned` when no edit is requested. Each requested field is edited on its
//! own, then the whole descriptor is normalized, validated and persisted once.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::create::{prompt_body, prompt_content_type, prompt_method, refuse_content_type_header};
use crate::body::{resolve, ResolvedBody};
use crate::config::AppConfig;
use crate::errors::{ReqbookError, Result};
use crate::models::{FormFieldsDict, HeadersDict, MultipartPart, QueryParamsDict, RequestDescriptor};
use crate::prompts::Prompter;
use crate::store::DescriptorSink;

/// Which fields to edit before running a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditRequest {
    pub body: bool,
    pub domain: bool,
    pub path: bool,
    pub query_params: bool,
    pub headers: bool,
    pub method: bool,
    pub content_type: bool,
    pub all: bool,
}

impl EditRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// OR the flags with the configuration's `alwaysEdit*` switches
    pub fn merged_with_config(self, config: &AppConfig) -> Self {
        Self {
            body: self.body || config.always_edit_body,
            domain: self.domain || config.always_edit_domain,
            path: self.path || config.always_edit_path,
            query_params: self.query_params || config.always_edit_query_params,
            headers: self.headers || config.always_edit_headers,
            method: self.method || config.always_edit_method,
            content_type: self.content_type || config.always_edit_content_type,
            all: self.all || config.always_edit_all,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Loaded,
    Editing,
    Persisted,
    Abandoned,
}

/// Apply the requested edits to `descriptor` and persist it once
///
/// On error nothing is persisted and `descriptor` may hold partial edits.
pub fn apply_edits(
    descriptor: &mut RequestDescriptor,
    edits: &EditRequest,
    prompter: &mut dyn Prompter,
    sink: &mut dyn DescriptorSink,
) -> Result<EditState> {
    let mut state = EditState::Loaded;

    if edits.is_empty() {
        state = transition(state, EditState::Abandoned);
        return Ok(state);
    }
    state = transition(state, EditState::Editing);

    if edits.all {
        *descriptor = edit_all(descriptor, prompter)?;
    } else {
        edit_fields(descriptor, edits, prompter)?;
    }

    descriptor.normalize();
    descriptor.validate()?;
    sink.persist(descriptor)?;

    state = transition(state, EditState::Persisted);
    Ok(state)
}

fn transition(from: EditState, to: EditState) -> EditState {
    debug!(from = ?from, to = ?to, "Edit state");
    to
}

/// Replace the whole descriptor through one document edit
fn edit_all(descriptor: &RequestDescriptor, prompter: &mut dyn Prompter) -> Result<RequestDescriptor> {
    let edited = prompter.edit_text(&descriptor.to_pretty_json()?, ".json")?;
    let replacement = RequestDescriptor::from_json(&edited)
        .map_err(|e| ReqbookError::MalformedEdit(format!("edited request is not a valid descriptor: {}", e)))?;

    if replacement.collection != descriptor.collection || replacement.name != descriptor.name {
        warn!(
            from = %format!("{}/{}", descriptor.collection, descriptor.name),
            to = %format!("{}/{}", replacement.collection, replacement.name),
            "Request renamed by edit; the previous file is kept"
        );
    }

    Ok(replacement)
}

fn edit_fields(descriptor: &mut RequestDescriptor, edits: &EditRequest, prompter: &mut dyn Prompter) -> Result<()> {
    if edits.body {
        edit_body(descriptor, prompter)?;
    }

    if edits.domain {
        descriptor.domain = prompter.input_with_default("Domain", &descriptor.domain)?;
    }

    if edits.path {
        descriptor.path = prompter.input_with_default("Path", &descriptor.path)?;
    }

    if edits.method {
        let current = descriptor.http_method().ok();
        descriptor.method = prompt_method(prompter, current)?.as_str().to_string();
    }

    if edits.content_type {
        descriptor.content_type = prompt_content_type(prompter)?;
    }

    if edits.query_params {
        descriptor.query_params = edit_document::<QueryParamsDict>(prompter, &descriptor.query_params, "query parameters")?;
    }

    if edits.headers {
        let headers = edit_document::<HeadersDict>(prompter, &descriptor.headers, "headers")?;
        if let Some(message) = headers.keys().find_map(|k| refuse_content_type_header(k)) {
            return Err(ReqbookError::MalformedEdit(message));
        }
        descriptor.headers = headers;
    }

    Ok(())
}

/// Edit the active body representation, or prompt for a new body when there is none
fn edit_body(descriptor: &mut RequestDescriptor, prompter: &mut dyn Prompter) -> Result<()> {
    let extension = descriptor.content_type.editor_extension();

    match resolve(descriptor) {
        ResolvedBody::Raw(text) => {
            descriptor.body.raw_body = Some(prompter.edit_text(&text, extension)?);
        }
        ResolvedBody::BinaryFile(path) => {
            let edited = prompter.input_with_default("File Path", &path.display().to_string())?;
            descriptor.body.binary_file_body = Some(edited.trim().into());
        }
        ResolvedBody::Multipart(_) => {
            let stored = descriptor.body.multipart_body.clone().unwrap_or_default();
            let parts = edit_document::<Vec<MultipartPart>>(prompter, &stored, "multipart body")?;
            descriptor.body.multipart_body = Some(parts);
        }
        ResolvedBody::FormEncoded(fields) => {
            let fields = edit_document::<FormFieldsDict>(prompter, &fields, "form body")?;
            descriptor.body.form_url_encoded = Some(fields);
        }
        ResolvedBody::None => {
            debug!(content_type = %descriptor.content_type, "No body to edit, prompting for a new one");
            let body = prompt_body(prompter, &descriptor.content_type)?;
            if !body.is_absent() {
                descriptor.body = body;
            }
        }
    }

    Ok(())
}

/// Round-trip `value` through the editor as pretty JSON
fn edit_document<T>(prompter: &mut dyn Prompter, value: &T, what: &str) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let edited = prompter.edit_text(&serde_json::to_string_pretty(value)?, ".json")?;
    serde_json::from_str(&edited)
        .map_err(|e| ReqbookError::MalformedEdit(format!("edited {} do not parse: {}", what, e)))
}
