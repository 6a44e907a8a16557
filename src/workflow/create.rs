//! Guided request creation
//!
//! The prompts here are also reused by the edit workflow for single fields.

use tracing::debug;

use crate::errors::Result;
use crate::http::HttpMethod;
use crate::models::{BodyDescriptor, ContentType, MultipartPart, RequestDescriptor, CONTENT_TYPE_HEADER};
use crate::prompts::{prompt_while_confirm, select_with_add, Prompter};

const BINARY_FILE_PART: &str = "Binary File";
const PLAIN_TEXT_PART: &str = "Plain Text";
const FILE_PATH_PROMPT: &str = "Path to file (full path)";

/// Ask for every field of a new request
///
/// `collections` are the existing collection names offered first.
pub fn prompt_new_request(prompter: &mut dyn Prompter, collections: &[String]) -> Result<RequestDescriptor> {
    let collection = select_with_add(
        prompter,
        "Choose one of your collections",
        collections,
        "Create new collection",
    )?;
    let name = prompter.input("Request name")?;

    let mut descriptor = RequestDescriptor::new(collection.trim(), name.trim(), HttpMethod::Get);
    descriptor.domain = prompter.input("Domain")?;
    descriptor.path = prompter.input("Path")?;
    descriptor.method = prompt_method(prompter, None)?.as_str().to_string();

    descriptor.query_params = prompt_while_confirm(
        prompter,
        "Do you want to add a query parameter?",
        "Query parameter key",
        "Query parameter value",
        &|_| None,
    )?;
    descriptor.headers = prompt_while_confirm(
        prompter,
        "Do you want to add a header?",
        "Header key (don't add Content-Type)",
        "Header value",
        &refuse_content_type_header,
    )?;

    descriptor.content_type = prompt_content_type(prompter)?;

    if prompter.confirm("Do you want your request to have a body?", false)? {
        descriptor.body = prompt_body(prompter, &descriptor.content_type)?;
    }

    debug!(collection = %descriptor.collection, request = %descriptor.name, "Request prompted");
    Ok(descriptor)
}

/// Pick one of the nine methods, starting at `current`
pub fn prompt_method(prompter: &mut dyn Prompter, current: Option<HttpMethod>) -> Result<HttpMethod> {
    let names: Vec<String> = HttpMethod::ALL.iter().map(|m| m.as_str().to_string()).collect();
    let default = current.map(|m| m.index()).unwrap_or(0);
    let index = prompter.select("Method", &names, default)?;
    Ok(HttpMethod::ALL[index])
}

/// Pick a recognized content type or enter a custom one
pub fn prompt_content_type(prompter: &mut dyn Prompter) -> Result<ContentType> {
    let names: Vec<String> = ContentType::RECOGNIZED.iter().map(|c| c.as_str().to_string()).collect();
    let value = select_with_add(prompter, "Content-Type", &names, "Other")?;
    Ok(ContentType::parse(&value))
}

/// Ask for a body shaped by `content_type`
///
/// Returns an absent body when the user declines every offered kind.
pub fn prompt_body(prompter: &mut dyn Prompter, content_type: &ContentType) -> Result<BodyDescriptor> {
    let body = match content_type {
        ContentType::Json | ContentType::Xml => BodyDescriptor::raw(prompter.edit_text("", content_type.editor_extension())?),
        ContentType::OctetStream => BodyDescriptor::binary_file(prompter.input(FILE_PATH_PROMPT)?.trim()),
        ContentType::MultipartFormData => BodyDescriptor::multipart(prompt_multipart_parts(prompter)?),
        ContentType::FormUrlEncoded => BodyDescriptor::form(prompt_while_confirm(
            prompter,
            "Do you want to add a parameter?",
            "Parameter key",
            "Parameter value",
            &|_| None,
        )?),
        ContentType::Custom(_) | ContentType::Unset => {
            if prompter.confirm("Do you want to add raw body to your request?", false)? {
                BodyDescriptor::raw(prompter.edit_text("", content_type.editor_extension())?)
            } else if prompter.confirm("Do you want to add binary body to your request?", false)? {
                BodyDescriptor::binary_file(prompter.input(FILE_PATH_PROMPT)?.trim())
            } else {
                BodyDescriptor::default()
            }
        }
    };

    Ok(body)
}

fn prompt_multipart_parts(prompter: &mut dyn Prompter) -> Result<Vec<MultipartPart>> {
    let kinds = [BINARY_FILE_PART.to_string(), PLAIN_TEXT_PART.to_string()];
    let mut parts = Vec::new();

    while prompter.confirm("Do you want to add parts?", false)? {
        let key = prompter.input("What is the key for this part?")?.trim().to_string();

        let part = if prompter.select("Binary file or plain text value?", &kinds, 0)? == 0 {
            MultipartPart::file(key, prompter.input(FILE_PATH_PROMPT)?.trim())
        } else {
            MultipartPart::text(key, prompter.edit_text("", ".txt")?)
        };
        parts.push(part);
    }

    Ok(parts)
}

/// Header keys must not carry the content type; it has its own step
pub(crate) fn refuse_content_type_header(key: &str) -> Option<String> {
    key.trim()
        .eq_ignore_ascii_case(CONTENT_TYPE_HEADER)
        .then(|| format!("{} is set in the content type step", CONTENT_TYPE_HEADER))
}
