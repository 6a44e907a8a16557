//! HTTP request synthesis
//!
//! Turns a descriptor and its resolved body into a ready-to-send
//! [`reqwest::blocking::Request`].

use std::fs::File;

use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use super::url::{build_url, encode_pairs};
use crate::body::ResolvedBody;
use crate::errors::{ReqbookError, Result};
use crate::models::{ContentType, RequestDescriptor};
use crate::uploads::multipart::build_multipart_form;

/// Where the `Content-Type` of a synthesized request comes from
///
/// Shared by the HTTP and curl synthesizers so both apply the same override rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTypeSource<'a> {
    /// Stored content type is unset and the body forces nothing
    Absent,
    /// The descriptor's stored content type
    Stored(&'a str),
    /// `multipart/form-data` with a boundary generated by the encoder
    MultipartBoundary,
    /// Exactly `application/x-www-form-urlencoded`
    FormUrlEncoded,
}

/// Decide the content type for `descriptor` sent with `body`
pub fn content_type_source<'a>(descriptor: &'a RequestDescriptor, body: &ResolvedBody) -> ContentTypeSource<'a> {
    match body {
        ResolvedBody::Multipart(_) => ContentTypeSource::MultipartBoundary,
        ResolvedBody::FormEncoded(_) => ContentTypeSource::FormUrlEncoded,
        _ if descriptor.content_type.is_unset() => ContentTypeSource::Absent,
        _ => ContentTypeSource::Stored(descriptor.content_type.as_str()),
    }
}

/// Convert the descriptor headers, rejecting names or values HTTP cannot carry
fn build_headers(descriptor: &RequestDescriptor) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(descriptor.headers.len());

    for (name, value) in &descriptor.headers {
        let header_name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| ReqbookError::MalformedDescriptor(format!("invalid header name {:?}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ReqbookError::MalformedDescriptor(format!("invalid value for header {:?}: {}", name, e)))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Build the transport request for `descriptor` with its resolved `body`
///
/// Fails without returning a partial request when the method is malformed, the
/// URL does not parse, a header is invalid, or a referenced file cannot be opened.
pub fn build_request(client: &Client, descriptor: &RequestDescriptor, body: &ResolvedBody) -> Result<Request> {
    let method = descriptor.http_method()?;
    let url = build_url(descriptor)?;
    let mut headers = build_headers(descriptor)?;

    match content_type_source(descriptor, body) {
        ContentTypeSource::Stored(value) => {
            let value = HeaderValue::from_str(value)
                .map_err(|e| ReqbookError::MalformedDescriptor(format!("invalid content type {:?}: {}", value, e)))?;
            headers.insert(CONTENT_TYPE, value);
        }
        ContentTypeSource::FormUrlEncoded => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ContentType::FORM_URL_ENCODED));
        }
        // set by `RequestBuilder::multipart` together with the boundary
        ContentTypeSource::MultipartBoundary | ContentTypeSource::Absent => {}
    }

    debug!(method = %method, url = %url, body = body.kind(), "Building HTTP request");

    let mut builder = client.request(method.into(), url).headers(headers);

    builder = match body {
        ResolvedBody::None => builder,
        ResolvedBody::Raw(text) => builder.body(text.clone()),
        ResolvedBody::BinaryFile(path) => {
            let file = File::open(path).map_err(|e| ReqbookError::from_io(e, path))?;
            builder.body(file)
        }
        ResolvedBody::Multipart(parts) => builder.multipart(build_multipart_form(parts)?),
        ResolvedBody::FormEncoded(fields) => builder.body(encode_pairs(fields)),
    };

    Ok(builder.build()?)
}
