//! Curl command generation
//!
//! Renders a stored request as an equivalent curl command line for sharing
//! and debugging. Uses the same resolved body and content-type rule as the
//! HTTP synthesizer, so the preview describes exactly what `run` sends.

use crate::body::{PartValue, ResolvedBody};
use crate::errors::Result;
use crate::models::{ContentType, RequestDescriptor, CONTENT_TYPE_HEADER};
use crate::request::{build_url, content_type_source, encode_pairs, ContentTypeSource};

/// Generate an equivalent curl command for `descriptor` sent with `body`
///
/// Fails only when the method or URL is malformed. Referenced files are not
/// opened, so a missing binary file still renders as `--data-binary @<path>`.
pub fn generate_curl_command(descriptor: &RequestDescriptor, body: &ResolvedBody) -> Result<String> {
    let method = descriptor.http_method()?;
    let url = build_url(descriptor)?;

    let mut parts: Vec<String> = vec!["curl".to_string(), "-X".to_string(), method.to_string(), quote(url.as_str())];

    match content_type_source(descriptor, body) {
        ContentTypeSource::Stored(value) => {
            parts.push("-H".to_string());
            parts.push(quote(&format!("{}: {}", CONTENT_TYPE_HEADER, value)));
        }
        ContentTypeSource::FormUrlEncoded => {
            parts.push("-H".to_string());
            parts.push(quote(&format!("{}: {}", CONTENT_TYPE_HEADER, ContentType::FORM_URL_ENCODED)));
        }
        // curl adds a form content type to -d style data unless it is cleared
        ContentTypeSource::Absent if matches!(body, ResolvedBody::Raw(_) | ResolvedBody::BinaryFile(_)) => {
            parts.push("-H".to_string());
            parts.push(quote(&format!("{}:", CONTENT_TYPE_HEADER)));
        }
        // -F generates its own boundary header
        ContentTypeSource::MultipartBoundary | ContentTypeSource::Absent => {}
    }

    for (name, value) in &descriptor.headers {
        parts.push("-H".to_string());
        parts.push(quote(&format!("{}: {}", name.trim(), value)));
    }

    match body {
        ResolvedBody::None => {}
        ResolvedBody::Raw(text) => {
            parts.push("--data-raw".to_string());
            parts.push(quote(text));
        }
        ResolvedBody::BinaryFile(path) => {
            parts.push("--data-binary".to_string());
            parts.push(format!("@{}", path.display()));
        }
        ResolvedBody::Multipart(form_parts) => {
            for part in form_parts {
                match &part.value {
                    PartValue::Text(text) => {
                        parts.push("--form-string".to_string());
                        parts.push(quote(&format!("{}={}", part.key, text)));
                    }
                    PartValue::File(path) => {
                        parts.push("-F".to_string());
                        parts.push(quote(&format!("{}=@{}", part.key, path.display())));
                    }
                }
            }
        }
        ResolvedBody::FormEncoded(fields) => {
            parts.push("-d".to_string());
            parts.push(quote(&encode_pairs(fields)));
        }
    }

    Ok(parts.join(" "))
}

/// Wrap a value in single quotes, closing and reopening around embedded quotes
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

/// Format curl command with syntax highlighting for terminal
pub fn format_curl_pretty(cmd: &str) -> String {
    let mut result = String::new();
    let mut in_string = false;
    let mut chars = cmd.chars().peekable();

    if let Some(rest) = cmd.strip_prefix("curl") {
        result.push_str("\x1b[1;33mcurl\x1b[0m");
        chars = rest.chars().peekable();
    }

    while let Some(c) = chars.next() {
        if c == '\'' {
            if in_string {
                result.push_str("'\x1b[0m");
            } else {
                result.push_str("\x1b[32m'");
            }
            in_string = !in_string;
        } else if !in_string && c == '-' && result.ends_with(' ') {
            // A flag: highlight up to the next non-flag character
            result.push_str("\x1b[36m-");
            while let Some(&next) = chars.peek() {
                if next.is_alphanumeric() || next == '-' {
                    result.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            result.push_str("\x1b[0m");
        } else {
            result.push(c);
        }
    }

    result
}
