//! Target URL and `application/x-www-form-urlencoded` encoding
//!
//! Both synthesizers build the URL here, so the curl preview and the live
//! request always point at the same target.

use std::collections::BTreeMap;

use url::form_urlencoded;
use url::Url;

use crate::errors::Result;
use crate::models::RequestDescriptor;

/// Encode key/value pairs canonically: sorted by key, later duplicates win,
/// `application/x-www-form-urlencoded` escaping (space as `+`)
pub fn encode_pairs<K, V, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let sorted: BTreeMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted.iter())
        .finish()
}

/// Re-encode an existing query string in canonical form
pub fn canonicalize_query(query: &str) -> String {
    encode_pairs(form_urlencoded::parse(query.as_bytes()))
}

/// Build the target URL of a descriptor
///
/// Domain and path are stripped of surrounding `/` and joined with exactly one.
/// Query parameters are trimmed and merged over any query already present in the
/// domain or path, then the whole query is encoded canonically.
pub fn build_url(descriptor: &RequestDescriptor) -> Result<Url> {
    let domain = descriptor.trimmed_domain();
    let path = descriptor.trimmed_path();

    let base = if path.is_empty() {
        domain.to_string()
    } else {
        format!("{}/{}", domain, path)
    };

    let mut url = Url::parse(&base)?;

    let mut pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
    for (key, value) in descriptor.trimmed_query_params() {
        pairs.insert(key.to_string(), value.to_string());
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&encode_pairs(&pairs)));
    }

    Ok(url)
}
