//! HTTP method type and parsing

use std::fmt;
use std::str::FromStr;

use crate::errors::ReqbookError;

/// A standard HTTP method a descriptor may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
}

impl HttpMethod {
    /// All standard HTTP methods, in the order they are offered for selection
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Connect,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Position of this method in [`HttpMethod::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ReqbookError;

    /// Parse a method name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                ReqbookError::MalformedDescriptor(format!("unrecognized HTTP method: {:?}", s))
            })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Connect => reqwest::Method::CONNECT,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Trace => reqwest::Method::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for method in HttpMethod::ALL {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
            assert_eq!(HttpMethod::ALL[method.index()], method);
        }
    }

    #[test]
    fn test_into_reqwest_method() {
        assert_eq!(reqwest::Method::from(HttpMethod::Connect), reqwest::Method::CONNECT);
        assert_eq!(reqwest::Method::from(HttpMethod::Get).as_str(), "GET");
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!(" PATCH ".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("Trace".parse::<HttpMethod>().unwrap(), HttpMethod::Trace);
        assert!("".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_unknown_method_is_malformed() {
        let err = "BREW".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, ReqbookError::MalformedDescriptor(_)));
    }
}
