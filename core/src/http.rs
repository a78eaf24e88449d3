//! HTTP types exchanged between the client and its transport.
//!
//! # Design
//! Requests and responses are plain data. `FetchClient` builds an
//! `HttpRequest` and parses an `HttpResponse`; a `Transport` performs the
//! round trip in between. Keeping both halves as data lets the build and
//! parse steps be tested without a network, and lets tests swap in a
//! scripted transport.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// Header map keyed by lowercase header name.
///
/// A sorted map makes names unique and iteration order irrelevant.
pub type Headers = BTreeMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Uppercase method name as it goes on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `FetchClient::build_request`; `url` is already resolved against
/// the environment's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `body` holds the raw bytes as received. It is never transcoded, so a
/// payload that is not valid UTF-8 reaches the decoder unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as text, with invalid UTF-8 replaced. For diagnostics only.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_uppercase() {
        let all = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ];
        for method in all {
            assert_eq!(method.as_str(), method.as_str().to_uppercase());
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn success_covers_the_2xx_range_only() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(HttpResponse::new(299, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(503, "").is_success());
    }

    #[test]
    fn body_keeps_raw_bytes() {
        let response = HttpResponse::new(200, b"hi \xFF".to_vec());
        assert_eq!(response.body, b"hi \xFF");
        assert_eq!(response.body_text(), "hi \u{FFFD}");
    }
}
