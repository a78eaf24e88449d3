//! Typed descriptors of remote resources.
//!
//! # Design
//! An `Endpoint<T>` names a resource by its path *relative* to whatever base
//! URL the client is configured with, plus the shape `T` its response decodes
//! into. The path is only joined with a base at call time (`resolve`), so one
//! `Endpoint` constant works unchanged against production, testing, or a local
//! mock server.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use url::Url;

use crate::error::{FetchError, Result};
use crate::http::{Headers, HttpMethod};
use crate::types::{CreatedUser, Message, News};

/// Immutable descriptor of a remote resource that decodes into `T`.
pub struct Endpoint<T> {
    path: Cow<'static, str>,
    method: HttpMethod,
    headers: &'static [(&'static str, &'static str)],
    shape: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    /// A GET endpoint at a static relative path, usable in `static` and `const` items.
    pub const fn get(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: HttpMethod::Get,
            headers: &[],
            shape: PhantomData,
        }
    }

    /// A GET endpoint at a path computed at runtime.
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            headers: &[],
            shape: PhantomData,
        }
    }

    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Headers sent with this endpoint. When non-empty they replace the
    /// environment's default headers rather than merging with them.
    pub const fn with_headers(mut self, headers: &'static [(&'static str, &'static str)]) -> Self {
        self.headers = headers;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Declared headers, keyed by lowercase name. A repeated name keeps the
    /// last value.
    pub fn headers(&self) -> Headers {
        self.headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), (*value).to_string()))
            .collect()
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Resolve this endpoint against `base`. See [`resolve`].
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        resolve(self, base)
    }
}

/// Join `endpoint`'s path onto `base` using standard relative-URL resolution.
///
/// Pure: the same inputs always produce the same URL. Fails with
/// `FetchError::InvalidUrl` when the combination is not a well-formed
/// absolute URL, for example when `base` cannot be a base (`mailto:`) or
/// the path carries a malformed authority.
pub fn resolve<T>(endpoint: &Endpoint<T>, base: &Url) -> Result<Url> {
    base.join(endpoint.path())
        .map_err(|source| FetchError::InvalidUrl {
            base: base.to_string(),
            path: endpoint.path().to_string(),
            source,
        })
}

// `T` is only a marker, so these must not require `T: Clone` / `T: Debug`.
impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            method: self.method,
            headers: self.headers,
            shape: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("shape", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> PartialEq for Endpoint<T> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.method == other.method && self.headers() == other.headers()
    }
}

/// Today's news items.
pub static HEADLINES: Endpoint<Vec<News>> = Endpoint::get("headlines.json");

/// Inbox messages.
pub static MESSAGES: Endpoint<Vec<Message>> = Endpoint::get("messages.json");

/// Create a user from a JSON object body.
pub static CREATE_USER: Endpoint<CreatedUser> = Endpoint::get("api/users")
    .with_method(HttpMethod::Post)
    .with_headers(&[("Content-Type", "application/json")]);

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://hws.dev").unwrap()
    }

    #[test]
    fn resolves_relative_path_against_base() {
        let url = HEADLINES.resolve(&base()).unwrap();
        assert_eq!(url.as_str(), "https://hws.dev/headlines.json");
    }

    #[test]
    fn resolution_is_deterministic() {
        let first = resolve(&MESSAGES, &base()).unwrap();
        let second = resolve(&MESSAGES, &base()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn same_endpoint_follows_the_base() {
        let local = Url::parse("http://127.0.0.1:3000/").unwrap();
        assert_eq!(
            HEADLINES.resolve(&local).unwrap().as_str(),
            "http://127.0.0.1:3000/headlines.json"
        );
        assert_eq!(
            HEADLINES.resolve(&base()).unwrap().as_str(),
            "https://hws.dev/headlines.json"
        );
    }

    #[test]
    fn base_without_trailing_slash_replaces_last_segment() {
        let base = Url::parse("https://hws.dev/v1").unwrap();
        assert_eq!(HEADLINES.resolve(&base).unwrap().as_str(), "https://hws.dev/headlines.json");

        let base = Url::parse("https://hws.dev/v1/").unwrap();
        assert_eq!(HEADLINES.resolve(&base).unwrap().as_str(), "https://hws.dev/v1/headlines.json");
    }

    #[test]
    fn cannot_be_a_base_url_is_rejected() {
        let base = Url::parse("mailto:news@hws.dev").unwrap();
        let err = HEADLINES.resolve(&base).unwrap_err();
        assert!(matches!(
            err,
            FetchError::InvalidUrl { source: url::ParseError::RelativeUrlWithCannotBeABaseBase, .. }
        ));
    }

    #[test]
    fn malformed_authority_is_rejected() {
        let endpoint: Endpoint<()> = Endpoint::new("http://[::1");
        let err = endpoint.resolve(&base()).unwrap_err();
        match err {
            FetchError::InvalidUrl { base, path, .. } => {
                assert_eq!(base, "https://hws.dev/");
                assert_eq!(path, "http://[::1");
            }
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn defaults_to_get_without_headers() {
        assert_eq!(HEADLINES.method(), HttpMethod::Get);
        assert!(!HEADLINES.has_headers());
        assert!(HEADLINES.headers().is_empty());
    }

    #[test]
    fn create_user_posts_json() {
        assert_eq!(CREATE_USER.method(), HttpMethod::Post);
        assert_eq!(
            CREATE_USER.headers().get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn repeated_header_names_keep_the_last_value() {
        let endpoint: Endpoint<()> =
            Endpoint::get("x").with_headers(&[("X-Key", "one"), ("x-key", "two")]);
        let headers = endpoint.headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["x-key"], "two");
    }

    #[test]
    fn clone_does_not_require_clone_payload() {
        struct NotClone;
        let endpoint: Endpoint<NotClone> = Endpoint::get("thing.json");
        assert_eq!(endpoint.clone(), endpoint);
    }
}
