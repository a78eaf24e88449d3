//! Named backend configurations.
//!
//! # Design
//! An `Environment` bundles a display name, the base URL every endpoint is
//! resolved against, and the `TransportConfig` its transport is built from.
//! Two presets exist (`production`, `testing`); `custom` covers anything else,
//! such as pointing at a local mock server. Environments are immutable and
//! chosen once per `FetchClient`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::{FetchError, Result};
use crate::http::Headers;

const HOST: &str = "https://hws.dev/";

/// How the transport should treat cached responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Whatever the HTTP protocol and server headers allow.
    #[default]
    ProtocolDefault,
    /// Always go to the origin. Sends `cache-control: no-cache`.
    ReloadIgnoringCache,
}

/// Settings a transport handle is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Headers sent with every request whose endpoint declares none.
    pub default_headers: Headers,
    pub cache_policy: CachePolicy,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            default_headers: Headers::new(),
            cache_policy: CachePolicy::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A named backend: base URL plus transport defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    name: String,
    base_url: Url,
    transport: TransportConfig,
}

impl Environment {
    /// Validate `base_url` and build an environment from it.
    pub fn custom(name: &str, base_url: &str, transport: TransportConfig) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|source| FetchError::InvalidBaseUrl {
            base: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            base_url,
            transport,
        })
    }

    /// The live host with normal caching and the production key.
    pub fn production() -> Self {
        Self::preset(
            "Production",
            TransportConfig::default().with_header("apikey", "production-key"),
        )
    }

    /// The live host with caching disabled and the test key.
    pub fn testing() -> Self {
        Self::preset(
            "Testing",
            TransportConfig::default()
                .with_header("apikey", "test-key")
                .with_cache_policy(CachePolicy::ReloadIgnoringCache),
        )
    }

    fn preset(name: &str, transport: TransportConfig) -> Self {
        Self {
            name: name.to_string(),
            base_url: Url::parse(HOST).unwrap_or_else(|_| unreachable!("{HOST} is a valid URL")),
            transport,
        }
    }

    /// Same settings, different host.
    pub fn with_base_url(self, base_url: &str) -> Result<Self> {
        Self::custom(&self.name, base_url, self.transport)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::production()
    }
}

/// The preset environments, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentKind {
    #[default]
    Production,
    Testing,
}

impl EnvironmentKind {
    pub fn environment(self) -> Environment {
        match self {
            EnvironmentKind::Production => Environment::production(),
            EnvironmentKind::Testing => Environment::testing(),
        }
    }
}

impl FromStr for EnvironmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(EnvironmentKind::Production),
            "testing" | "test" => Ok(EnvironmentKind::Testing),
            other => Err(format!("unknown environment {other:?} (expected production or testing)")),
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentKind::Production => f.write_str("production"),
            EnvironmentKind::Testing => f.write_str("testing"),
        }
    }
}
