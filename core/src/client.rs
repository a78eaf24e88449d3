//! Typed fetch client.
//!
//! # Design
//! `FetchClient` holds one `Environment` and the transport built for it, and
//! nothing else: no state survives between calls. Each fetch is split into
//! `build_request` (resolve the endpoint, pick headers, attach the body) and
//! `parse_response` (check the status, decode the body); the transport runs
//! the round trip in between. The retrying variants wrap the same single
//! attempt in `retry::retry`, so every attempt re-resolves and re-sends.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::environment::{CachePolicy, Environment};
use crate::error::{FetchError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::retry::{retry, RetryPolicy};
use crate::transport::{ReqwestTransport, Transport};

/// Client bound to a single environment.
#[derive(Debug, Clone)]
pub struct FetchClient<T = ReqwestTransport> {
    environment: Environment,
    transport: T,
}

impl FetchClient<ReqwestTransport> {
    /// Build a client with a `reqwest` transport configured from
    /// `environment`.
    pub fn new(environment: Environment) -> Result<Self> {
        let transport = ReqwestTransport::new(environment.transport())?;
        Ok(Self {
            environment,
            transport,
        })
    }
}

impl<T: Transport> FetchClient<T> {
    pub fn with_transport(environment: Environment, transport: T) -> Self {
        Self {
            environment,
            transport,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe the request for `endpoint` without sending it.
    ///
    /// Headers declared on the endpoint replace the environment defaults;
    /// an endpoint without headers gets the defaults. `body` is dropped for
    /// GET requests.
    pub fn build_request<R>(
        &self,
        endpoint: &Endpoint<R>,
        body: Option<String>,
    ) -> Result<HttpRequest> {
        let url = endpoint.resolve(self.environment.base_url())?;
        let config = self.environment.transport();

        let mut headers = if endpoint.has_headers() {
            endpoint.headers()
        } else {
            config.default_headers.clone()
        };
        if config.cache_policy == CachePolicy::ReloadIgnoringCache {
            headers.insert("cache-control".to_string(), "no-cache".to_string());
        }

        let method = endpoint.method();
        let body = body.filter(|_| method != HttpMethod::Get);

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Decode a response body into `R`. Non-2xx responses become
    /// `FetchError::Status` without attempting to decode.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R> {
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                body: response.body_text(),
            });
        }
        serde_json::from_slice(&response.body).map_err(FetchError::Decode)
    }

    /// Fetch `endpoint` once and decode the result.
    pub async fn fetch<R: DeserializeOwned>(&self, endpoint: &Endpoint<R>) -> Result<R> {
        self.execute(endpoint, None).await
    }

    /// Send `body` as JSON to `endpoint` once and decode the result.
    pub async fn send<R, B>(&self, endpoint: &Endpoint<R>, body: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(FetchError::Serialization)?;
        self.execute(endpoint, Some(body)).await
    }

    /// Like [`fetch`](Self::fetch), retrying transient failures under `policy`.
    pub async fn fetch_with_retry<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<R>,
        policy: RetryPolicy,
    ) -> Result<R> {
        retry(policy, move |_| self.execute(endpoint, None)).await
    }

    /// Like [`send`](Self::send), retrying transient failures under `policy`.
    ///
    /// The body is serialized once, before the first attempt.
    pub async fn send_with_retry<R, B>(
        &self,
        endpoint: &Endpoint<R>,
        body: &B,
        policy: RetryPolicy,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(FetchError::Serialization)?;
        retry(policy, move |_| self.execute(endpoint, Some(body.clone()))).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<R>,
        body: Option<String>,
    ) -> Result<R> {
        let request = self.build_request(endpoint, body)?;
        tracing::debug!(
            environment = self.environment.name(),
            method = %request.method,
            url = %request.url,
            "sending request"
        );
        let response = self.transport.execute(request).await?;
        tracing::debug!(
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        self.parse_response(response)
    }
}
