//! The network seam between `FetchClient` and the outside world.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and hands back the `HttpResponse`
//! as data. It does not interpret status codes or bodies; that is the
//! client's job. `ReqwestTransport` is the real implementation; tests plug in
//! transports that replay scripted responses.

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

use crate::environment::TransportConfig;
use crate::error::{FetchError, Result};
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};

/// Performs a single HTTP round trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

impl<T: Transport> Transport for &T {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).execute(request)
    }
}

/// `Transport` backed by a shared `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from `config`.
    ///
    /// Default headers are deliberately not installed on the `reqwest`
    /// client: the request built by `FetchClient` already carries the exact
    /// header set to send.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { inner })
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .inner
            .request(to_reqwest_method(request.method), request.url)
            .headers(to_header_map(&request.headers)?);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, headers, body })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || FetchError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
