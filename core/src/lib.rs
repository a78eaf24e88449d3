//! Typed HTTP fetch client for the news host.
//!
//! # Overview
//! Resolves a typed `Endpoint<T>` against the base URL of the selected
//! `Environment`, performs one HTTP round trip through a `Transport`, and
//! decodes the JSON body into `T`. `fetch_with_retry` repeats the attempt a
//! bounded number of times with a fixed delay.
//!
//! # Design
//! - `FetchClient` is stateless apart from its environment and transport.
//! - Endpoints carry relative paths only; the base URL is applied per call.
//! - Request building and response parsing are pure; the `Transport` trait is
//!   the only place that touches the network.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod endpoint;
pub mod environment;
pub mod error;
pub mod http;
pub mod retry;
pub mod transport;
pub mod types;

pub use client::FetchClient;
pub use endpoint::{resolve, Endpoint, CREATE_USER, HEADLINES, MESSAGES};
pub use environment::{CachePolicy, Environment, EnvironmentKind, TransportConfig};
pub use error::{FetchError, Result};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use retry::{retry, RetryPolicy, DEFAULT_RETRY_DELAY};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreatedUser, Message, NewUser, News};
