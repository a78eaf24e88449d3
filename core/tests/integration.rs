//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and points an
//! environment at it, then drives the real `ReqwestTransport`. Validates that
//! request building, the wire format, and response decoding agree with the
//! actual server.

use std::collections::BTreeMap;
use std::time::Duration;

use fetch_core::{
    Endpoint, Environment, FetchClient, FetchError, NewUser, RetryPolicy, CREATE_USER, HEADLINES,
    MESSAGES,
};
use mock_server::AppState;

/// Start the mock server on a random port and return its base URL.
async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, state));
    format!("http://{addr}/")
}

async fn client_for(state: AppState) -> FetchClient {
    let base = spawn_server(state).await;
    let env = Environment::testing().with_base_url(&base).unwrap();
    FetchClient::new(env).unwrap()
}

static BROKEN: Endpoint<Vec<fetch_core::News>> = Endpoint::get("broken.json");
static GARBLED: Endpoint<Vec<fetch_core::Message>> = Endpoint::get("garbled.json");
static HEADERS: Endpoint<BTreeMap<String, String>> = Endpoint::get("headers.json");

#[tokio::test]
async fn fetches_both_feeds() {
    let client = client_for(AppState::default()).await;

    let (headlines, messages) = tokio::join!(client.fetch(&HEADLINES), client.fetch(&MESSAGES));
    let headlines = headlines.unwrap();
    let messages = messages.unwrap();

    assert_eq!(headlines.len(), mock_server::headlines().len());
    assert_eq!(headlines[0].title, mock_server::headlines()[0].title);
    assert_eq!(headlines[0].url.as_str(), "https://hws.dev/news/1");
    assert_eq!(messages.len(), mock_server::messages().len());
    assert_eq!(messages[0].from, "Tim");
}

#[tokio::test]
async fn environment_headers_reach_the_server() {
    let client = client_for(AppState::default()).await;

    let headers = client.fetch(&HEADERS).await.unwrap();

    assert_eq!(headers.get("apikey").map(String::as_str), Some("test-key"));
    assert_eq!(headers.get("cache-control").map(String::as_str), Some("no-cache"));
}

#[tokio::test]
async fn create_user_round_trips() {
    let client = client_for(AppState::default()).await;
    let input = NewUser {
        name: "Taylor".to_string(),
        job: "Engineer".to_string(),
    };

    let created = client.send(&CREATE_USER, &input).await.unwrap();

    assert_eq!(created.name, "Taylor");
    assert_eq!(created.job, "Engineer");
}

#[tokio::test]
async fn malformed_feed_is_a_decode_error() {
    let client = client_for(AppState::default()).await;

    let err = client.fetch(&BROKEN).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn invalid_utf8_body_is_a_decode_error() {
    let client = client_for(AppState::default()).await;

    let err = client.fetch(&GARBLED).await.unwrap_err();

    let expected = serde_json::from_slice::<Vec<fetch_core::Message>>(mock_server::GARBLED_BODY)
        .unwrap_err();
    match err {
        FetchError::Decode(source) => assert_eq!(source.to_string(), expected.to_string()),
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_resource_is_a_status_error() {
    let client = client_for(AppState::default()).await;
    let missing: Endpoint<Vec<fetch_core::Message>> = Endpoint::get("nothing.json");

    let err = client.fetch(&missing).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }), "{err:?}");
}

#[tokio::test]
async fn retry_rides_out_injected_failures() {
    let client = client_for(AppState::failing_first(2)).await;
    let policy = RetryPolicy::new(3).unwrap().with_delay(Duration::from_millis(20));

    let messages = client.fetch_with_retry(&MESSAGES, policy).await.unwrap();

    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn retry_gives_up_with_the_last_status() {
    let client = client_for(AppState::failing_first(5)).await;
    let policy = RetryPolicy::new(2).unwrap().with_delay(Duration::from_millis(20));

    let err = client.fetch_with_retry(&HEADLINES, policy).await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "injected failure");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn closed_port_is_a_transport_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let env = Environment::testing()
        .with_base_url(&format!("http://127.0.0.1:{port}/"))
        .unwrap();
    let client = FetchClient::new(env).unwrap();

    let err = client.fetch(&MESSAGES).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
}
