use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct News {
    pub id: u64,
    pub title: String,
    pub strap: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub from: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    pub job: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub job: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct AppState {
    /// Requests still to be answered with 503 before serving normally.
    failures_remaining: Arc<AtomicU32>,
}

impl AppState {
    pub fn failing_first(n: u32) -> Self {
        Self {
            failures_remaining: Arc::new(AtomicU32::new(n)),
        }
    }

    /// Consume one injected failure, if any are left.
    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

pub fn app() -> Router {
    app_with_state(AppState::default())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/headlines.json", get(list_headlines))
        .route("/messages.json", get(list_messages))
        .route("/broken.json", get(broken))
        .route("/garbled.json", get(garbled))
        .route("/headers.json", get(echo_headers))
        .route("/api/users", post(create_user))
        .layer(middleware::from_fn_with_state(state.clone(), inject_failures))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn inject_failures(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.take_failure() {
        tracing::info!(path = %request.uri().path(), "injecting failure");
        return (StatusCode::SERVICE_UNAVAILABLE, "injected failure").into_response();
    }
    next.run(request).await
}

pub fn headlines() -> Vec<News> {
    vec![
        News {
            id: 1,
            title: "Swift 6 released".to_string(),
            strap: "Strict concurrency checking arrives for everyone.".to_string(),
            url: "https://hws.dev/news/1".to_string(),
        },
        News {
            id: 2,
            title: "Rust 2024 edition ships".to_string(),
            strap: "Async closures and a new prelude headline the release.".to_string(),
            url: "https://hws.dev/news/2".to_string(),
        },
        News {
            id: 3,
            title: "Local bakery wins award".to_string(),
            strap: "The sourdough was, by all accounts, excellent.".to_string(),
            url: "https://hws.dev/news/3".to_string(),
        },
    ]
}

pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: 1,
            from: "Tim".to_string(),
            text: "Are we still on for lunch?".to_string(),
        },
        Message {
            id: 2,
            from: "Ana".to_string(),
            text: "The build is green again.".to_string(),
        },
    ]
}

async fn list_headlines() -> Json<Vec<News>> {
    Json(headlines())
}

async fn list_messages() -> Json<Vec<Message>> {
    Json(messages())
}

async fn broken() -> impl IntoResponse {
    ([("content-type", "application/json")], r#"[{"id":"one","title":"#)
}

/// Well-formed JSON except for bytes that are not valid UTF-8.
pub const GARBLED_BODY: &[u8] = b"[{\"id\":1,\"from\":\"Tim\",\"text\":\"hi \xFF\xFE\"}]";

async fn garbled() -> impl IntoResponse {
    ([("content-type", "application/json")], GARBLED_BODY)
}

async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    Json(
        headers
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect(),
    )
}

async fn create_user(Json(input): Json<NewUser>) -> (StatusCode, Json<User>) {
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        job: input.job,
        created_at: Utc::now(),
    };
    tracing::info!(id = %user.id, "created user");
    (StatusCode::CREATED, Json(user))
}
