//! Decoded payload records.
//!
//! # Design
//! Plain data mirroring the JSON the news host serves. They are defined
//! independently from the mock-server crate; the integration tests catch
//! drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A single news item from `headlines.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct News {
    pub id: u64,
    pub title: String,
    pub strap: String,
    pub url: Url,
}

/// A single message from `messages.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub from: String,
    pub text: String,
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub job: String,
}

/// The user record echoed back after creation.
///
/// `id` is kept opaque: hosts hand out UUIDs or plain numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub id: String,
    pub name: String,
    pub job: String,
    pub created_at: DateTime<Utc>,
}
