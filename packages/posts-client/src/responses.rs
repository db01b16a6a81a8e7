//! Response envelopes and data payloads decoded from server JSON.
//!
//! Decoding is deliberately forgiving about the `success` flag: a missing
//! or malformed value reads as `false` and never aborts parsing of the
//! rest of the envelope. Optional fields decode to an explicit absence,
//! never to an empty string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lenient `success` decoding: missing or non-boolean values are `false`.
fn success_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

/// A list as the server reports it after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRecord {
    pub list_id: i64,
    pub list_name: String,
    pub is_public: bool,
}

/// Envelope for a community-post creation.
///
/// `list_id` is filled in by the flow, which is the only party that knows
/// which hidden list backs the post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPostResponse {
    #[serde(default, deserialize_with = "success_or_false")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CommunityPostData>,
}

impl CommunityPostResponse {
    /// Envelope for a client-side or collaborator failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            list_id: None,
            data: None,
        }
    }
}

/// Envelope for a review-post creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPostResponse {
    #[serde(default, deserialize_with = "success_or_false")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ReviewPostData>,
}

impl ReviewPostResponse {
    /// Envelope for a client-side or collaborator failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            data: None,
        }
    }
}

/// Envelope for a list-post creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPostResponse {
    #[serde(default, deserialize_with = "success_or_false")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ListPostData>,
}

impl ListPostResponse {
    /// Envelope for a client-side or collaborator failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            data: None,
        }
    }
}

/// Payload of a successfully created community post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPostData {
    pub post_id: i64,
    /// Always `"community"` for this payload.
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_date: DateTime<Utc>,
    pub spots_count: u32,
}

impl CommunityPostData {
    /// Calendar day the post was created, `YYYY-MM-DD`.
    pub fn created_day(&self) -> String {
        self.created_date.format("%Y-%m-%d").to_string()
    }
}

/// Payload of a successfully created review post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPostData {
    pub post_id: i64,
    /// Always `"review"` for this payload.
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_date: DateTime<Utc>,
    pub rating: f64,
}

impl ReviewPostData {
    /// Whole-star bucket for the rating, rounding half up (4.5 rates 5).
    pub fn rating_stars(&self) -> u8 {
        self.rating.round() as u8
    }

    /// Sentiment label for the rating.
    ///
    /// These exact strings are display data consumed by the app; do not
    /// translate or reword them.
    pub fn sentiment(&self) -> &'static str {
        if self.rating >= 4.0 {
            "Positiva"
        } else if self.rating <= 2.0 {
            "Negativa"
        } else {
            "Neutra"
        }
    }

    /// Calendar day the post was created, `YYYY-MM-DD`.
    pub fn created_day(&self) -> String {
        self.created_date.format("%Y-%m-%d").to_string()
    }
}

/// Payload of a successfully created list post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPostData {
    pub post_id: i64,
    /// Always `"list"` for this payload.
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_date: DateTime<Utc>,
    pub spots_count: u32,
}

impl ListPostData {
    /// Calendar day the post was created, `YYYY-MM-DD`.
    pub fn created_day(&self) -> String {
        self.created_date.format("%Y-%m-%d").to_string()
    }
}
