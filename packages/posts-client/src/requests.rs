//! Request models for the three post kinds and the list operations.
//!
//! Wire field names are snake_case and match the struct fields verbatim;
//! the server contract dictates them, so renaming a field here is a
//! breaking change. The one deliberate divergence is the list-post
//! discriminator, injected by [`ListPostRequest::to_payload`].

use serde::{Deserialize, Serialize};

use crate::error::ReviewFormError;
use crate::validation::{RATING_MAX, RATING_MIN};

/// Caller intent: a community post over a set of spots.
///
/// The spots are carried as bare ids. The flow turns them into a hidden
/// list before the post itself is created; no single server object
/// corresponds to this request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPostRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: i64,
    /// Spot ids in the order they should appear on the list.
    pub spot_ids: Vec<i64>,
}

impl CommunityPostRequest {
    /// Log-safe one-liner: ids and counts only, never the description body.
    pub fn summary(&self) -> String {
        format!(
            "community post \"{}\" by user {} over {} spots",
            self.display_title(),
            self.user_id,
            self.spot_ids.len()
        )
    }

    /// Title with a fallback when the field is blank.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            "Untitled post"
        } else {
            trimmed
        }
    }

    /// Description with a fallback when the field is absent or blank.
    pub fn display_description(&self) -> &str {
        match self.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => "No description",
        }
    }

    /// Name plus spot count of the hidden list derived from this request.
    pub fn list_summary(&self) -> String {
        format!("{} ({} spots)", self.display_title(), self.spot_ids.len())
    }
}

/// A review of a single spot, rated 1.0 to 5.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPostRequest {
    pub description: String,
    pub user_id: i64,
    pub spot_id: i64,
    pub rating: f64,
}

impl ReviewPostRequest {
    /// Build a review request from raw form input.
    ///
    /// This path is fail-fast: an out-of-range rating or a non-positive id
    /// aborts construction with a [`ReviewFormError`] instead of being
    /// collected into a validation report. The description is trimmed here.
    /// Every other request type always constructs and reports through
    /// [`Validate::validate`](crate::validation::Validate::validate).
    pub fn from_form(
        description: &str,
        user_id: i64,
        spot_id: i64,
        rating: f64,
    ) -> Result<Self, ReviewFormError> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(ReviewFormError::RatingOutOfRange { rating });
        }
        if user_id <= 0 {
            return Err(ReviewFormError::NonPositiveUserId { user_id });
        }
        if spot_id <= 0 {
            return Err(ReviewFormError::NonPositiveSpotId { spot_id });
        }
        Ok(Self {
            description: description.trim().to_string(),
            user_id,
            spot_id,
            rating,
        })
    }

    /// Log-safe one-liner: ids and the rating, never the description body.
    pub fn summary(&self) -> String {
        format!(
            "review of spot {} by user {} rated {:.1}",
            self.spot_id, self.user_id, self.rating
        )
    }
}

/// A post referencing a pre-existing public list (not created by this
/// request).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPostRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: i64,
    pub list_id: i64,
}

impl ListPostRequest {
    /// Wire form of this request.
    ///
    /// The server dispatches post creation on a literal `"type"` tag that
    /// has no counterpart on the in-memory model, so encoding goes through
    /// this payload rather than through the struct itself.
    pub fn to_payload(&self) -> ListPostPayload {
        ListPostPayload {
            kind: "list",
            title: self.title.clone(),
            description: self.description.clone(),
            user_id: self.user_id,
            list_id: self.list_id,
        }
    }

    /// Log-safe one-liner: ids only, never the description body.
    pub fn summary(&self) -> String {
        format!(
            "list post \"{}\" by user {} over list {}",
            self.display_title(),
            self.user_id,
            self.list_id
        )
    }

    /// Title with a fallback when the field is blank.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            "Untitled post"
        } else {
            trimmed
        }
    }

    /// Description with a fallback when the field is absent or blank.
    pub fn display_description(&self) -> &str {
        match self.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => "No description",
        }
    }
}

/// Outgoing JSON for a list post, discriminator included.
#[derive(Debug, Clone, Serialize)]
pub struct ListPostPayload {
    /// Always `"list"`. Absent from the in-memory model.
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: i64,
    pub list_id: i64,
}

/// Create-list payload. Built internally by the community-post flow,
/// always hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListCreateRequest {
    pub list_name: String,
    pub is_public: bool,
}

impl ListCreateRequest {
    /// A hidden list named after the post it will back.
    pub fn hidden(list_name: impl Into<String>) -> Self {
        Self {
            list_name: list_name.into(),
            is_public: false,
        }
    }
}

/// One spot's membership in a list. Sent once per spot, in the order the
/// spots were listed on the originating request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotListMembership {
    pub spot_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_thumbnail_id: Option<i64>,
}

/// Outgoing JSON for the final community-post call: the hidden list id
/// stands in for the spot ids of the originating request.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityPostPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: i64,
    pub list_id: i64,
}
