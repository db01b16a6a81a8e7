//! Client-side validation rules.
//!
//! Validation is pure: no I/O, no panics. Every rule runs independently
//! and contributes a human-readable message, so a single malformed
//! request reports everything wrong with it at once. The flow refuses to
//! touch the network while any rule fires.

use std::collections::HashSet;

use crate::requests::{
    CommunityPostRequest, ListCreateRequest, ListPostRequest, ReviewPostRequest,
};

/// Maximum title and list-name length, in characters.
pub const MAX_TITLE_CHARS: usize = 45;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Maximum number of spots on a single community post.
pub const MAX_SPOTS_PER_POST: usize = 10;

/// Inclusive lower rating bound.
pub const RATING_MIN: f64 = 1.0;

/// Inclusive upper rating bound.
pub const RATING_MAX: f64 = 5.0;

/// Collect-and-report validation for request values.
pub trait Validate {
    /// All rule violations, in rule order. Empty means valid.
    fn validate(&self) -> Vec<String>;

    /// True iff [`validate`](Self::validate) reports nothing.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Emptiness is judged on trimmed text; the length limit on the raw
/// string. A short title padded out past 45 characters with whitespace is
/// over the limit even though it trims under it.
fn check_title(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} must not be empty"));
    }
    if value.chars().count() > MAX_TITLE_CHARS {
        errors.push(format!("{field} must be {MAX_TITLE_CHARS} characters or fewer"));
    }
}

/// Description length is judged on the raw string, pre-trim.
fn check_description(errors: &mut Vec<String>, value: Option<&str>) {
    if let Some(description) = value {
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.push(format!(
                "description must be {MAX_DESCRIPTION_CHARS} characters or fewer"
            ));
        }
    }
}

/// Zero and negative ids are the same error.
fn check_positive_id(errors: &mut Vec<String>, field: &str, value: i64) {
    if value <= 0 {
        errors.push(format!("{field} must be a positive id"));
    }
}

impl Validate for CommunityPostRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, self.description.as_deref());
        check_positive_id(&mut errors, "user id", self.user_id);

        // The four spot checks are independent and may all fire at once.
        if self.spot_ids.is_empty() {
            errors.push("at least one spot is required".to_string());
        }
        if self.spot_ids.len() > MAX_SPOTS_PER_POST {
            errors.push(format!("no more than {MAX_SPOTS_PER_POST} spots per post"));
        }
        let unique: HashSet<i64> = self.spot_ids.iter().copied().collect();
        if unique.len() != self.spot_ids.len() {
            errors.push("spot ids must be unique".to_string());
        }
        if self.spot_ids.iter().any(|id| *id <= 0) {
            errors.push("spot ids must be positive".to_string());
        }

        errors
    }
}

impl Validate for ReviewPostRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        check_description(&mut errors, Some(&self.description));
        check_positive_id(&mut errors, "user id", self.user_id);
        check_positive_id(&mut errors, "spot id", self.spot_id);
        if !(RATING_MIN..=RATING_MAX).contains(&self.rating) {
            errors.push(format!(
                "rating must be between {RATING_MIN:.1} and {RATING_MAX:.1}"
            ));
        }

        errors
    }
}

impl Validate for ListPostRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, self.description.as_deref());
        check_positive_id(&mut errors, "user id", self.user_id);
        check_positive_id(&mut errors, "list id", self.list_id);

        errors
    }
}

impl Validate for ListCreateRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_title(&mut errors, "list name", &self.list_name);
        errors
    }
}
