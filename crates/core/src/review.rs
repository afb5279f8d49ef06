//! Review records, edit patches, and submission validation.
//!
//! A review with `parent_id == None` is a top-level review: the only kind
//! that rates a breed or contributes tags. Replies are discussion only.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatings;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::vote::Reaction;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for a review message, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2_000;

/// Maximum number of tags on a single review.
pub const MAX_TAGS_PER_REVIEW: usize = 10;

/// Maximum length of a single tag, including the `#` prefix.
pub const MAX_TAG_LENGTH: usize = 50;

/// Message stored when an author deletes their own review.
pub const DELETED_BY_AUTHOR_MESSAGE: &str = "[Deleted]";

/// Message stored when an admin deletes someone else's review.
pub const DELETED_BY_MODERATOR_MESSAGE: &str = "[Deleted by moderator]";

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// A review or reply, with its nested replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: DbId,
    pub breed_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub message: String,
    pub ratings: Option<AspectRatings>,
    /// Distinct tags in the order the author added them.
    pub tags: Vec<String>,
    pub parent_id: Option<DbId>,
    pub like_count: i64,
    pub dislike_count: i64,
    /// The current viewer's reaction, `None` for anonymous viewers.
    pub viewer_reaction: Option<Reaction>,
    #[serde(default)]
    pub replies: Vec<Review>,
}

impl Review {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Ratings that count toward the breed aggregate. Replies never rate.
    pub fn effective_ratings(&self) -> Option<&AspectRatings> {
        if self.is_top_level() {
            self.ratings.as_ref()
        } else {
            None
        }
    }

    /// Apply an edit to the mutable fields.
    pub fn apply_patch(&mut self, patch: &ReviewPatch) {
        self.message.clone_from(&patch.message);
        self.ratings.clone_from(&patch.ratings);
        self.tags.clone_from(&patch.tags);
    }
}

/// Replacement values for the author-editable fields of a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub message: String,
    pub ratings: Option<AspectRatings>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Validate a review message: non-blank and at most [`MAX_MESSAGE_LENGTH`] chars.
pub fn validate_message(message: &str) -> Result<(), CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::Validation(
            "Review message must not be empty".to_string(),
        ));
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review message exceeds maximum length of {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Replies are discussion, not re-ratings: reject ratings on a reply.
pub fn validate_reply_ratings(
    parent_id: Option<DbId>,
    ratings: Option<&AspectRatings>,
) -> Result<(), CoreError> {
    let has_scores = ratings.is_some_and(|r| !r.is_empty());
    if parent_id.is_some() && has_scores {
        return Err(CoreError::Validation(
            "Replies cannot carry ratings".to_string(),
        ));
    }
    Ok(())
}

/// Normalize one user-entered tag: trim it and make sure it starts with `#`.
///
/// Returns `None` for blank input (including a lone `#`).
pub fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if body.is_empty() {
        None
    } else {
        Some(format!("#{body}"))
    }
}

/// Normalize a submitted tag list into a distinct, first-seen-ordered set.
///
/// Fails when the resulting set is larger than [`MAX_TAGS_PER_REVIEW`] or a
/// tag is longer than [`MAX_TAG_LENGTH`].
pub fn normalize_tags(raw: &[String]) -> Result<Vec<String>, CoreError> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw.iter().filter_map(|t| normalize_tag(t)) {
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(CoreError::Validation(format!(
                "Tag '{tag}' exceeds maximum length of {MAX_TAG_LENGTH} characters"
            )));
        }
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    if tags.len() > MAX_TAGS_PER_REVIEW {
        return Err(CoreError::Validation(format!(
            "A review may have at most {MAX_TAGS_PER_REVIEW} tags"
        )));
    }
    Ok(tags)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::Aspect;

    #[test]
    fn blank_message_rejected() {
        assert!(validate_message("").is_err());
        assert!(validate_message("   \n").is_err());
    }

    #[test]
    fn message_length_limit_counts_characters() {
        let at_limit = "ก".repeat(MAX_MESSAGE_LENGTH);
        assert!(validate_message(&at_limit).is_ok());

        let over = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        let err = validate_message(&over).unwrap_err();
        assert!(err.to_string().contains("maximum length"));
    }

    #[test]
    fn reply_with_scores_rejected() {
        let ratings = AspectRatings::new().with(Aspect::Grooming, 4);
        assert!(validate_reply_ratings(Some(1), Some(&ratings)).is_err());
        assert!(validate_reply_ratings(None, Some(&ratings)).is_ok());
    }

    #[test]
    fn reply_with_only_unset_scores_allowed() {
        let unset = AspectRatings::new();
        assert!(validate_reply_ratings(Some(1), Some(&unset)).is_ok());
        assert!(validate_reply_ratings(Some(1), None).is_ok());
    }

    #[test]
    fn normalize_tag_adds_missing_prefix() {
        assert_eq!(normalize_tag("playful"), Some("#playful".to_string()));
        assert_eq!(normalize_tag("  #calm "), Some("#calm".to_string()));
        assert_eq!(normalize_tag("#"), None);
        assert_eq!(normalize_tag("   "), None);
    }

    #[test]
    fn normalize_tags_dedupes_in_first_seen_order() {
        let raw = vec![
            "quiet".to_string(),
            "#vocal".to_string(),
            "#quiet".to_string(),
            "".to_string(),
        ];
        assert_eq!(
            normalize_tags(&raw).unwrap(),
            vec!["#quiet".to_string(), "#vocal".to_string()]
        );
    }

    #[test]
    fn normalize_tags_is_case_sensitive() {
        let raw = vec!["#Calm".to_string(), "#calm".to_string()];
        assert_eq!(normalize_tags(&raw).unwrap().len(), 2);
    }

    #[test]
    fn too_many_tags_rejected() {
        let raw: Vec<String> = (0..=MAX_TAGS_PER_REVIEW).map(|i| format!("t{i}")).collect();
        assert!(normalize_tags(&raw).is_err());
    }

    #[test]
    fn overlong_tag_rejected() {
        let raw = vec!["x".repeat(MAX_TAG_LENGTH)];
        let err = normalize_tags(&raw).unwrap_err();
        assert!(err.to_string().contains("maximum length"));
    }
}
