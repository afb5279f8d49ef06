//! Who is looking at the catalog, and what they are allowed to change.
//!
//! Handlers receive a [`ViewerContext`] explicitly instead of reading
//! ambient session state, so permission checks are plain function calls.

use crate::error::CoreError;
use crate::review::Review;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewerContext {
    user_id: Option<DbId>,
    role: Option<String>,
}

impl ViewerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            role: Some(role.into()),
        }
    }

    pub fn user_id(&self) -> Option<DbId> {
        self.user_id
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ROLE_ADMIN)
    }

    pub fn is_owner(&self, author_id: DbId) -> bool {
        self.user_id == Some(author_id)
    }

    /// Only the author may edit a review.
    pub fn can_edit_review(&self, review: &Review) -> bool {
        self.is_owner(review.author_id)
    }

    /// The author or an admin may delete a review.
    pub fn can_delete_review(&self, review: &Review) -> bool {
        self.is_owner(review.author_id) || self.is_admin()
    }

    /// The viewer's id, or `Unauthorized` for anonymous viewers.
    pub fn require_user(&self) -> Result<DbId, CoreError> {
        self.user_id
            .ok_or_else(|| CoreError::Unauthorized("Sign in required".to_string()))
    }

    pub fn require_edit(&self, review: &Review) -> Result<(), CoreError> {
        self.require_user()?;
        if self.can_edit_review(review) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the author can edit this review".to_string(),
            ))
        }
    }

    pub fn require_delete(&self, review: &Review) -> Result<(), CoreError> {
        self.require_user()?;
        if self.can_delete_review(review) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the author or an admin can delete this review".to_string(),
            ))
        }
    }

    /// Message stored in place of the text when this viewer deletes `review`.
    pub fn deletion_message(&self, review: &Review) -> &'static str {
        if self.is_owner(review.author_id) {
            crate::review::DELETED_BY_AUTHOR_MESSAGE
        } else {
            crate::review::DELETED_BY_MODERATOR_MESSAGE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{DELETED_BY_AUTHOR_MESSAGE, DELETED_BY_MODERATOR_MESSAGE};
    use crate::roles::ROLE_USER;
    use chrono::Utc;

    fn review_by(author_id: DbId) -> Review {
        let now = Utc::now();
        Review {
            id: 1,
            breed_id: 1,
            author_id,
            author_name: "author".to_string(),
            created_at: now,
            updated_at: now,
            message: "text".to_string(),
            ratings: None,
            tags: Vec::new(),
            parent_id: None,
            like_count: 0,
            dislike_count: 0,
            viewer_reaction: None,
            replies: Vec::new(),
        }
    }

    #[test]
    fn anonymous_viewer_cannot_do_anything() {
        let viewer = ViewerContext::anonymous();
        let review = review_by(5);
        assert!(!viewer.is_authenticated());
        assert!(!viewer.can_edit_review(&review));
        assert!(!viewer.can_delete_review(&review));
        assert!(matches!(
            viewer.require_edit(&review),
            Err(CoreError::Unauthorized(_))
        ));
    }

    #[test]
    fn author_can_edit_and_delete() {
        let viewer = ViewerContext::authenticated(5, ROLE_USER);
        let review = review_by(5);
        assert!(viewer.require_edit(&review).is_ok());
        assert!(viewer.require_delete(&review).is_ok());
        assert_eq!(viewer.deletion_message(&review), DELETED_BY_AUTHOR_MESSAGE);
    }

    #[test]
    fn other_user_is_forbidden() {
        let viewer = ViewerContext::authenticated(6, ROLE_USER);
        let review = review_by(5);
        assert!(matches!(
            viewer.require_edit(&review),
            Err(CoreError::Forbidden(_))
        ));
        assert!(matches!(
            viewer.require_delete(&review),
            Err(CoreError::Forbidden(_))
        ));
    }

    #[test]
    fn admin_can_delete_but_not_edit_others() {
        let viewer = ViewerContext::authenticated(1, ROLE_ADMIN);
        let review = review_by(5);
        assert!(viewer.is_admin());
        assert!(viewer.require_delete(&review).is_ok());
        assert!(viewer.require_edit(&review).is_err());
        assert_eq!(viewer.deletion_message(&review), DELETED_BY_MODERATOR_MESSAGE);
    }
}
