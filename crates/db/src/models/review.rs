//! Review rows and DTOs.

use catbase_core::aspect::AspectRatings;
use catbase_core::review::Review;
use catbase_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use ts_rs::TS;

/// A flat row from `reviews` joined with the author's name and the current
/// viewer's reaction.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: DbId,
    pub breed_id: DbId,
    pub user_id: DbId,
    pub author_name: String,
    pub parent_id: Option<DbId>,
    pub message: String,
    pub ratings: Option<Json<AspectRatings>>,
    pub tags: Json<Vec<String>>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub viewer_reaction: Option<String>,
}

impl ReviewRow {
    /// Convert into the domain type. Stored `0` scores are dropped and an
    /// unrecognized reaction value reads as "no reaction".
    pub fn into_review(self) -> Review {
        Review {
            id: self.id,
            breed_id: self.breed_id,
            author_id: self.user_id,
            author_name: self.author_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            message: self.message,
            ratings: self
                .ratings
                .map(|Json(r)| r.normalized())
                .filter(|r| !r.is_empty()),
            tags: self.tags.0,
            parent_id: self.parent_id,
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            viewer_reaction: self.viewer_reaction.as_deref().and_then(|r| r.parse().ok()),
            replies: Vec::new(),
        }
    }
}

/// Insert DTO. Message, ratings and tags are validated and normalized by
/// the caller.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub breed_id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub message: String,
    pub ratings: Option<AspectRatings>,
    pub tags: Vec<String>,
}

/// One of the viewer's own top-level reviews, with the breed it is about.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct UserReview {
    pub id: DbId,
    pub breed_id: DbId,
    pub breed_name: String,
    pub message: String,
    #[ts(type = "Record<string, number> | null")]
    pub ratings: Option<Json<AspectRatings>>,
    #[ts(type = "string[]")]
    pub tags: Json<Vec<String>>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
