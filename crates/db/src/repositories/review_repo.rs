//! Repository for the `reviews` table.
//!
//! Every write that can change a breed's ratings refreshes the breed's
//! aggregate inside the same transaction.

use catbase_core::review::ReviewPatch;
use catbase_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::breed::BreedRatingSummary;
use crate::models::review::{CreateReview, ReviewRow, UserReview};
use crate::repositories::BreedRepo;

/// Review columns joined with the author name. `$1` is the viewer id.
const SELECT_ROW: &str = "SELECT r.id, r.breed_id, r.user_id, u.username AS author_name, \
        r.parent_id, r.message, r.ratings, r.tags, r.like_count, r.dislike_count, \
        r.is_deleted, r.created_at, r.updated_at, \
        (SELECT rr.reaction_type FROM review_reactions rr \
            WHERE rr.review_id = r.id AND rr.user_id = $1) AS viewer_reaction \
    FROM reviews r \
    JOIN users u ON u.id = r.user_id";

pub struct ReviewRepo;

impl ReviewRepo {
    /// All live reviews and replies of a breed, oldest first.
    ///
    /// Rows are flat; replies whose parent was deleted are still returned and
    /// are left for the caller to drop when building the tree.
    pub async fn list_for_breed(
        pool: &PgPool,
        breed_id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Vec<ReviewRow>, sqlx::Error> {
        let query = format!(
            "{SELECT_ROW}
             WHERE r.breed_id = $2 AND r.is_deleted = FALSE
             ORDER BY r.created_at ASC, r.id ASC"
        );
        sqlx::query_as::<_, ReviewRow>(&query)
            .bind(viewer)
            .bind(breed_id)
            .fetch_all(pool)
            .await
    }

    /// A live review by id.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<ReviewRow>, sqlx::Error> {
        let query = format!("{SELECT_ROW} WHERE r.id = $2 AND r.is_deleted = FALSE");
        sqlx::query_as::<_, ReviewRow>(&query)
            .bind(viewer)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Whether the review and every ancestor above it are live.
    ///
    /// A live reply under a deleted ancestor is hidden from the breed's
    /// review tree, so it does not count as visible.
    pub async fn is_visible<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (visible,): (bool,) = sqlx::query_as(
            "WITH RECURSIVE chain AS (
                 SELECT id, parent_id, is_deleted FROM reviews WHERE id = $1
                 UNION ALL
                 SELECT r.id, r.parent_id, r.is_deleted
                 FROM reviews r
                 JOIN chain c ON r.id = c.parent_id
             )
             SELECT EXISTS (SELECT 1 FROM chain)
                AND NOT EXISTS (SELECT 1 FROM chain WHERE is_deleted)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(visible)
    }

    /// Insert a review or reply and refresh the breed aggregate.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReview,
    ) -> Result<(ReviewRow, BreedRatingSummary), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO reviews (breed_id, user_id, parent_id, message, ratings, tags)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(input.breed_id)
        .bind(input.user_id)
        .bind(input.parent_id)
        .bind(&input.message)
        .bind(input.ratings.as_ref().map(Json))
        .bind(Json(&input.tags))
        .fetch_one(&mut *tx)
        .await?;

        let row = Self::find_by_id(&mut *tx, id, Some(input.user_id))
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let summary = BreedRepo::refresh_rating_summary(&mut *tx, input.breed_id).await?;

        tx.commit().await?;
        Ok((row, summary))
    }

    /// Replace a live review's message, ratings and tags.
    ///
    /// Returns `None` if the review does not exist or is deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &ReviewPatch,
        viewer: DbId,
    ) -> Result<Option<(ReviewRow, BreedRatingSummary)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE reviews SET message = $2, ratings = $3, tags = $4
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING breed_id",
        )
        .bind(id)
        .bind(&patch.message)
        .bind(patch.ratings.as_ref().map(Json))
        .bind(Json(&patch.tags))
        .fetch_optional(&mut *tx)
        .await?;

        let Some((breed_id,)) = updated else {
            return Ok(None);
        };

        let row = Self::find_by_id(&mut *tx, id, Some(viewer))
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let summary = BreedRepo::refresh_rating_summary(&mut *tx, breed_id).await?;

        tx.commit().await?;
        Ok(Some((row, summary)))
    }

    /// Soft-delete a review, replacing its text with `stamp`.
    ///
    /// Replies stay in the table but disappear from the breed's review tree
    /// along with their deleted ancestor. Returns `None` if the review does
    /// not exist or is already deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        stamp: &str,
    ) -> Result<Option<BreedRatingSummary>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(DbId,)> = sqlx::query_as(
            "UPDATE reviews SET is_deleted = TRUE, message = $2
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING breed_id",
        )
        .bind(id)
        .bind(stamp)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((breed_id,)) = deleted else {
            return Ok(None);
        };

        let summary = BreedRepo::refresh_rating_summary(&mut *tx, breed_id).await?;
        tx.commit().await?;
        Ok(Some(summary))
    }

    /// The user's live top-level reviews, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<UserReview>, sqlx::Error> {
        sqlx::query_as::<_, UserReview>(
            "SELECT r.id, r.breed_id, b.name AS breed_name, r.message, r.ratings, r.tags,
                    r.like_count, r.dislike_count, r.created_at, r.updated_at
             FROM reviews r
             JOIN breeds b ON b.id = r.breed_id
             WHERE r.user_id = $1 AND r.parent_id IS NULL AND r.is_deleted = FALSE
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
