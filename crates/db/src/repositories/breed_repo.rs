//! Repository for the `breeds` table.

use catbase_core::aspect::AspectRatings;
use catbase_core::listing::BreedSort;
use catbase_core::rating::RatingSummary;
use catbase_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::breed::{Breed, BreedRatingSummary, BreedView, CreateBreed, UpdateBreed};

/// Breed columns, qualified with the `b` alias.
pub(crate) const COLUMNS: &str = "b.id, b.name, b.origin, b.description, b.history, \
    b.appearance, b.temperament, b.care_instructions, b.image_url, b.like_count, \
    b.dislike_count, b.review_count, b.view_count, b.average_ratings, b.overall_rating, \
    b.created_by, b.created_at, b.updated_at";

/// Per-viewer columns. `$1` is the viewer id (NULL for anonymous viewers).
pub(crate) const VIEWER_COLUMNS: &str = "(SELECT br.reaction_type FROM breed_reactions br \
        WHERE br.breed_id = b.id AND br.user_id = $1) AS viewer_reaction, \
    EXISTS (SELECT 1 FROM favorites f \
        WHERE f.breed_id = b.id AND f.user_id = $1) AS is_favorited";

/// Filters for the breed list.
#[derive(Debug, Clone, Default)]
pub struct BreedListParams {
    /// Case-insensitive substring matched against name and origin.
    pub q: Option<String>,
    pub sort: BreedSort,
    pub limit: i64,
    pub offset: i64,
}

fn order_clause(sort: BreedSort) -> &'static str {
    match sort {
        BreedSort::Name => "b.name ASC",
        BreedSort::Rating => "b.overall_rating DESC NULLS LAST, b.review_count DESC, b.name ASC",
        BreedSort::Popular => "b.like_count DESC, b.view_count DESC, b.name ASC",
    }
}

pub struct BreedRepo;

impl BreedRepo {
    /// List breeds as seen by `viewer`.
    pub async fn list(
        pool: &PgPool,
        viewer: Option<DbId>,
        params: &BreedListParams,
    ) -> Result<Vec<BreedView>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {VIEWER_COLUMNS}
             FROM breeds b
             WHERE ($2::text IS NULL
                    OR b.name ILIKE '%' || $2 || '%'
                    OR b.origin ILIKE '%' || $2 || '%')
             ORDER BY {}
             LIMIT $3 OFFSET $4",
            order_clause(params.sort)
        );
        let q = params.q.as_deref().map(str::trim).filter(|s| !s.is_empty());
        sqlx::query_as::<_, BreedView>(&query)
            .bind(viewer)
            .bind(q)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
    }

    /// Number of breeds matching the same search as [`list`](Self::list).
    pub async fn count(pool: &PgPool, q: Option<&str>) -> Result<i64, sqlx::Error> {
        let q = q.map(str::trim).filter(|s| !s.is_empty());
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM breeds b
             WHERE ($1::text IS NULL
                    OR b.name ILIKE '%' || $1 || '%'
                    OR b.origin ILIKE '%' || $1 || '%')",
        )
        .bind(q)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breeds b WHERE b.id = $1");
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One breed as seen by `viewer`.
    pub async fn find_view(
        pool: &PgPool,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<BreedView>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS}, {VIEWER_COLUMNS} FROM breeds b WHERE b.id = $2");
        sqlx::query_as::<_, BreedView>(&query)
            .bind(viewer)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM breeds WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// Insert a breed with empty aggregates.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBreed,
        created_by: DbId,
    ) -> Result<Breed, sqlx::Error> {
        let query = format!(
            "INSERT INTO breeds AS b
                (name, origin, description, history, appearance, temperament,
                 care_instructions, image_url, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(input.name.trim())
            .bind(&input.origin)
            .bind(&input.description)
            .bind(&input.history)
            .bind(&input.appearance)
            .bind(&input.temperament)
            .bind(&input.care_instructions)
            .bind(&input.image_url)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Apply the present fields of `input`. Returns `None` if the breed does
    /// not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBreed,
    ) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!(
            "UPDATE breeds AS b SET
                name = COALESCE($2, b.name),
                origin = COALESCE($3, b.origin),
                description = COALESCE($4, b.description),
                history = COALESCE($5, b.history),
                appearance = COALESCE($6, b.appearance),
                temperament = COALESCE($7, b.temperament),
                care_instructions = COALESCE($8, b.care_instructions),
                image_url = COALESCE($9, b.image_url)
             WHERE b.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.origin)
            .bind(&input.description)
            .bind(&input.history)
            .bind(&input.appearance)
            .bind(&input.temperament)
            .bind(&input.care_instructions)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a breed together with its reviews, votes and favorites.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM breeds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count one detail-page view.
    pub async fn increment_view(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE breeds SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute the rating aggregate from the breed's live top-level
    /// reviews and store it.
    ///
    /// Takes a connection so it can run inside the transaction that changed
    /// the reviews.
    pub async fn refresh_rating_summary(
        conn: &mut PgConnection,
        breed_id: DbId,
    ) -> Result<BreedRatingSummary, sqlx::Error> {
        let rows: Vec<(Option<Json<AspectRatings>>,)> = sqlx::query_as(
            "SELECT ratings FROM reviews
             WHERE breed_id = $1 AND parent_id IS NULL AND is_deleted = FALSE
             ORDER BY id",
        )
        .bind(breed_id)
        .fetch_all(&mut *conn)
        .await?;

        let ratings: Vec<Option<AspectRatings>> =
            rows.into_iter().map(|(r,)| r.map(|Json(r)| r)).collect();
        let summary = RatingSummary::from_top_level_ratings(&ratings);

        let updated = sqlx::query_as::<_, BreedRatingSummary>(
            "UPDATE breeds SET
                average_ratings = $2,
                overall_rating = $3,
                review_count = $4
             WHERE id = $1
             RETURNING id AS breed_id, average_ratings, overall_rating, review_count",
        )
        .bind(breed_id)
        .bind(Json(&summary.averages))
        .bind(summary.overall)
        .bind(summary.review_count)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!(
            breed_id,
            review_count = updated.review_count,
            overall = ?updated.overall_rating,
            "Refreshed breed rating summary"
        );
        Ok(updated)
    }

    /// Breeds the user has favorited, most recently favorited first.
    pub async fn list_favorites(pool: &PgPool, user_id: DbId) -> Result<Vec<BreedView>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {VIEWER_COLUMNS}
             FROM favorites fav
             JOIN breeds b ON b.id = fav.breed_id
             WHERE fav.user_id = $1
             ORDER BY fav.created_at DESC, fav.id DESC"
        );
        sqlx::query_as::<_, BreedView>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
