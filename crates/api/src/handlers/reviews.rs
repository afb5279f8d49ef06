//! Handlers for the `/reviews` resource.
//!
//! Every mutation answers with the breed's rating summary as recomputed from
//! the stored reviews, so clients replace their cached aggregate instead of
//! adjusting it locally.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catbase_core::aspect::{validate_ratings, AspectRatings};
use catbase_core::error::CoreError;
use catbase_core::review::{
    normalize_tags, validate_message, validate_reply_ratings, Review, ReviewPatch,
};
use catbase_core::types::DbId;
use catbase_db::models::breed::BreedRatingSummary;
use catbase_db::models::review::CreateReview;
use catbase_db::repositories::{BreedRepo, ReviewRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub breed_id: DbId,
    /// Set to reply to another review of the same breed.
    pub parent_id: Option<DbId>,
    pub message: String,
    pub ratings: Option<AspectRatings>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub message: String,
    pub ratings: Option<AspectRatings>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewMutation {
    pub review: Review,
    pub breed_rating: BreedRatingSummary,
}

#[derive(Debug, Serialize)]
pub struct ReviewDeletion {
    pub review_id: DbId,
    pub breed_rating: BreedRatingSummary,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn review_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Review",
        id,
    })
}

/// Validate and normalize submitted content. Unset (`0`) scores are dropped
/// and an all-unset rating set becomes `None`.
fn prepare_content(
    parent_id: Option<DbId>,
    message: &str,
    ratings: Option<AspectRatings>,
    tags: &[String],
) -> Result<ReviewPatch, CoreError> {
    validate_message(message)?;
    if let Some(r) = &ratings {
        validate_ratings(r)?;
    }
    validate_reply_ratings(parent_id, ratings.as_ref())?;

    Ok(ReviewPatch {
        message: message.trim().to_string(),
        ratings: ratings.map(|r| r.normalized()).filter(|r| !r.is_empty()),
        tags: normalize_tags(tags)?,
    })
}

async fn load_review(state: &AppState, id: DbId, viewer: DbId) -> AppResult<Review> {
    ReviewRepo::find_by_id(&state.pool, id, Some(viewer))
        .await?
        .map(|row| row.into_review())
        .ok_or_else(|| review_not_found(id))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/reviews
///
/// Post a top-level review or a reply. Replies must not carry ratings.
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = auth.viewer().require_user()?;
    let content = prepare_content(input.parent_id, &input.message, input.ratings, &input.tags)?;

    if !BreedRepo::exists(&state.pool, input.breed_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Breed",
            id: input.breed_id,
        }));
    }

    if let Some(parent_id) = input.parent_id {
        let parent = ReviewRepo::find_by_id(&state.pool, parent_id, None)
            .await?
            .ok_or_else(|| review_not_found(parent_id))?;
        // A live reply under a deleted review is not shown, so it cannot be
        // replied to either.
        if !ReviewRepo::is_visible(&state.pool, parent_id).await? {
            return Err(review_not_found(parent_id));
        }
        if parent.breed_id != input.breed_id {
            return Err(AppError::BadRequest(
                "Reply must belong to the same breed as its parent review".into(),
            ));
        }
    }

    let (row, summary) = ReviewRepo::create(
        &state.pool,
        &CreateReview {
            breed_id: input.breed_id,
            user_id,
            parent_id: input.parent_id,
            message: content.message,
            ratings: content.ratings,
            tags: content.tags,
        },
    )
    .await?;

    tracing::info!(
        review_id = row.id,
        breed_id = row.breed_id,
        user_id,
        is_reply = row.parent_id.is_some(),
        "Review created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ReviewMutation {
                review: row.into_review(),
                breed_rating: summary.rounded_for_display(),
            },
        }),
    ))
}

/// PUT /api/v1/reviews/{id}
///
/// Replace message, ratings and tags. Author only.
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let viewer = auth.viewer();
    let existing = load_review(&state, id, auth.user_id).await?;
    viewer.require_edit(&existing)?;

    let patch = prepare_content(existing.parent_id, &input.message, input.ratings, &input.tags)?;

    let (row, summary) = ReviewRepo::update(&state.pool, id, &patch, auth.user_id)
        .await?
        .ok_or_else(|| review_not_found(id))?;

    tracing::info!(review_id = id, user_id = auth.user_id, "Review updated");

    Ok(Json(DataResponse {
        data: ReviewMutation {
            review: row.into_review(),
            breed_rating: summary.rounded_for_display(),
        },
    }))
}

/// DELETE /api/v1/reviews/{id}
///
/// Soft delete. Allowed for the author and for admins; the stored text is
/// replaced with a stamp naming who removed it.
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let viewer = auth.viewer();
    let existing = load_review(&state, id, auth.user_id).await?;
    viewer.require_delete(&existing)?;

    let stamp = viewer.deletion_message(&existing);
    let summary = ReviewRepo::soft_delete(&state.pool, id, stamp)
        .await?
        .ok_or_else(|| review_not_found(id))?;

    tracing::info!(
        review_id = id,
        user_id = auth.user_id,
        moderated = !viewer.is_owner(existing.author_id),
        "Review deleted"
    );

    Ok(Json(DataResponse {
        data: ReviewDeletion {
            review_id: id,
            breed_rating: summary.rounded_for_display(),
        },
    }))
}

/// GET /api/v1/reviews/me
///
/// The caller's own top-level reviews, newest first.
pub async fn list_my_reviews(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let reviews = ReviewRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}
