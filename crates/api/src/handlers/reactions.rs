//! Like/dislike toggles on breeds and reviews.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use catbase_core::error::CoreError;
use catbase_core::types::DbId;
use catbase_core::vote::Reaction;
use catbase_db::models::reaction::ReactionTarget;
use catbase_db::repositories::ReactionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the `/react` endpoints.
#[derive(Debug, Deserialize)]
pub struct ReactRequest {
    /// `"like"` or `"dislike"`.
    pub reaction_type: String,
}

async fn toggle(
    state: &AppState,
    auth: &AuthUser,
    target: ReactionTarget,
    target_id: DbId,
    input: &ReactRequest,
) -> AppResult<impl IntoResponse> {
    let requested: Reaction = input.reaction_type.trim().parse()?;

    let vote = ReactionRepo::toggle(&state.pool, target, target_id, auth.user_id, requested)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: target.entity_name(),
            id: target_id,
        }))?;

    tracing::info!(
        user_id = auth.user_id,
        target_id,
        entity = target.entity_name(),
        reaction = ?vote.reaction,
        "Reaction toggled"
    );

    Ok(Json(DataResponse { data: vote }))
}

/// POST /api/v1/breeds/{id}/react
///
/// Repeating the held reaction clears it; the opposite one replaces it.
pub async fn react_to_breed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReactRequest>,
) -> AppResult<impl IntoResponse> {
    toggle(&state, &auth, ReactionTarget::Breed, id, &input).await
}

/// POST /api/v1/reviews/{id}/react
pub async fn react_to_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReactRequest>,
) -> AppResult<impl IntoResponse> {
    toggle(&state, &auth, ReactionTarget::Review, id, &input).await
}
