//! Handlers for the caller's favorite breeds.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use catbase_core::error::CoreError;
use catbase_core::types::DbId;
use catbase_db::models::breed::BreedView;
use catbase_db::repositories::{BreedRepo, FavoriteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let breeds: Vec<BreedView> = BreedRepo::list_favorites(&state.pool, auth.user_id)
        .await?
        .into_iter()
        .map(BreedView::rounded_for_display)
        .collect();
    Ok(Json(DataResponse { data: breeds }))
}

/// POST /api/v1/favorites/{breed_id}
///
/// Add the breed to the caller's favorites, or remove it if already there.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(breed_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !BreedRepo::exists(&state.pool, breed_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Breed",
            id: breed_id,
        }));
    }

    let toggle = FavoriteRepo::toggle(&state.pool, auth.user_id, breed_id).await?;
    tracing::info!(
        user_id = auth.user_id,
        breed_id,
        favorited = toggle.favorited,
        "Favorite toggled"
    );

    Ok(Json(DataResponse { data: toggle }))
}
