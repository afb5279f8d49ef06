//! Public handlers for the `/breeds` resource.
//!
//! All of these accept an optional Bearer token; when present, the viewer's
//! reaction and favorite flag are filled in.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use catbase_core::error::CoreError;
use catbase_core::listing::{
    clamp_limit, clamp_offset, BreedSort, ReviewSort, DEFAULT_BREED_LIMIT, MAX_BREED_LIMIT,
};
use catbase_core::review::Review;
use catbase_core::review_tree::ReviewTree;
use catbase_core::tags::{tag_frequencies, DEFAULT_TOP_TAGS, MAX_TOP_TAGS};
use catbase_core::types::DbId;
use catbase_db::models::breed::BreedView;
use catbase_db::models::reaction::ReactionTarget;
use catbase_db::models::review::ReviewRow;
use catbase_db::repositories::breed_repo::BreedListParams;
use catbase_db::repositories::{BreedRepo, ReactionRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::query::{BreedListQuery, ReviewListQuery, TagListQuery};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

fn breed_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Breed", id })
}

async fn ensure_breed_exists(state: &AppState, id: DbId) -> AppResult<()> {
    if BreedRepo::exists(&state.pool, id).await? {
        Ok(())
    } else {
        Err(breed_not_found(id))
    }
}

/// Live reviews of a breed as domain values.
async fn load_reviews(
    state: &AppState,
    breed_id: DbId,
    viewer: Option<DbId>,
) -> AppResult<Vec<Review>> {
    let rows = ReviewRepo::list_for_breed(&state.pool, breed_id, viewer).await?;
    Ok(rows.into_iter().map(ReviewRow::into_review).collect())
}

/// GET /api/v1/breeds?q=&sort=&limit=&offset=
pub async fn list_breeds(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(query): Query<BreedListQuery>,
) -> AppResult<impl IntoResponse> {
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<BreedSort>)
        .transpose()?
        .unwrap_or_default();
    let params = BreedListParams {
        q: query.q,
        sort,
        limit: clamp_limit(query.limit, DEFAULT_BREED_LIMIT, MAX_BREED_LIMIT),
        offset: clamp_offset(query.offset),
    };

    let items: Vec<BreedView> = BreedRepo::list(&state.pool, viewer.user_id(), &params)
        .await?
        .into_iter()
        .map(BreedView::rounded_for_display)
        .collect();
    let total = BreedRepo::count(&state.pool, params.q.as_deref()).await?;

    Ok(Json(DataResponse {
        data: Page {
            items,
            total,
            limit: params.limit,
            offset: params.offset,
        },
    }))
}

/// GET /api/v1/breeds/{id}
///
/// Breed detail. Each call counts as one view.
pub async fn get_breed(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !BreedRepo::increment_view(&state.pool, id).await? {
        return Err(breed_not_found(id));
    }
    let breed = BreedRepo::find_view(&state.pool, id, viewer.user_id())
        .await?
        .ok_or_else(|| breed_not_found(id))?;

    Ok(Json(DataResponse {
        data: breed.rounded_for_display(),
    }))
}

/// GET /api/v1/breeds/{id}/reviews?sort=recent|votes
///
/// Top-level reviews with their reply threads. Replies under a deleted
/// review are not shown.
pub async fn list_breed_reviews(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<DbId>,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<impl IntoResponse> {
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<ReviewSort>)
        .transpose()?
        .unwrap_or_default();
    ensure_breed_exists(&state, id).await?;

    let tree = ReviewTree::from_flat(load_reviews(&state, id, viewer.user_id()).await?);
    Ok(Json(DataResponse {
        data: tree.ordered(sort),
    }))
}

/// GET /api/v1/breeds/{id}/tags?limit=
///
/// Tags on the breed's top-level reviews, most used first.
pub async fn list_breed_tags(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<TagListQuery>,
) -> AppResult<impl IntoResponse> {
    ensure_breed_exists(&state, id).await?;
    let limit = clamp_limit(query.limit, DEFAULT_TOP_TAGS as i64, MAX_TOP_TAGS as i64) as usize;

    let reviews = load_reviews(&state, id, None).await?;
    let mut tags = tag_frequencies(&reviews);
    tags.truncate(limit);

    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/breeds/{id}/reactions
pub async fn get_breed_reactions(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stats = ReactionRepo::stats(&state.pool, ReactionTarget::Breed, id, viewer.user_id())
        .await?
        .ok_or_else(|| breed_not_found(id))?;
    Ok(Json(DataResponse { data: stats }))
}
