//! Admin-only breed management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catbase_core::breed::{validate_breed_name, validate_breed_text};
use catbase_core::error::CoreError;
use catbase_core::types::DbId;
use catbase_db::models::breed::{CreateBreed, UpdateBreed};
use catbase_db::repositories::BreedRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn breed_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Breed", id })
}

/// Length checks on the long-form fields shared by create and update.
fn validate_texts(fields: [(&str, Option<&str>); 6]) -> Result<(), CoreError> {
    fields
        .into_iter()
        .try_for_each(|(field, value)| validate_breed_text(field, value))
}

/// POST /api/v1/admin/breeds
pub async fn create_breed(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateBreed>,
) -> AppResult<impl IntoResponse> {
    validate_breed_name(&input.name)?;
    validate_texts([
        ("description", input.description.as_deref()),
        ("history", input.history.as_deref()),
        ("appearance", input.appearance.as_deref()),
        ("temperament", input.temperament.as_deref()),
        ("care instructions", input.care_instructions.as_deref()),
        ("origin", input.origin.as_deref()),
    ])?;

    let breed = BreedRepo::create(&state.pool, &input, admin.user_id).await?;
    tracing::info!(breed_id = breed.id, user_id = admin.user_id, name = %breed.name, "Breed created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: breed.rounded_for_display(),
        }),
    ))
}

/// PUT /api/v1/admin/breeds/{id}
///
/// Only the fields present in the body are changed.
pub async fn update_breed(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBreed>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_breed_name(name)?;
    }
    validate_texts([
        ("description", input.description.as_deref()),
        ("history", input.history.as_deref()),
        ("appearance", input.appearance.as_deref()),
        ("temperament", input.temperament.as_deref()),
        ("care instructions", input.care_instructions.as_deref()),
        ("origin", input.origin.as_deref()),
    ])?;

    let breed = BreedRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| breed_not_found(id))?;
    tracing::info!(breed_id = id, user_id = admin.user_id, "Breed updated");

    Ok(Json(DataResponse {
        data: breed.rounded_for_display(),
    }))
}

/// DELETE /api/v1/admin/breeds/{id}
///
/// Removes the breed with its reviews, votes and favorites.
pub async fn delete_breed(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BreedRepo::delete(&state.pool, id).await? {
        return Err(breed_not_found(id));
    }
    tracing::info!(breed_id = id, user_id = admin.user_id, "Breed deleted");
    Ok(StatusCode::NO_CONTENT)
}
