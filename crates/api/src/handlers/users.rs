//! Handlers for the `/users` resource (self-registration).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catbase_core::error::CoreError;
use catbase_core::roles::{DEFAULT_ROLE_ID, ROLE_USER};
use catbase_db::models::user::{CreateUser, UserResponse};
use catbase_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
}

/// POST /api/v1/users
///
/// Register a new account with the `user` role.
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input.username = input.username.trim().to_string();
    input.email = input.email.trim().to_string();
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still slip past the checks above; the
    // unique constraints turn that into a 409.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role_id: DEFAULT_ROLE_ID,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from_user(&user, ROLE_USER.to_string()),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "long-enough".to_string(),
        }
    }

    #[test]
    fn username_length_is_bounded() {
        assert!(request("ab", "a@b.test").validate().is_err());
        assert!(request("abc", "a@b.test").validate().is_ok());
        assert!(request(&"x".repeat(51), "a@b.test").validate().is_err());
    }

    #[test]
    fn email_must_be_well_formed() {
        let errors = request("tabby", "not-an-email").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
