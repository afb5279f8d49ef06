//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use catbase_core::error::CoreError;
use catbase_core::types::DbId;
use catbase_core::viewer::ViewerContext;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a Bearer token in the `Authorization`
/// header. Rejects the request with 401 when the header is missing or the
/// token does not validate.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, role = %auth.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// `"admin"` or `"user"`.
    pub role: String,
}

impl AuthUser {
    pub fn viewer(&self) -> ViewerContext {
        ViewerContext::authenticated(self.user_id, self.role.clone())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        authenticate(auth_header, state)
    }
}

/// Optional authentication for public routes that personalize their output.
///
/// No `Authorization` header means an anonymous viewer. A header that is
/// present but invalid is still rejected with 401, so a client with an
/// expired token learns to refresh instead of silently losing its view.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    /// `None` for anonymous viewers.
    pub fn user_id(&self) -> Option<DbId> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get("authorization") {
            None => Ok(MaybeAuthUser(None)),
            Some(value) => {
                let header = value.to_str().map_err(|_| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization header".into(),
                    ))
                })?;
                authenticate(header, state).map(|user| MaybeAuthUser(Some(user)))
            }
        }
    }
}

fn authenticate(auth_header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    })
}
