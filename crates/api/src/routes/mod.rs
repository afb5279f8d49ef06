pub mod admin;
pub mod auth;
pub mod breeds;
pub mod favorites;
pub mod health;
pub mod reviews;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users                          register (public)
///
/// /auth/login                     login (public)
/// /auth/refresh                   refresh (public)
/// /auth/logout                    logout (requires auth)
/// /auth/me                        current user (requires auth)
///
/// /breeds                         list (public, optional auth)
/// /breeds/{id}                    detail
/// /breeds/{id}/reviews            review threads
/// /breeds/{id}/tags               ranked tags
/// /breeds/{id}/reactions          vote counts
/// /breeds/{id}/react              toggle vote (requires auth)
///
/// /reviews                        create (requires auth)
/// /reviews/me                     own reviews
/// /reviews/{id}                   update (author), delete (author or admin)
/// /reviews/{id}/react             toggle vote
///
/// /favorites                      list (requires auth)
/// /favorites/{breed_id}           toggle
///
/// /admin/breeds                   create (admin only)
/// /admin/breeds/{id}              update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/auth", auth::router())
        .nest("/breeds", breeds::router())
        .nest("/reviews", reviews::router())
        .nest("/favorites", favorites::router())
        .nest("/admin", admin::router())
}
