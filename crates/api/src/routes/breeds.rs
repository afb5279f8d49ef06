//! Route definitions for the `/breeds` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{breeds, reactions};
use crate::state::AppState;

/// Routes mounted at `/breeds`.
///
/// ```text
/// GET  /                 -> list_breeds
/// GET  /{id}             -> get_breed
/// GET  /{id}/reviews     -> list_breed_reviews
/// GET  /{id}/tags        -> list_breed_tags
/// GET  /{id}/reactions   -> get_breed_reactions
/// POST /{id}/react       -> react_to_breed (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(breeds::list_breeds))
        .route("/{id}", get(breeds::get_breed))
        .route("/{id}/reviews", get(breeds::list_breed_reviews))
        .route("/{id}/tags", get(breeds::list_breed_tags))
        .route("/{id}/reactions", get(breeds::get_breed_reactions))
        .route("/{id}/react", post(reactions::react_to_breed))
}
