//! Route definitions for the `/reviews` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{reactions, reviews};
use crate::state::AppState;

/// Routes mounted at `/reviews`. All require auth.
///
/// ```text
/// POST   /            -> create_review
/// GET    /me          -> list_my_reviews
/// PUT    /{id}        -> update_review
/// DELETE /{id}        -> delete_review
/// POST   /{id}/react  -> react_to_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::create_review))
        .route("/me", get(reviews::list_my_reviews))
        .route(
            "/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/{id}/react", post(reactions::react_to_review))
}
