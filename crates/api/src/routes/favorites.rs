use axum::routing::{get, post};
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Routes mounted at `/favorites`. All require auth.
///
/// ```text
/// GET  /             -> list_favorites
/// POST /{breed_id}   -> toggle_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list_favorites))
        .route("/{breed_id}", post(favorites::toggle_favorite))
}
