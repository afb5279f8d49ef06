//! Route definitions for `/admin`.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the `admin` role.
///
/// ```text
/// POST   /breeds       -> create_breed
/// PUT    /breeds/{id}  -> update_breed
/// DELETE /breeds/{id}  -> delete_breed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/breeds", post(admin::create_breed))
        .route(
            "/breeds/{id}",
            put(admin::update_breed).delete(admin::delete_breed),
        )
}
