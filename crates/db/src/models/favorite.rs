//! Favorite breed rows.

use catbase_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub breed_id: DbId,
    pub created_at: Timestamp,
}

/// Result of toggling a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FavoriteToggle {
    pub breed_id: DbId,
    pub favorited: bool,
}
