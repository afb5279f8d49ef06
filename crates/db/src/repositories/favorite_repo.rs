//! Repository for the `favorites` table.

use catbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::{Favorite, FavoriteToggle};

const COLUMNS: &str = "id, user_id, breed_id, created_at";

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Flip the favorite flag for (user, breed).
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        breed_id: DbId,
    ) -> Result<FavoriteToggle, sqlx::Error> {
        let removed = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND breed_id = $2")
            .bind(user_id)
            .bind(breed_id)
            .execute(pool)
            .await?;

        if removed.rows_affected() > 0 {
            return Ok(FavoriteToggle {
                breed_id,
                favorited: false,
            });
        }

        sqlx::query(
            "INSERT INTO favorites (user_id, breed_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_favorites_user_breed DO NOTHING",
        )
        .bind(user_id)
        .bind(breed_id)
        .execute(pool)
        .await?;

        Ok(FavoriteToggle {
            breed_id,
            favorited: true,
        })
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        breed_id: DbId,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM favorites WHERE user_id = $1 AND breed_id = $2");
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(breed_id)
            .fetch_optional(pool)
            .await
    }
}
