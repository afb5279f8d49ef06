//! Like/dislike votes on reviews and breeds.

use catbase_core::types::DbId;
use catbase_core::vote::{apply_reaction, Reaction, VoteState};
use sqlx::PgPool;

use crate::models::reaction::{ReactionTarget, VoteRecord};

pub struct ReactionRepo;

impl ReactionRepo {
    /// Apply a viewer's reaction request to a target.
    ///
    /// The target row is locked for the duration of the transaction, so
    /// concurrent toggles on the same target serialize. Returns `None` if the
    /// target does not exist (or is a deleted review).
    pub async fn toggle(
        pool: &PgPool,
        target: ReactionTarget,
        target_id: DbId,
        user_id: DbId,
        requested: Reaction,
    ) -> Result<Option<VoteState>, sqlx::Error> {
        let table = target.table();
        let vote_table = target.vote_table();
        let column = target.target_column();
        let live_filter = match target {
            ReactionTarget::Review => " AND is_deleted = FALSE",
            ReactionTarget::Breed => "",
        };

        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as(&format!(
            "SELECT id FROM {table} WHERE id = $1{live_filter} FOR UPDATE"
        ))
        .bind(target_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let existing: Option<VoteRecord> = sqlx::query_as(&format!(
            "SELECT id, {column} AS target_id, user_id, reaction_type, created_at
             FROM {vote_table}
             WHERE {column} = $1 AND user_id = $2"
        ))
        .bind(target_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let current = existing
            .as_ref()
            .and_then(|v| v.reaction_type.parse::<Reaction>().ok());
        let outcome = apply_reaction(current, requested);

        match (&existing, outcome.new_reaction) {
            (Some(vote), None) => {
                sqlx::query(&format!("DELETE FROM {vote_table} WHERE id = $1"))
                    .bind(vote.id)
                    .execute(&mut *tx)
                    .await?;
            }
            (Some(vote), Some(reaction)) => {
                sqlx::query(&format!(
                    "UPDATE {vote_table} SET reaction_type = $2 WHERE id = $1"
                ))
                .bind(vote.id)
                .bind(reaction.as_str())
                .execute(&mut *tx)
                .await?;
            }
            (None, Some(reaction)) => {
                sqlx::query(&format!(
                    "INSERT INTO {vote_table} ({column}, user_id, reaction_type) VALUES ($1, $2, $3)"
                ))
                .bind(target_id)
                .bind(user_id)
                .bind(reaction.as_str())
                .execute(&mut *tx)
                .await?;
            }
            (None, None) => {}
        }

        let (like_count, dislike_count): (i64, i64) = sqlx::query_as(&format!(
            "UPDATE {table} SET
                like_count = GREATEST(like_count + $2, 0),
                dislike_count = GREATEST(dislike_count + $3, 0)
             WHERE id = $1
             RETURNING like_count, dislike_count"
        ))
        .bind(target_id)
        .bind(i64::from(outcome.like_delta))
        .bind(i64::from(outcome.dislike_delta))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            entity = target.entity_name(),
            target_id,
            user_id,
            requested = %requested,
            new_reaction = ?outcome.new_reaction,
            "Applied reaction"
        );

        Ok(Some(VoteState {
            reaction: outcome.new_reaction,
            like_count,
            dislike_count,
        }))
    }

    /// Current counts on a target plus `viewer`'s reaction. Returns `None`
    /// if the target does not exist.
    pub async fn stats(
        pool: &PgPool,
        target: ReactionTarget,
        target_id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<VoteState>, sqlx::Error> {
        let table = target.table();
        let vote_table = target.vote_table();
        let column = target.target_column();

        let row: Option<(i64, i64, Option<String>)> = sqlx::query_as(&format!(
            "SELECT t.like_count, t.dislike_count,
                    (SELECT v.reaction_type FROM {vote_table} v
                     WHERE v.{column} = t.id AND v.user_id = $2)
             FROM {table} t
             WHERE t.id = $1"
        ))
        .bind(target_id)
        .bind(viewer)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(like_count, dislike_count, reaction)| VoteState {
            reaction: reaction.and_then(|r| r.parse().ok()),
            like_count,
            dislike_count,
        }))
    }
}
