//! Reaction targets and vote rows.

use catbase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Something a viewer can like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTarget {
    Review,
    Breed,
}

impl ReactionTarget {
    /// Table holding the target rows and their counters.
    pub fn table(self) -> &'static str {
        match self {
            ReactionTarget::Review => "reviews",
            ReactionTarget::Breed => "breeds",
        }
    }

    /// Table holding one vote per (target, user).
    pub fn vote_table(self) -> &'static str {
        match self {
            ReactionTarget::Review => "review_reactions",
            ReactionTarget::Breed => "breed_reactions",
        }
    }

    /// Foreign-key column in [`vote_table`](Self::vote_table).
    pub fn target_column(self) -> &'static str {
        match self {
            ReactionTarget::Review => "review_id",
            ReactionTarget::Breed => "breed_id",
        }
    }

    pub fn entity_name(self) -> &'static str {
        match self {
            ReactionTarget::Review => "Review",
            ReactionTarget::Breed => "Breed",
        }
    }
}

/// A single vote row from `review_reactions` or `breed_reactions`.
#[derive(Debug, Clone, FromRow)]
pub struct VoteRecord {
    pub id: DbId,
    pub target_id: DbId,
    pub user_id: DbId,
    pub reaction_type: String,
    pub created_at: Timestamp,
}
