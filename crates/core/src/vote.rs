//! Like/dislike reactions and the counter arithmetic behind them.
//!
//! A viewer holds at most one reaction per target. Requesting the reaction
//! the viewer already holds clears it; requesting the opposite one flips it.
//! [`apply_reaction`] is the single source of those transitions and is used
//! both server-side (inside the toggle transaction) and by clients that
//! update their view optimistically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A viewer's vote on a review or breed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    pub fn as_str(self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
        }
    }

    /// The mutually exclusive counterpart.
    pub fn opposite(self) -> Self {
        match self {
            Reaction::Like => Reaction::Dislike,
            Reaction::Dislike => Reaction::Like,
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reaction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Reaction::Like),
            "dislike" => Ok(Reaction::Dislike),
            other => Err(CoreError::Validation(format!(
                "Invalid reaction '{other}'. Must be one of: like, dislike"
            ))),
        }
    }
}

/// Result of applying a requested reaction on top of the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionOutcome {
    pub new_reaction: Option<Reaction>,
    pub like_delta: i32,
    pub dislike_delta: i32,
}

fn delta_for(reaction: Reaction, amount: i32) -> (i32, i32) {
    match reaction {
        Reaction::Like => (amount, 0),
        Reaction::Dislike => (0, amount),
    }
}

/// Compute the new reaction and counter deltas for a toggle request.
///
/// | current   | requested | new       | like | dislike |
/// |-----------|-----------|-----------|------|---------|
/// | none      | like      | like      | +1   | 0       |
/// | like      | like      | none      | -1   | 0       |
/// | like      | dislike   | dislike   | -1   | +1      |
/// | dislike   | like      | like      | +1   | -1      |
pub fn apply_reaction(current: Option<Reaction>, requested: Reaction) -> ReactionOutcome {
    let (new_reaction, (like_delta, dislike_delta)) = match current {
        Some(held) if held == requested => (None, delta_for(requested, -1)),
        Some(held) => {
            let (l_off, d_off) = delta_for(held, -1);
            let (l_on, d_on) = delta_for(requested, 1);
            (Some(requested), (l_off + l_on, d_off + d_on))
        }
        None => (Some(requested), delta_for(requested, 1)),
    };

    ReactionOutcome {
        new_reaction,
        like_delta,
        dislike_delta,
    }
}

/// A viewer's reaction plus the aggregate counts of one target.
///
/// Clients keep the value they had before a toggle as the rollback snapshot:
/// if the server call fails they restore it, otherwise they replace their
/// prediction with the server's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteState {
    pub reaction: Option<Reaction>,
    pub like_count: i64,
    pub dislike_count: i64,
}

impl VoteState {
    /// Predicted state after the viewer requests `requested`.
    ///
    /// Counts never drop below zero even if the starting counts were
    /// already inconsistent with `reaction`.
    pub fn toggled(self, requested: Reaction) -> Self {
        let outcome = apply_reaction(self.reaction, requested);
        Self {
            reaction: outcome.new_reaction,
            like_count: (self.like_count + i64::from(outcome.like_delta)).max(0),
            dislike_count: (self.dislike_count + i64::from(outcome.dislike_delta)).max(0),
        }
    }
}
