//! Rating aspects and per-review aspect scores.
//!
//! A review may score a breed on up to four fixed aspects. Scores are whole
//! stars in `1..=5`; a stored `0` is a legacy "unset" marker and is treated
//! exactly like a missing key.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lowest score a reviewer can deliberately submit.
pub const MIN_SCORE: u8 = 1;

/// Highest score a reviewer can submit.
pub const MAX_SCORE: u8 = 5;

/// One named dimension of a breed rating.
///
/// Serialized with the keys the browser client uses
/// (`friendliness`, `adaptability`, `energyLevel`, `grooming`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aspect {
    Friendliness,
    Adaptability,
    EnergyLevel,
    Grooming,
}

impl Aspect {
    /// Every aspect, in display order.
    pub const ALL: [Aspect; 4] = [
        Aspect::Friendliness,
        Aspect::Adaptability,
        Aspect::EnergyLevel,
        Aspect::Grooming,
    ];

    /// Wire key for this aspect.
    pub fn as_str(self) -> &'static str {
        match self {
            Aspect::Friendliness => "friendliness",
            Aspect::Adaptability => "adaptability",
            Aspect::EnergyLevel => "energyLevel",
            Aspect::Grooming => "grooming",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aspect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aspect::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown rating aspect '{s}'. Must be one of: {}",
                    Aspect::ALL.map(Aspect::as_str).join(", ")
                ))
            })
    }
}

/// Per-aspect star scores attached to a single review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectRatings(BTreeMap<Aspect, u8>);

impl AspectRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score for an aspect. A score of `0` clears it.
    pub fn set(&mut self, aspect: Aspect, score: u8) {
        if score == 0 {
            self.0.remove(&aspect);
        } else {
            self.0.insert(aspect, score);
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, aspect: Aspect, score: u8) -> Self {
        self.set(aspect, score);
        self
    }

    /// Score for an aspect, or `None` when the aspect was not rated.
    pub fn get(&self, aspect: Aspect) -> Option<u8> {
        self.0.get(&aspect).copied().filter(|&s| s != 0)
    }

    /// Rated aspects with their scores. Unset (`0`) entries are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (Aspect, u8)> + '_ {
        self.0
            .iter()
            .filter(|&(_, &s)| s != 0)
            .map(|(&a, &s)| (a, s))
    }

    /// `true` when no aspect carries a real score.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Copy with every `0` ("unset") entry removed.
    pub fn normalized(&self) -> Self {
        Self(self.iter().collect())
    }
}

impl FromIterator<(Aspect, u8)> for AspectRatings {
    fn from_iter<I: IntoIterator<Item = (Aspect, u8)>>(iter: I) -> Self {
        let mut ratings = Self::new();
        for (aspect, score) in iter {
            ratings.set(aspect, score);
        }
        ratings
    }
}

/// Validate submitted scores: every present value must be within `0..=5`,
/// where `0` means "not rated".
pub fn validate_ratings(ratings: &AspectRatings) -> Result<(), CoreError> {
    for (&aspect, &score) in &ratings.0 {
        if score > MAX_SCORE {
            return Err(CoreError::Validation(format!(
                "Rating for '{aspect}' must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
            )));
        }
    }
    Ok(())
}
