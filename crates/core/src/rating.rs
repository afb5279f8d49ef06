//! Breed rating aggregation.
//!
//! Averages are always derivable from the current review set. [`RatingTally`]
//! keeps integer per-aspect sums and counts, so adding and then removing the
//! same review restores the previous averages bit-for-bit.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::aspect::{Aspect, AspectRatings};
use crate::review::Review;

/// Decimal places used when averages are rendered for display.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Per-aspect averages. `None` means no review rated that aspect, which is
/// different from an average of zero.
///
/// Every aspect is always present, so the serialized form carries all four
/// keys whether or not the stored value listed them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AspectAverages(BTreeMap<Aspect, Option<f64>>);

impl From<BTreeMap<Aspect, Option<f64>>> for AspectAverages {
    fn from(stored: BTreeMap<Aspect, Option<f64>>) -> Self {
        Self(
            Aspect::ALL
                .into_iter()
                .map(|a| (a, stored.get(&a).copied().flatten()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for AspectAverages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<Aspect, Option<f64>>::deserialize(deserializer).map(Self::from)
    }
}

impl AspectAverages {
    /// Averages with every aspect at "no data".
    pub fn empty() -> Self {
        Self(Aspect::ALL.into_iter().map(|a| (a, None)).collect())
    }

    pub fn get(&self, aspect: Aspect) -> Option<f64> {
        self.0.get(&aspect).copied().flatten()
    }

    /// Aspects that have data, with their averages.
    pub fn iter(&self) -> impl Iterator<Item = (Aspect, f64)> + '_ {
        self.0.iter().filter_map(|(&a, &v)| v.map(|v| (a, v)))
    }

    pub fn has_data(&self) -> bool {
        self.iter().next().is_some()
    }

    /// Copy rounded to [`DISPLAY_DECIMALS`] places.
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(&a, &v)| (a, v.map(round_for_display)))
                .collect(),
        )
    }
}

impl Default for AspectAverages {
    fn default() -> Self {
        Self::empty()
    }
}

/// Running integer total for one aspect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AspectTotal {
    pub sum: u64,
    pub count: u64,
}

impl AspectTotal {
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

/// Integer sums and counts per aspect over a set of ratings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingTally {
    totals: BTreeMap<Aspect, AspectTotal>,
}

impl RatingTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally the ratings of the top-level reviews in `reviews`. Replies are skipped.
    pub fn from_reviews<'a, I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = &'a Review>,
    {
        Self::from_ratings(reviews.into_iter().filter_map(Review::effective_ratings))
    }

    /// Tally raw rating sets (the caller has already excluded replies).
    pub fn from_ratings<'a, I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = &'a AspectRatings>,
    {
        let mut tally = Self::new();
        for r in ratings {
            tally.add(r);
        }
        tally
    }

    /// Count one review's scores. Unset aspects are ignored.
    pub fn add(&mut self, ratings: &AspectRatings) {
        for (aspect, score) in ratings.iter() {
            let total = self.totals.entry(aspect).or_default();
            total.sum += u64::from(score);
            total.count += 1;
        }
    }

    /// Undo a previous [`add`](Self::add) of the same ratings.
    pub fn remove(&mut self, ratings: &AspectRatings) {
        for (aspect, score) in ratings.iter() {
            if let Some(total) = self.totals.get_mut(&aspect) {
                total.sum = total.sum.saturating_sub(u64::from(score));
                total.count = total.count.saturating_sub(1);
                if total.count == 0 {
                    self.totals.remove(&aspect);
                }
            }
        }
    }

    pub fn total(&self, aspect: Aspect) -> AspectTotal {
        self.totals.get(&aspect).copied().unwrap_or_default()
    }

    pub fn averages(&self) -> AspectAverages {
        AspectAverages(
            Aspect::ALL
                .into_iter()
                .map(|a| (a, self.total(a).average()))
                .collect(),
        )
    }
}

/// Per-aspect averages over the top-level reviews in `reviews`.
pub fn compute_averages(reviews: &[Review]) -> AspectAverages {
    RatingTally::from_reviews(reviews).averages()
}

/// Mean of the aspect averages that have data; `None` when none do.
pub fn compute_overall(averages: &AspectAverages) -> Option<f64> {
    let (sum, n) = averages
        .iter()
        .fold((0.0_f64, 0_u32), |(sum, n), (_, v)| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / f64::from(n))
    }
}

/// Round a value to [`DISPLAY_DECIMALS`] places.
pub fn round_for_display(value: f64) -> f64 {
    let factor = 10_f64.powi(DISPLAY_DECIMALS);
    (value * factor).round() / factor
}

/// Aggregate shown on a breed: averages, overall score, and review count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub averages: AspectAverages,
    pub overall: Option<f64>,
    /// Number of top-level reviews, rated or not.
    pub review_count: i64,
}

impl RatingSummary {
    /// Summarize a breed's top-level reviews given only their rating sets.
    pub fn from_top_level_ratings(ratings: &[Option<AspectRatings>]) -> Self {
        let averages = RatingTally::from_ratings(ratings.iter().flatten()).averages();
        let overall = compute_overall(&averages);
        Self {
            averages,
            overall,
            review_count: ratings.len() as i64,
        }
    }

    /// Summarize a review forest. Only top-level reviews are counted.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let top_level: Vec<Option<AspectRatings>> = reviews
            .iter()
            .filter(|r| r.is_top_level())
            .map(|r| r.ratings.clone())
            .collect();
        Self::from_top_level_ratings(&top_level)
    }
}
