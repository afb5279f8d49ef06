//! Listing parameters shared by the API and repository layers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Pagination defaults
-------------------------------------------------------------------------- */

/// Default number of breeds per page.
pub const DEFAULT_BREED_LIMIT: i64 = 10;

/// Maximum number of breeds per page.
pub const MAX_BREED_LIMIT: i64 = 100;

/// Clamp a user-provided limit into `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/* --------------------------------------------------------------------------
Sort orders
-------------------------------------------------------------------------- */

/// Ordering for the breed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedSort {
    #[default]
    Name,
    Rating,
    Popular,
}

impl BreedSort {
    pub fn as_str(self) -> &'static str {
        match self {
            BreedSort::Name => "name",
            BreedSort::Rating => "rating",
            BreedSort::Popular => "popular",
        }
    }
}

impl fmt::Display for BreedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreedSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(BreedSort::Name),
            "rating" => Ok(BreedSort::Rating),
            "popular" => Ok(BreedSort::Popular),
            other => Err(CoreError::Validation(format!(
                "Invalid sort '{other}'. Must be one of: name, rating, popular"
            ))),
        }
    }
}

/// Ordering for a breed's top-level reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSort {
    #[default]
    Recent,
    Votes,
}

impl FromStr for ReviewSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(ReviewSort::Recent),
            "votes" => Ok(ReviewSort::Votes),
            other => Err(CoreError::Validation(format!(
                "Invalid sort '{other}'. Must be one of: recent, votes"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_BREED_LIMIT, MAX_BREED_LIMIT), 10);
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(Some(500), 10, 100), 100);
        assert_eq!(clamp_limit(Some(0), 10, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 10, 100), 1);
        assert_eq!(clamp_limit(Some(25), 10, 100), 25);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn sort_parsing() {
        assert_eq!("rating".parse::<BreedSort>().unwrap(), BreedSort::Rating);
        assert!("random".parse::<BreedSort>().is_err());
        assert_eq!("votes".parse::<ReviewSort>().unwrap(), ReviewSort::Votes);
        assert_eq!(ReviewSort::default(), ReviewSort::Recent);
        assert!("top".parse::<ReviewSort>().is_err());
    }

    #[test]
    fn sort_deserializes_from_query_values() {
        let sort: BreedSort = serde_json::from_str("\"popular\"").unwrap();
        assert_eq!(sort, BreedSort::Popular);
    }
}
