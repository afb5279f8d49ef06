//! Breed entity model and DTOs.

use catbase_core::rating::{round_for_display, AspectAverages};
use catbase_core::types::{DbId, Timestamp};
use catbase_core::vote::Reaction;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `breeds` table.
///
/// `average_ratings`, `overall_rating` and `review_count` are derived from the
/// breed's reviews and rewritten after every review mutation.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Breed {
    pub id: DbId,
    pub name: String,
    pub origin: Option<String>,
    pub description: Option<String>,
    pub history: Option<String>,
    pub appearance: Option<String>,
    pub temperament: Option<String>,
    pub care_instructions: Option<String>,
    pub image_url: Option<String>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub review_count: i64,
    pub view_count: i64,
    #[ts(type = "Record<string, number | null>")]
    pub average_ratings: Json<AspectAverages>,
    pub overall_rating: Option<f64>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Breed {
    /// Averages and overall score rounded for display. Stored values keep
    /// full precision so sorting is unaffected.
    pub fn rounded_for_display(mut self) -> Self {
        self.average_ratings = Json(self.average_ratings.0.rounded());
        self.overall_rating = self.overall_rating.map(round_for_display);
        self
    }
}

/// A breed as seen by one viewer.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct BreedView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub breed: Breed,
    /// `"like"`, `"dislike"`, or `None` (also for anonymous viewers).
    pub viewer_reaction: Option<String>,
    pub is_favorited: bool,
}

impl BreedView {
    pub fn rounded_for_display(mut self) -> Self {
        self.breed = self.breed.rounded_for_display();
        self
    }

    pub fn reaction(&self) -> Option<Reaction> {
        self.viewer_reaction.as_deref().and_then(|r| r.parse().ok())
    }
}

/// Recomputed rating aggregate for one breed.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct BreedRatingSummary {
    pub breed_id: DbId,
    #[ts(type = "Record<string, number | null>")]
    pub average_ratings: Json<AspectAverages>,
    pub overall_rating: Option<f64>,
    pub review_count: i64,
}

impl BreedRatingSummary {
    pub fn rounded_for_display(mut self) -> Self {
        self.average_ratings = Json(self.average_ratings.0.rounded());
        self.overall_rating = self.overall_rating.map(round_for_display);
        self
    }
}

/// DTO for creating a breed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBreed {
    pub name: String,
    pub origin: Option<String>,
    pub description: Option<String>,
    pub history: Option<String>,
    pub appearance: Option<String>,
    pub temperament: Option<String>,
    pub care_instructions: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating a breed. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBreed {
    pub name: Option<String>,
    pub origin: Option<String>,
    pub description: Option<String>,
    pub history: Option<String>,
    pub appearance: Option<String>,
    pub temperament: Option<String>,
    pub care_instructions: Option<String>,
    pub image_url: Option<String>,
}
