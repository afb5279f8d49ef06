//! Query-string parameter types shared by handlers.
//!
//! Limits and offsets arrive unclamped; handlers clamp them with
//! `catbase_core::listing::{clamp_limit, clamp_offset}`. Sort values arrive
//! as strings so an unknown value is a 400 with a readable message rather
//! than a generic deserialization rejection.

use serde::Deserialize;

/// `GET /breeds?q=&sort=&limit=&offset=`
#[derive(Debug, Default, Deserialize)]
pub struct BreedListQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /breeds/{id}/reviews?sort=`
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListQuery {
    pub sort: Option<String>,
}

/// `GET /breeds/{id}/tags?limit=`
#[derive(Debug, Default, Deserialize)]
pub struct TagListQuery {
    pub limit: Option<i64>,
}
