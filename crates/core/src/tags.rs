//! Tag frequency ranking across a breed's top-level reviews.

use indexmap::IndexMap;
use serde::Serialize;

use crate::review::Review;

/// Default number of tags shown for a breed.
pub const DEFAULT_TOP_TAGS: usize = 10;

/// Upper bound on a requested tag count.
pub const MAX_TOP_TAGS: usize = 50;

/// A tag together with how many reviews carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// All tags on top-level reviews, most frequent first.
///
/// Each review counts a tag at most once. Tags are compared exactly (case
/// and `#` prefix included). Ties keep the order in which the tag was first
/// seen.
pub fn tag_frequencies<'a, I>(reviews: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for review in reviews.into_iter().filter(|r| r.is_top_level()) {
        let mut seen: Vec<&str> = Vec::with_capacity(review.tags.len());
        for tag in &review.tags {
            let tag = tag.as_str();
            if seen.contains(&tag) {
                continue;
            }
            seen.push(tag);
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    // Stable: equal counts stay in first-seen order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// The `n` most frequent tags, most frequent first.
pub fn top_tags<'a, I>(reviews: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a Review>,
{
    tag_frequencies(reviews)
        .into_iter()
        .take(n)
        .map(|tc| tc.tag)
        .collect()
}
