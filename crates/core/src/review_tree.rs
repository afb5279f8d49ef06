//! In-memory review forest for one breed.
//!
//! Top-level reviews are the roots; each reply hangs under its parent. Ids are
//! unique across the whole forest, so every lookup searches all levels.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::listing::ReviewSort;
use crate::review::{Review, ReviewPatch};
use crate::types::DbId;

const ENTITY: &str = "Review";

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReviewTree {
    roots: Vec<Review>,
}

impl ReviewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from flat rows, as the store returns them.
    ///
    /// Top-level rows keep their input order and replies are attached under
    /// their parent in input order. Rows whose parent is not in the input
    /// (for example because it was deleted) are dropped together with their
    /// own replies.
    pub fn from_flat(rows: Vec<Review>) -> Self {
        let present: HashSet<DbId> = rows.iter().map(|r| r.id).collect();
        let mut children: HashMap<DbId, Vec<Review>> = HashMap::new();
        let mut roots = Vec::new();

        for mut row in rows {
            row.replies.clear();
            match row.parent_id {
                None => roots.push(row),
                Some(parent) if present.contains(&parent) => {
                    children.entry(parent).or_default().push(row)
                }
                Some(_) => {}
            }
        }

        fn attach(node: &mut Review, children: &mut HashMap<DbId, Vec<Review>>) {
            if let Some(mut replies) = children.remove(&node.id) {
                for reply in &mut replies {
                    attach(reply, children);
                }
                node.replies = replies;
            }
        }

        for root in &mut roots {
            attach(root, &mut children);
        }

        // Anything left in `children` belongs to a cycle or a chain that
        // never reaches a root; those rows are unreachable and discarded.
        Self { roots }
    }

    pub fn top_level(&self) -> &[Review] {
        &self.roots
    }

    /// Total number of nodes at every level.
    pub fn len(&self) -> usize {
        fn count(nodes: &[Review]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.replies)).sum()
        }
        count(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find(&self, id: DbId) -> Option<&Review> {
        fn search(nodes: &[Review], id: DbId) -> Option<&Review> {
            nodes
                .iter()
                .find_map(|n| if n.id == id { Some(n) } else { search(&n.replies, id) })
        }
        search(&self.roots, id)
    }

    fn find_mut(&mut self, id: DbId) -> Option<&mut Review> {
        fn search(nodes: &mut [Review], id: DbId) -> Option<&mut Review> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = search(&mut node.replies, id) {
                    return Some(found);
                }
            }
            None
        }
        search(&mut self.roots, id)
    }

    /// Add a review. Top-level reviews are appended to the roots; replies are
    /// appended to their parent's replies.
    pub fn insert(&mut self, review: Review) -> Result<(), CoreError> {
        match review.parent_id {
            None => {
                self.roots.push(review);
                Ok(())
            }
            Some(parent_id) => {
                let parent = self.find_mut(parent_id).ok_or_else(|| not_found(parent_id))?;
                parent.replies.push(review);
                Ok(())
            }
        }
    }

    /// Replace the editable fields of the node with `id`. Replies are kept.
    pub fn update_by_id(&mut self, id: DbId, patch: &ReviewPatch) -> Result<(), CoreError> {
        let node = self.find_mut(id).ok_or_else(|| not_found(id))?;
        node.apply_patch(patch);
        Ok(())
    }

    /// Remove the node with `id` and its whole subtree, at whatever level it
    /// lives. Every surviving level is filtered as well.
    pub fn remove_by_id(&mut self, id: DbId) -> Result<(), CoreError> {
        fn prune(nodes: &mut Vec<Review>, id: DbId) -> bool {
            let before = nodes.len();
            nodes.retain(|n| n.id != id);
            let mut removed = nodes.len() != before;
            for node in nodes.iter_mut() {
                removed |= prune(&mut node.replies, id);
            }
            removed
        }

        if prune(&mut self.roots, id) {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    /// Top-level nodes ordered by `like_count`, highest first. Ties keep
    /// their current relative order and replies are not reordered.
    pub fn sorted_by_votes(&self) -> Vec<Review> {
        let mut sorted = self.roots.clone();
        sorted.sort_by(|a, b| b.like_count.cmp(&a.like_count));
        sorted
    }

    /// Top-level nodes ordered newest first, ties by id descending.
    pub fn sorted_by_recent(&self) -> Vec<Review> {
        let mut sorted = self.roots.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sorted
    }

    /// Top-level nodes in display order. Vote order falls back to recency
    /// on equal likes.
    pub fn ordered(&self, sort: ReviewSort) -> Vec<Review> {
        let mut sorted = self.sorted_by_recent();
        if sort == ReviewSort::Votes {
            sorted.sort_by(|a, b| b.like_count.cmp(&a.like_count));
        }
        sorted
    }
}
