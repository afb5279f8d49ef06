//! Domain logic for the cat breed catalog.
//!
//! Everything here is synchronous and free of I/O so the same rules apply in
//! the API, the repositories, and tests.

pub mod aspect;
pub mod breed;
pub mod error;
pub mod listing;
pub mod rating;
pub mod review;
pub mod review_tree;
pub mod roles;
pub mod tags;
pub mod types;
pub mod viewer;
pub mod vote;
