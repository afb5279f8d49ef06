//! Row structs and DTOs.
//!
//! Each submodule pairs a `FromRow` entity matching its table with the
//! input DTOs the repositories accept.

pub mod breed;
pub mod favorite;
pub mod reaction;
pub mod review;
pub mod role;
pub mod session;
pub mod user;
