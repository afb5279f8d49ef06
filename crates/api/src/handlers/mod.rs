pub mod admin;
pub mod auth;
pub mod breeds;
pub mod favorites;
pub mod reactions;
pub mod reviews;
pub mod users;
