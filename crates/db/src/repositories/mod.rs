//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` (or a connection, when the call must join a transaction) as the
//! first argument.

pub mod breed_repo;
pub mod favorite_repo;
pub mod reaction_repo;
pub mod review_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use breed_repo::BreedRepo;
pub use favorite_repo::FavoriteRepo;
pub use reaction_repo::ReactionRepo;
pub use review_repo::ReviewRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
