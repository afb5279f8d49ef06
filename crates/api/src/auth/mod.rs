//! Authentication primitives: JWT access tokens, refresh-token hashing, and
//! Argon2 password hashing.

pub mod jwt;
pub mod password;
