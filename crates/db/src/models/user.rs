//! User account model and DTOs.

use catbase_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// Full row from the `users` table.
///
/// Carries the password hash, so it is never serialized. Use
/// [`UserResponse`] for anything sent to a client.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Resolved role name (`"admin"` or `"user"`).
    pub role: String,
    pub created_at: Timestamp,
}

impl UserResponse {
    pub fn from_user(user: &User, role: String) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role,
            created_at: user.created_at,
        }
    }
}

/// Insert DTO. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}
