//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use catbase_core::aspect::{Aspect, AspectRatings};
use catbase_core::roles::DEFAULT_ROLE_ID;
use catbase_core::types::DbId;
use catbase_db::models::breed::{Breed, CreateBreed};
use catbase_db::models::review::{CreateReview, ReviewRow};
use catbase_db::models::user::{CreateUser, User};
use catbase_db::repositories::{BreedRepo, ReviewRepo, UserRepo};
use sqlx::PgPool;

pub async fn new_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role_id: DEFAULT_ROLE_ID,
        },
    )
    .await
    .unwrap()
}

pub async fn new_breed(pool: &PgPool, name: &str, created_by: DbId) -> Breed {
    BreedRepo::create(
        pool,
        &CreateBreed {
            name: name.to_string(),
            origin: Some("Thailand".to_string()),
            description: None,
            history: None,
            appearance: None,
            temperament: None,
            care_instructions: None,
            image_url: None,
        },
        created_by,
    )
    .await
    .unwrap()
}

pub fn uniform(score: u8) -> AspectRatings {
    Aspect::ALL.into_iter().map(|a| (a, score)).collect()
}

pub async fn post_review(
    pool: &PgPool,
    breed_id: DbId,
    user_id: DbId,
    ratings: Option<AspectRatings>,
    tags: &[&str],
) -> ReviewRow {
    let input = CreateReview {
        breed_id,
        user_id,
        parent_id: None,
        message: "A lovely companion".to_string(),
        ratings,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };
    ReviewRepo::create(pool, &input).await.unwrap().0
}

pub async fn post_reply(pool: &PgPool, parent: &ReviewRow, user_id: DbId) -> ReviewRow {
    let input = CreateReview {
        breed_id: parent.breed_id,
        user_id,
        parent_id: Some(parent.id),
        message: "Agreed".to_string(),
        ratings: None,
        tags: Vec::new(),
    };
    ReviewRepo::create(pool, &input).await.unwrap().0
}
