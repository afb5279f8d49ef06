//! Reaction toggles and favorites against a real database.

mod common;

use catbase_core::vote::{Reaction, VoteState};
use catbase_db::models::reaction::ReactionTarget;
use catbase_db::repositories::{BreedRepo, FavoriteRepo, ReactionRepo};
use common::{new_breed, new_user, post_review};
use sqlx::PgPool;

async fn toggle_review(pool: &PgPool, review_id: i64, user_id: i64, reaction: Reaction) -> VoteState {
    ReactionRepo::toggle(pool, ReactionTarget::Review, review_id, user_id, reaction)
        .await
        .unwrap()
        .expect("review exists")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_reaction_transitions(pool: PgPool) {
    let author = new_user(&pool, "author").await;
    let voter = new_user(&pool, "voter").await;
    let breed = new_breed(&pool, "Siamese", author.id).await;
    let review = post_review(&pool, breed.id, author.id, None, &[]).await;

    let liked = toggle_review(&pool, review.id, voter.id, Reaction::Like).await;
    assert_eq!(
        liked,
        VoteState { reaction: Some(Reaction::Like), like_count: 1, dislike_count: 0 }
    );

    let flipped = toggle_review(&pool, review.id, voter.id, Reaction::Dislike).await;
    assert_eq!(
        flipped,
        VoteState { reaction: Some(Reaction::Dislike), like_count: 0, dislike_count: 1 }
    );

    let cleared = toggle_review(&pool, review.id, voter.id, Reaction::Dislike).await;
    assert_eq!(cleared, VoteState::default());

    let stats = ReactionRepo::stats(&pool, ReactionTarget::Review, review.id, Some(voter.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stats, VoteState::default());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_breed_reactions_from_two_users(pool: PgPool) {
    let a = new_user(&pool, "ann").await;
    let b = new_user(&pool, "ben").await;
    let breed = new_breed(&pool, "Persian", a.id).await;

    ReactionRepo::toggle(&pool, ReactionTarget::Breed, breed.id, a.id, Reaction::Like)
        .await
        .unwrap();
    let state = ReactionRepo::toggle(&pool, ReactionTarget::Breed, breed.id, b.id, Reaction::Like)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.like_count, 2);

    let anon = ReactionRepo::stats(&pool, ReactionTarget::Breed, breed.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(anon.reaction, None);
    assert_eq!(anon.like_count, 2);

    let view = BreedRepo::find_view(&pool, breed.id, Some(a.id)).await.unwrap().unwrap();
    assert_eq!(view.reaction(), Some(Reaction::Like));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reaction_on_missing_target_is_none(pool: PgPool) {
    let user = new_user(&pool, "ivy").await;
    let result = ReactionRepo::toggle(&pool, ReactionTarget::Review, 9_999, user.id, Reaction::Like)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorite_toggle(pool: PgPool) {
    let user = new_user(&pool, "jules").await;
    let breed = new_breed(&pool, "Savannah", user.id).await;

    let on = FavoriteRepo::toggle(&pool, user.id, breed.id).await.unwrap();
    assert!(on.favorited);
    assert!(FavoriteRepo::find(&pool, user.id, breed.id).await.unwrap().is_some());

    let favorites = BreedRepo::list_favorites(&pool, user.id).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert!(favorites[0].is_favorited);

    let off = FavoriteRepo::toggle(&pool, user.id, breed.id).await.unwrap();
    assert!(!off.favorited);
    assert!(BreedRepo::list_favorites(&pool, user.id).await.unwrap().is_empty());
}
