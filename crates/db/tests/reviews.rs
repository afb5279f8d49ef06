//! Review lifecycle against a real database: aggregates are recomputed from
//! stored rows after every write, soft-deleted reviews leave the tree.

mod common;

use catbase_core::aspect::{Aspect, AspectRatings};
use catbase_core::review::{ReviewPatch, DELETED_BY_AUTHOR_MESSAGE};
use catbase_core::review_tree::ReviewTree;
use catbase_db::repositories::{BreedRepo, ReviewRepo};
use common::{new_breed, new_user, post_reply, post_review, uniform};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_refreshes_breed_aggregate(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let breed = new_breed(&pool, "Korat", user.id).await;
    assert_eq!(breed.review_count, 0);
    assert_eq!(breed.overall_rating, None);

    post_review(&pool, breed.id, user.id, Some(uniform(4)), &["#calm"]).await;
    post_review(&pool, breed.id, user.id, Some(uniform(5)), &[]).await;

    let stored = BreedRepo::find_by_id(&pool, breed.id).await.unwrap().unwrap();
    assert_eq!(stored.review_count, 2);
    assert_eq!(stored.average_ratings.0.get(Aspect::Grooming), Some(4.5));
    assert_eq!(stored.overall_rating, Some(4.5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replies_do_not_count_toward_aggregate(pool: PgPool) {
    let user = new_user(&pool, "bob").await;
    let breed = new_breed(&pool, "Chartreux", user.id).await;

    let review = post_review(&pool, breed.id, user.id, Some(uniform(3)), &[]).await;
    post_reply(&pool, &review, user.id).await;

    let stored = BreedRepo::find_by_id(&pool, breed.id).await.unwrap().unwrap();
    assert_eq!(stored.review_count, 1);
    assert_eq!(stored.overall_rating, Some(3.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_recomputes_from_stored_rows(pool: PgPool) {
    let user = new_user(&pool, "carol").await;
    let breed = new_breed(&pool, "Burmese", user.id).await;
    let review = post_review(&pool, breed.id, user.id, Some(uniform(2)), &[]).await;

    let patch = ReviewPatch {
        message: "Changed my mind".to_string(),
        ratings: Some(AspectRatings::new().with(Aspect::Friendliness, 5)),
        tags: vec!["#affectionate".to_string()],
    };
    let (row, summary) = ReviewRepo::update(&pool, review.id, &patch, user.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(row.message, "Changed my mind");
    assert_eq!(row.tags.0, vec!["#affectionate".to_string()]);
    assert_eq!(summary.average_ratings.0.get(Aspect::Friendliness), Some(5.0));
    assert_eq!(summary.average_ratings.0.get(Aspect::Grooming), None);
    assert_eq!(summary.overall_rating, Some(5.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_restores_previous_aggregate(pool: PgPool) {
    let user = new_user(&pool, "dave").await;
    let breed = new_breed(&pool, "Sphynx", user.id).await;
    post_review(&pool, breed.id, user.id, Some(uniform(3)), &[]).await;
    let before = BreedRepo::find_by_id(&pool, breed.id).await.unwrap().unwrap();

    let extra = post_review(&pool, breed.id, user.id, Some(uniform(5)), &[]).await;
    let summary = ReviewRepo::soft_delete(&pool, extra.id, DELETED_BY_AUTHOR_MESSAGE)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.average_ratings.0, before.average_ratings.0);
    assert_eq!(summary.overall_rating, before.overall_rating);
    assert_eq!(summary.review_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_twice_returns_none(pool: PgPool) {
    let user = new_user(&pool, "erin").await;
    let breed = new_breed(&pool, "Manx", user.id).await;
    let review = post_review(&pool, breed.id, user.id, None, &[]).await;

    assert!(ReviewRepo::soft_delete(&pool, review.id, DELETED_BY_AUTHOR_MESSAGE)
        .await
        .unwrap()
        .is_some());
    assert!(ReviewRepo::soft_delete(&pool, review.id, DELETED_BY_AUTHOR_MESSAGE)
        .await
        .unwrap()
        .is_none());
    assert!(ReviewRepo::find_by_id(&pool, review.id, None)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_parent_hides_replies_in_tree(pool: PgPool) {
    let user = new_user(&pool, "frank").await;
    let breed = new_breed(&pool, "Ragdoll", user.id).await;
    let keep = post_review(&pool, breed.id, user.id, None, &[]).await;
    let doomed = post_review(&pool, breed.id, user.id, None, &[]).await;
    let reply = post_reply(&pool, &doomed, user.id).await;
    post_reply(&pool, &keep, user.id).await;

    ReviewRepo::soft_delete(&pool, doomed.id, DELETED_BY_AUTHOR_MESSAGE)
        .await
        .unwrap();

    let rows = ReviewRepo::list_for_breed(&pool, breed.id, None).await.unwrap();
    // The reply row itself is still live.
    assert!(rows.iter().any(|r| r.id == reply.id));

    let tree = ReviewTree::from_flat(rows.into_iter().map(|r| r.into_review()).collect());
    assert_eq!(tree.top_level().len(), 1);
    assert!(tree.find(reply.id).is_none());
    assert_eq!(tree.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_visibility_follows_the_ancestor_chain(pool: PgPool) {
    let user = new_user(&pool, "grace").await;
    let breed = new_breed(&pool, "Chartreux", user.id).await;
    let top = post_review(&pool, breed.id, user.id, None, &[]).await;
    let reply = post_reply(&pool, &top, user.id).await;
    let nested = post_reply(&pool, &reply, user.id).await;

    assert!(ReviewRepo::is_visible(&pool, nested.id).await.unwrap());
    assert!(!ReviewRepo::is_visible(&pool, 999_999).await.unwrap());

    ReviewRepo::soft_delete(&pool, top.id, DELETED_BY_AUTHOR_MESSAGE)
        .await
        .unwrap();

    assert!(!ReviewRepo::is_visible(&pool, top.id).await.unwrap());
    assert!(!ReviewRepo::is_visible(&pool, reply.id).await.unwrap());
    assert!(!ReviewRepo::is_visible(&pool, nested.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_user_only_top_level(pool: PgPool) {
    let user = new_user(&pool, "gina").await;
    let other = new_user(&pool, "hank").await;
    let breed = new_breed(&pool, "Bengal", user.id).await;

    let mine = post_review(&pool, breed.id, user.id, Some(uniform(4)), &["#active"]).await;
    let theirs = post_review(&pool, breed.id, other.id, None, &[]).await;
    post_reply(&pool, &theirs, user.id).await;

    let listed = ReviewRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, mine.id);
    assert_eq!(listed[0].breed_name, "Bengal");
}
