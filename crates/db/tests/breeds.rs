//! Breed listing, search and admin writes.

mod common;

use catbase_core::listing::BreedSort;
use catbase_db::models::breed::UpdateBreed;
use catbase_db::repositories::breed_repo::BreedListParams;
use catbase_db::repositories::BreedRepo;
use common::{new_breed, new_user, post_review, uniform};
use sqlx::PgPool;

fn params(q: Option<&str>, sort: BreedSort) -> BreedListParams {
    BreedListParams {
        q: q.map(str::to_string),
        sort,
        limit: 10,
        offset: 0,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_sorts_and_searches(pool: PgPool) {
    let user = new_user(&pool, "admin1").await;
    let abyssinian = new_breed(&pool, "Abyssinian", user.id).await;
    let maine = new_breed(&pool, "Maine Coon", user.id).await;
    new_breed(&pool, "Birman", user.id).await;

    post_review(&pool, maine.id, user.id, Some(uniform(5)), &[]).await;
    post_review(&pool, abyssinian.id, user.id, Some(uniform(2)), &[]).await;

    let by_name = BreedRepo::list(&pool, None, &params(None, BreedSort::Name))
        .await
        .unwrap();
    let names: Vec<&str> = by_name.iter().map(|b| b.breed.name.as_str()).collect();
    assert_eq!(names, vec!["Abyssinian", "Birman", "Maine Coon"]);

    let by_rating = BreedRepo::list(&pool, None, &params(None, BreedSort::Rating))
        .await
        .unwrap();
    let names: Vec<&str> = by_rating.iter().map(|b| b.breed.name.as_str()).collect();
    assert_eq!(names, vec!["Maine Coon", "Abyssinian", "Birman"]);

    let found = BreedRepo::list(&pool, None, &params(Some("coon"), BreedSort::Name))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(BreedRepo::count(&pool, Some("coon")).await.unwrap(), 1);
    assert_eq!(BreedRepo::count(&pool, Some("  ")).await.unwrap(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete(pool: PgPool) {
    let user = new_user(&pool, "admin2").await;
    let breed = new_breed(&pool, "Nebelung", user.id).await;

    let updated = BreedRepo::update(
        &pool,
        breed.id,
        &UpdateBreed {
            temperament: Some("Gentle".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Nebelung");
    assert_eq!(updated.temperament.as_deref(), Some("Gentle"));

    assert!(BreedRepo::increment_view(&pool, breed.id).await.unwrap());
    let viewed = BreedRepo::find_by_id(&pool, breed.id).await.unwrap().unwrap();
    assert_eq!(viewed.view_count, 1);

    assert!(BreedRepo::delete(&pool, breed.id).await.unwrap());
    assert!(!BreedRepo::exists(&pool, breed.id).await.unwrap());
    assert!(BreedRepo::update(&pool, breed.id, &UpdateBreed::default())
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_violates_uq_constraint(pool: PgPool) {
    let user = new_user(&pool, "admin3").await;
    new_breed(&pool, "Toyger", user.id).await;

    let err = BreedRepo::create(
        &pool,
        &catbase_db::models::breed::CreateBreed {
            name: "Toyger".to_string(),
            origin: None,
            description: None,
            history: None,
            appearance: None,
            temperament: None,
            care_instructions: None,
            image_url: None,
        },
        user.id,
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_breeds_name"));
}
