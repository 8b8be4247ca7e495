use larder_core::{Ingredient, Price, Recipe, Tag};
use larder_storage::recipes::{self, RecipeFilter};
use larder_storage::StorageError;

use test_helpers::{create_test_identity, create_test_recipe, TestDb};

#[tokio::test]
async fn create_and_get_recipe() {
    let db = TestDb::new().await;
    let owner = create_test_identity(db.pool(), "cook@example.com").await;

    let mut recipe = Recipe::new(
        owner.id.clone(),
        "Shakshuka",
        25,
        Price::parse("6.40").unwrap(),
    );
    recipe.description = Some("Eggs poached in tomato sauce".to_string());
    recipe.link = Some("https://example.com/shakshuka".to_string());
    recipes::create(db.pool(), &recipe).await.unwrap();

    let fetched = recipes::get(db.pool(), &owner.id, &recipe.id)
        .await
        .unwrap()
        .expect("recipe should exist");
    assert_eq!(fetched.title, "Shakshuka");
    assert_eq!(fetched.price.cents(), 640);
    assert_eq!(fetched.description.as_deref(), Some("Eggs poached in tomato sauce"));
}

#[tokio::test]
async fn recipes_are_invisible_to_other_owners() {
    let db = TestDb::new().await;
    let cook = create_test_identity(db.pool(), "cook@example.com").await;
    let other = create_test_identity(db.pool(), "other@example.com").await;

    let recipe = create_test_recipe(db.pool(), &cook, "Shakshuka").await;

    assert!(recipes::get(db.pool(), &other.id, &recipe.id)
        .await
        .unwrap()
        .is_none());

    let err = recipes::delete(db.pool(), &other.id, &recipe.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));

    // still there for its owner
    assert!(recipes::get(db.pool(), &cook.id, &recipe.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn update_rewrites_fields() {
    let db = TestDb::new().await;
    let owner = create_test_identity(db.pool(), "cook@example.com").await;

    let mut recipe = create_test_recipe(db.pool(), &owner, "Shakshuka").await;
    recipe.title = "Green Shakshuka".to_string();
    recipe.time_minutes = 30;
    recipe.price = Price::parse("7.00").unwrap();
    recipes::update(db.pool(), &recipe).await.unwrap();

    let fetched = recipes::get(db.pool(), &owner.id, &recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.title, "Green Shakshuka");
    assert_eq!(fetched.time_minutes, 30);
    assert_eq!(fetched.price.cents(), 700);
}

#[tokio::test]
async fn list_filters_by_search_tag_and_ingredient() {
    let db = TestDb::new().await;
    let owner = create_test_identity(db.pool(), "cook@example.com").await;

    let shakshuka = create_test_recipe(db.pool(), &owner, "Shakshuka").await;
    let congee = create_test_recipe(db.pool(), &owner, "Congee").await;
    create_test_recipe(db.pool(), &owner, "Toast").await;

    let breakfast = Tag::new(owner.id.clone(), "Breakfast");
    larder_storage::tags::create(db.pool(), &breakfast).await.unwrap();
    recipes::set_tags(db.pool(), &owner.id, &shakshuka.id, &[breakfast.id.clone()])
        .await
        .unwrap();

    let rice = Ingredient::new(owner.id.clone(), "Rice");
    larder_storage::ingredients::create(db.pool(), &rice).await.unwrap();
    recipes::set_ingredients(db.pool(), &owner.id, &congee.id, &[rice.id.clone()])
        .await
        .unwrap();

    let filter = RecipeFilter {
        search: Some("shak".to_string()),
        ..Default::default()
    };
    let hits = recipes::list(db.pool(), &owner.id, &filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Shakshuka");

    let filter = RecipeFilter {
        tag: Some(breakfast.id.clone()),
        ..Default::default()
    };
    let hits = recipes::list(db.pool(), &owner.id, &filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, shakshuka.id);

    let filter = RecipeFilter {
        ingredient: Some(rice.id.clone()),
        ..Default::default()
    };
    let hits = recipes::list(db.pool(), &owner.id, &filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, congee.id);

    let all = recipes::list(db.pool(), &owner.id, &RecipeFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn set_tags_replaces_previous_set() {
    let db = TestDb::new().await;
    let owner = create_test_identity(db.pool(), "cook@example.com").await;
    let recipe = create_test_recipe(db.pool(), &owner, "Shakshuka").await;

    let breakfast = Tag::new(owner.id.clone(), "Breakfast");
    let dinner = Tag::new(owner.id.clone(), "Dinner");
    larder_storage::tags::create(db.pool(), &breakfast).await.unwrap();
    larder_storage::tags::create(db.pool(), &dinner).await.unwrap();

    recipes::set_tags(db.pool(), &owner.id, &recipe.id, &[breakfast.id.clone()])
        .await
        .unwrap();
    recipes::set_tags(db.pool(), &owner.id, &recipe.id, &[dinner.id.clone()])
        .await
        .unwrap();

    let attached = recipes::tags_for(db.pool(), &recipe.id).await.unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].name, "Dinner");
}

#[tokio::test]
async fn set_tags_rejects_foreign_tags_without_partial_writes() {
    let db = TestDb::new().await;
    let cook = create_test_identity(db.pool(), "cook@example.com").await;
    let other = create_test_identity(db.pool(), "other@example.com").await;
    let recipe = create_test_recipe(db.pool(), &cook, "Shakshuka").await;

    let mine = Tag::new(cook.id.clone(), "Breakfast");
    let theirs = Tag::new(other.id.clone(), "Stolen");
    larder_storage::tags::create(db.pool(), &mine).await.unwrap();
    larder_storage::tags::create(db.pool(), &theirs).await.unwrap();

    recipes::set_tags(db.pool(), &cook.id, &recipe.id, &[mine.id.clone()])
        .await
        .unwrap();

    let err = recipes::set_tags(
        db.pool(),
        &cook.id,
        &recipe.id,
        &[theirs.id.clone()],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));

    // the transaction rolled back; the previous attachment survives
    let attached = recipes::tags_for(db.pool(), &recipe.id).await.unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].name, "Breakfast");
}

#[tokio::test]
async fn list_all_searches_across_owners() {
    let db = TestDb::new().await;
    let cook = create_test_identity(db.pool(), "cook@example.com").await;
    let other = create_test_identity(db.pool(), "other@example.com").await;

    create_test_recipe(db.pool(), &cook, "Shakshuka").await;
    create_test_recipe(db.pool(), &other, "Green Shakshuka").await;
    create_test_recipe(db.pool(), &other, "Congee").await;

    let hits = recipes::list_all(db.pool(), Some("Shakshuka")).await.unwrap();
    assert_eq!(hits.len(), 2);

    let all = recipes::list_all(db.pool(), None).await.unwrap();
    assert_eq!(all.len(), 3);
}
