use larder_core::{Email, Identity, PasswordHash, Permissions};
use larder_storage::identities::{self, IdentityFilter};
use larder_storage::StorageError;

use test_helpers::{create_test_identity, create_test_recipe, TestDb};

#[tokio::test]
async fn insert_and_find_by_email() {
    let db = TestDb::new().await;

    let identity = create_test_identity(db.pool(), "cook@example.com").await;

    let found = identities::find_by_email(db.pool(), "cook@example.com")
        .await
        .unwrap()
        .expect("identity should exist");
    assert_eq!(found.id, identity.id);
    assert_eq!(found.email.as_str(), "cook@example.com");
    assert!(found.permissions.is_active);
    assert!(!found.permissions.is_staff);
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_first_row_survives() {
    let db = TestDb::new().await;

    create_test_identity(db.pool(), "cook@example.com").await;

    let second = Identity::new(
        Email::parse("cook@example.com").unwrap(),
        "Impostor",
        Permissions::member(),
    );
    let err = identities::insert(db.pool(), &second, &PasswordHash::new("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Duplicate(_)));

    // exactly one row for that email, and it is the original
    let all = identities::list(db.pool(), &IdentityFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Test Name");
}

#[tokio::test]
async fn password_hash_round_trip() {
    let db = TestDb::new().await;

    let identity = create_test_identity(db.pool(), "cook@example.com").await;

    let stored = identities::get_password_hash(db.pool(), &identity.id)
        .await
        .unwrap();
    assert_eq!(stored.as_deref(), Some("not-a-real-hash"));

    identities::set_password_hash(db.pool(), &identity.id, &PasswordHash::new("rotated"))
        .await
        .unwrap();
    let stored = identities::get_password_hash(db.pool(), &identity.id)
        .await
        .unwrap();
    assert_eq!(stored.as_deref(), Some("rotated"));
}

#[tokio::test]
async fn flag_updates_are_independent() {
    let db = TestDb::new().await;

    let identity = create_test_identity(db.pool(), "cook@example.com").await;

    identities::set_active(db.pool(), &identity.id, false)
        .await
        .unwrap();
    let reloaded = identities::find_by_id(db.pool(), &identity.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!reloaded.permissions.is_active);
    assert!(!reloaded.permissions.is_staff);

    identities::set_permissions(db.pool(), &identity.id, &Permissions::superuser())
        .await
        .unwrap();
    let reloaded = identities::find_by_id(db.pool(), &identity.id)
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.permissions.is_staff);
    assert!(reloaded.permissions.is_superuser);
}

#[tokio::test]
async fn updating_a_missing_identity_is_not_found() {
    let db = TestDb::new().await;

    let ghost = larder_core::IdentityId::generate();
    let err = identities::set_active(db.pool(), &ghost, false)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn deleting_an_identity_cascades_to_owned_records() {
    let db = TestDb::new().await;

    let owner = create_test_identity(db.pool(), "cook@example.com").await;
    let keeper = create_test_identity(db.pool(), "other@example.com").await;
    let recipe = create_test_recipe(db.pool(), &owner, "Shakshuka").await;
    create_test_recipe(db.pool(), &keeper, "Congee").await;

    let tag = larder_core::Tag::new(owner.id.clone(), "Breakfast");
    larder_storage::tags::create(db.pool(), &tag).await.unwrap();
    larder_storage::recipes::set_tags(db.pool(), &owner.id, &recipe.id, &[tag.id.clone()])
        .await
        .unwrap();

    identities::delete(db.pool(), &owner.id).await.unwrap();

    assert!(identities::find_by_id(db.pool(), &owner.id)
        .await
        .unwrap()
        .is_none());
    assert!(larder_storage::recipes::get(db.pool(), &owner.id, &recipe.id)
        .await
        .unwrap()
        .is_none());
    assert!(larder_storage::tags::list(db.pool(), &owner.id)
        .await
        .unwrap()
        .is_empty());

    // unrelated owners are untouched
    let kept = larder_storage::recipes::list(db.pool(), &keeper.id, &Default::default())
        .await
        .unwrap();
    assert_eq!(kept.len(), 1);
}

#[tokio::test]
async fn list_supports_search_and_flag_filters() {
    let db = TestDb::new().await;

    let staff = create_test_identity(db.pool(), "admin@example.com").await;
    identities::set_permissions(db.pool(), &staff.id, &Permissions::staff())
        .await
        .unwrap();
    create_test_identity(db.pool(), "cook@example.com").await;
    create_test_identity(db.pool(), "guest@elsewhere.org").await;

    let filter = IdentityFilter {
        search: Some("example.com".to_string()),
        ..Default::default()
    };
    let hits = identities::list(db.pool(), &filter).await.unwrap();
    assert_eq!(hits.len(), 2);

    let filter = IdentityFilter {
        is_staff: Some(true),
        ..Default::default()
    };
    let hits = identities::list(db.pool(), &filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].email.as_str(), "admin@example.com");

    // results come back ordered by email
    let all = identities::list(db.pool(), &IdentityFilter::default())
        .await
        .unwrap();
    let emails: Vec<_> = all.iter().map(|i| i.email.as_str().to_string()).collect();
    let mut sorted = emails.clone();
    sorted.sort();
    assert_eq!(emails, sorted);
}
