/// Account factory tests - creation contract, defaults, and credential checks
mod common;

use larder_server::services::accounts::{AccountError, AccountOverrides};
use larder_storage::identities::{self, IdentityFilter};

#[tokio::test]
async fn create_user_with_email_successful() {
    let app = common::create_test_state().await;

    let email = "test@example.com";
    let password = "testpass123";
    let identity = app
        .state
        .accounts
        .create_user(email, password, AccountOverrides::default())
        .await
        .unwrap();

    assert_eq!(identity.email.as_str(), email);
    assert!(identity.permissions.is_active);
    assert!(!identity.permissions.is_staff);
    assert!(!identity.permissions.is_superuser);

    // exactly one row, and the stored hash verifies against the original
    let all = identities::list(&app.state.pool, &IdentityFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    let hash = identities::get_password_hash(&app.state.pool, &identity.id)
        .await
        .unwrap()
        .unwrap();
    assert!(app.state.auth.verify_password(password, &hash).unwrap());
    assert_ne!(hash, password, "plaintext must never be persisted");
}

#[tokio::test]
async fn create_user_normalizes_email_domain() {
    let app = common::create_test_state().await;

    let identity = app
        .state
        .accounts
        .create_user("Cook@EXAMPLE.Com", "testpass123", AccountOverrides::default())
        .await
        .unwrap();

    assert_eq!(identity.email.as_str(), "Cook@example.com");

    // the normalized form is what the store knows
    let found = identities::find_by_email(&app.state.pool, "Cook@example.com")
        .await
        .unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn create_user_without_email_fails_before_persisting() {
    let app = common::create_test_state().await;

    let err = app
        .state
        .accounts
        .create_user("", "testpass123", AccountOverrides::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidEmail(_)));

    let all = identities::list(&app.state.pool, &IdentityFilter::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn create_user_with_short_password_fails_before_persisting() {
    let app = common::create_test_state().await;

    let err = app
        .state
        .accounts
        .create_user("cook@example.com", "pw", AccountOverrides::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::PasswordTooShort(_)));

    let all = identities::list(&app.state.pool, &IdentityFilter::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn duplicate_email_fails_and_leaves_one_row() {
    let app = common::create_test_state().await;

    app.state
        .accounts
        .create_user("cook@example.com", "testpass123", AccountOverrides::default())
        .await
        .unwrap();

    let err = app
        .state
        .accounts
        .create_user("cook@example.com", "otherpass", AccountOverrides::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::EmailTaken(_)));

    let all = identities::list(&app.state.pool, &IdentityFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn duplicate_detection_uses_the_normalized_email() {
    let app = common::create_test_state().await;

    app.state
        .accounts
        .create_user("cook@example.com", "testpass123", AccountOverrides::default())
        .await
        .unwrap();

    // same address, differently-cased domain
    let err = app
        .state
        .accounts
        .create_user("cook@EXAMPLE.COM", "otherpass", AccountOverrides::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::EmailTaken(_)));
}

#[tokio::test]
async fn staff_and_superuser_tiers_set_their_default_flags() {
    let app = common::create_test_state().await;

    let staff = app
        .state
        .accounts
        .create_staff_user("staff@example.com", "testpass123", AccountOverrides::default())
        .await
        .unwrap();
    assert!(staff.permissions.is_staff);
    assert!(!staff.permissions.is_superuser);

    let root = app
        .state
        .accounts
        .create_superuser("root@example.com", "testpass123", AccountOverrides::default())
        .await
        .unwrap();
    assert!(root.permissions.is_staff);
    assert!(root.permissions.is_superuser);
}

#[tokio::test]
async fn explicit_overrides_beat_tier_defaults() {
    let app = common::create_test_state().await;

    let identity = app
        .state
        .accounts
        .create_user(
            "cook@example.com",
            "testpass123",
            AccountOverrides {
                name: Some("Cook".to_string()),
                is_staff: Some(true),
                is_superuser: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(identity.name, "Cook");
    assert!(identity.permissions.is_staff);
    assert!(!identity.permissions.is_superuser);

    // and downward: a staff tier account explicitly demoted
    let identity = app
        .state
        .accounts
        .create_staff_user(
            "plain@example.com",
            "testpass123",
            AccountOverrides {
                is_staff: Some(false),
                ..AccountOverrides::default()
            },
        )
        .await
        .unwrap();
    assert!(!identity.permissions.is_staff);
}

#[tokio::test]
async fn verify_credentials_accepts_only_the_right_password() {
    let app = common::create_test_state().await;

    app.state
        .accounts
        .create_user("cook@example.com", "testpass123", AccountOverrides::default())
        .await
        .unwrap();

    let ok = app
        .state
        .accounts
        .verify_credentials("cook@example.com", "testpass123")
        .await
        .unwrap();
    assert!(ok.is_some());

    let wrong = app
        .state
        .accounts
        .verify_credentials("cook@example.com", "wrongpass")
        .await
        .unwrap();
    assert!(wrong.is_none());

    let blank = app
        .state
        .accounts
        .verify_credentials("cook@example.com", "")
        .await
        .unwrap();
    assert!(blank.is_none());

    let unknown = app
        .state
        .accounts
        .verify_credentials("ghost@example.com", "testpass123")
        .await
        .unwrap();
    assert!(unknown.is_none());
}

#[tokio::test]
async fn verify_credentials_refuses_deactivated_accounts() {
    let app = common::create_test_state().await;

    let identity = app
        .state
        .accounts
        .create_user("cook@example.com", "testpass123", AccountOverrides::default())
        .await
        .unwrap();
    identities::set_active(&app.state.pool, &identity.id, false)
        .await
        .unwrap();

    let refused = app
        .state
        .accounts
        .verify_credentials("cook@example.com", "testpass123")
        .await
        .unwrap();
    assert!(refused.is_none());
}
