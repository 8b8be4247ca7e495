/// Common test utilities and fixtures
use larder_server::{
    services::{AccountFactory, AuthService},
    state::AppState,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Application state backed by a real temp-file database, cleaned up on drop
pub struct TestApp {
    pub state: AppState,
    _temp_dir: TempDir,
}

/// Create application state with migrations applied
pub async fn create_test_state() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let pool = larder_storage::create_pool(&db_url)
        .await
        .expect("Failed to create pool");
    larder_storage::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let auth = Arc::new(AuthService::new(
        "test-secret-key".to_string(),
        1, // 1 hour expiry
    ));
    let accounts = Arc::new(AccountFactory::new(pool.clone()));

    TestApp {
        state: AppState::new(pool, auth, accounts),
        _temp_dir: temp_dir,
    }
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_EMAIL: &str = "text@example.com";
    pub const TEST_PASSWORD: &str = "test123#";
    pub const TEST_NAME: &str = "Test Name";
}
