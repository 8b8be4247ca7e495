/// Shared application state
use crate::services::{AccountFactory, AuthService};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthService>,
    pub accounts: Arc<AccountFactory>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: Arc<AuthService>, accounts: Arc<AccountFactory>) -> Self {
        Self {
            pool,
            auth,
            accounts,
        }
    }
}
