//! Larder Storage
//!
//! SQLite persistence layer for the Larder recipe catalogue.
//!
//! Each entity owns its own queries as a vertical slice ([`identities`],
//! [`recipes`], [`tags`], [`ingredients`]); there is no global registry or
//! model-attached manager. Callers pass the pool handle explicitly to the
//! query functions they need.
//!
//! # Example
//!
//! ```rust,no_run
//! use larder_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://larder.db").await?;
//! run_migrations(&pool).await?;
//!
//! let everyone = larder_storage::identities::list(&pool, &Default::default()).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod identities;
pub mod ingredients;
pub mod recipes;
pub mod tags;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://larder.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true) // Create database file if it doesn't exist
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .busy_timeout(std::time::Duration::from_secs(30)) // Wait up to 30s for locks
        .foreign_keys(true); // Owner deletion must cascade to owned records

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
