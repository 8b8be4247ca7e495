//! Identity store queries
//!
//! Rows are created only by the account factory in the server crate; this
//! module owns the SQL and the uniqueness contract. The password hash is
//! written at insert time and read back only through [`get_password_hash`],
//! never as part of an [`Identity`].

use crate::error::{map_unique, Result, StorageError};
use chrono::DateTime;
use larder_core::{Email, Identity, IdentityId, PasswordHash, Permissions};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const COLUMNS: &str = "id, email, name, is_active, is_staff, is_superuser, created_at";

/// Optional criteria for the administrative listing.
#[derive(Debug, Clone, Default)]
pub struct IdentityFilter {
    /// Substring match over email and name
    pub search: Option<String>,

    /// Keep only identities with this active flag
    pub is_active: Option<bool>,

    /// Keep only identities with this staff flag
    pub is_staff: Option<bool>,

    /// Keep only identities with this superuser flag
    pub is_superuser: Option<bool>,
}

fn identity_from_row(row: &SqliteRow) -> Result<Identity> {
    Ok(Identity::with_id(
        IdentityId::new(row.get::<String, _>("id")),
        Email::new_unchecked(row.get::<String, _>("email")),
        row.get::<String, _>("name"),
        Permissions {
            is_active: row.get("is_active"),
            is_staff: row.get("is_staff"),
            is_superuser: row.get("is_superuser"),
        },
        DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| StorageError::Query("Invalid timestamp".to_string()))?,
    ))
}

/// Persist a new identity together with its hashed credential.
///
/// A duplicate email surfaces as `StorageError::Duplicate`; nothing is
/// written in that case.
pub async fn insert(
    pool: &SqlitePool,
    identity: &Identity,
    password_hash: &PasswordHash,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO identities (id, email, name, password_hash, is_active, is_staff, is_superuser, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&identity.id)
    .bind(identity.email.as_str())
    .bind(&identity.name)
    .bind(password_hash.as_str())
    .bind(identity.permissions.is_active)
    .bind(identity.permissions.is_staff)
    .bind(identity.permissions.is_superuser)
    .bind(identity.created_at.timestamp())
    .execute(pool)
    .await
    .map_err(|e| map_unique(e, format!("email already registered: {}", identity.email)))?;

    Ok(())
}

/// Look up an identity by its normalized email address
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Identity>> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM identities WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(identity_from_row).transpose()
}

/// Look up an identity by ID
pub async fn find_by_id(pool: &SqlitePool, id: &IdentityId) -> Result<Option<Identity>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM identities WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(identity_from_row).transpose()
}

/// Get an identity's password hash for credential verification
pub async fn get_password_hash(pool: &SqlitePool, id: &IdentityId) -> Result<Option<String>> {
    let hash = sqlx::query_scalar("SELECT password_hash FROM identities WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(hash)
}

/// Replace an identity's password hash
pub async fn set_password_hash(
    pool: &SqlitePool,
    id: &IdentityId,
    password_hash: &PasswordHash,
) -> Result<()> {
    let result = sqlx::query("UPDATE identities SET password_hash = ? WHERE id = ?")
        .bind(password_hash.as_str())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Identity", id.as_str()));
    }

    Ok(())
}

/// Update an identity's display name
pub async fn set_name(pool: &SqlitePool, id: &IdentityId, name: &str) -> Result<()> {
    let result = sqlx::query("UPDATE identities SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Identity", id.as_str()));
    }

    Ok(())
}

/// Activate or deactivate an account
pub async fn set_active(pool: &SqlitePool, id: &IdentityId, active: bool) -> Result<()> {
    let result = sqlx::query("UPDATE identities SET is_active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Identity", id.as_str()));
    }

    Ok(())
}

/// Replace an identity's full flag set (promotion, demotion, deactivation)
pub async fn set_permissions(
    pool: &SqlitePool,
    id: &IdentityId,
    permissions: &Permissions,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE identities SET is_active = ?, is_staff = ?, is_superuser = ? WHERE id = ?",
    )
    .bind(permissions.is_active)
    .bind(permissions.is_staff)
    .bind(permissions.is_superuser)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Identity", id.as_str()));
    }

    Ok(())
}

/// Delete an identity. Owned recipes, tags, and ingredients cascade.
pub async fn delete(pool: &SqlitePool, id: &IdentityId) -> Result<()> {
    let result = sqlx::query("DELETE FROM identities WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Identity", id.as_str()));
    }

    Ok(())
}

/// List identities for the administrative surface, optionally filtered
pub async fn list(pool: &SqlitePool, filter: &IdentityFilter) -> Result<Vec<Identity>> {
    let mut sql = format!("SELECT {COLUMNS} FROM identities WHERE 1 = 1");
    if filter.search.is_some() {
        sql.push_str(" AND (email LIKE ? OR name LIKE ?)");
    }
    if filter.is_active.is_some() {
        sql.push_str(" AND is_active = ?");
    }
    if filter.is_staff.is_some() {
        sql.push_str(" AND is_staff = ?");
    }
    if filter.is_superuser.is_some() {
        sql.push_str(" AND is_superuser = ?");
    }
    sql.push_str(" ORDER BY email");

    let mut query = sqlx::query(&sql);
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query = query.bind(pattern.clone()).bind(pattern);
    }
    if let Some(active) = filter.is_active {
        query = query.bind(active);
    }
    if let Some(staff) = filter.is_staff {
        query = query.bind(staff);
    }
    if let Some(superuser) = filter.is_superuser {
        query = query.bind(superuser);
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(identity_from_row).collect()
}
