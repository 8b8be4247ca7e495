//! Tag queries

use crate::error::{map_unique, Result, StorageError};
use chrono::DateTime;
use larder_core::{IdentityId, Tag, TagId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn tag_from_row(row: &SqliteRow) -> Result<Tag> {
    Ok(Tag {
        id: TagId::new(row.get::<String, _>("id")),
        owner_id: IdentityId::new(row.get::<String, _>("owner_id")),
        name: row.get("name"),
        created_at: DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| StorageError::Query("Invalid timestamp".to_string()))?,
    })
}

/// Persist a new tag. Tag names are unique per owner.
pub async fn create(pool: &SqlitePool, tag: &Tag) -> Result<()> {
    sqlx::query("INSERT INTO tags (id, owner_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(&tag.id)
        .bind(&tag.owner_id)
        .bind(&tag.name)
        .bind(tag.created_at.timestamp())
        .execute(pool)
        .await
        .map_err(|e| map_unique(e, format!("tag name already used: {}", tag.name)))?;

    Ok(())
}

/// Fetch one of the owner's tags
pub async fn get(pool: &SqlitePool, owner: &IdentityId, id: &TagId) -> Result<Option<Tag>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at FROM tags WHERE owner_id = ? AND id = ?",
    )
    .bind(owner)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(tag_from_row).transpose()
}

/// List the owner's tags, ordered by name
pub async fn list(pool: &SqlitePool, owner: &IdentityId) -> Result<Vec<Tag>> {
    let rows = sqlx::query(
        "SELECT id, owner_id, name, created_at FROM tags WHERE owner_id = ? ORDER BY name",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    rows.iter().map(tag_from_row).collect()
}

/// Rename one of the owner's tags
pub async fn rename(
    pool: &SqlitePool,
    owner: &IdentityId,
    id: &TagId,
    name: &str,
) -> Result<()> {
    let result = sqlx::query("UPDATE tags SET name = ? WHERE id = ? AND owner_id = ?")
        .bind(name)
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await
        .map_err(|e| map_unique(e, format!("tag name already used: {name}")))?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Tag", id.as_str()));
    }

    Ok(())
}

/// Delete one of the owner's tags. Join rows cascade.
pub async fn delete(pool: &SqlitePool, owner: &IdentityId, id: &TagId) -> Result<()> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Tag", id.as_str()));
    }

    Ok(())
}
