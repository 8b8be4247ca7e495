//! Ingredient queries

use crate::error::{map_unique, Result, StorageError};
use chrono::DateTime;
use larder_core::{IdentityId, Ingredient, IngredientId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn ingredient_from_row(row: &SqliteRow) -> Result<Ingredient> {
    Ok(Ingredient {
        id: IngredientId::new(row.get::<String, _>("id")),
        owner_id: IdentityId::new(row.get::<String, _>("owner_id")),
        name: row.get("name"),
        created_at: DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| StorageError::Query("Invalid timestamp".to_string()))?,
    })
}

/// Persist a new ingredient. Ingredient names are unique per owner.
pub async fn create(pool: &SqlitePool, ingredient: &Ingredient) -> Result<()> {
    sqlx::query("INSERT INTO ingredients (id, owner_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(&ingredient.id)
        .bind(&ingredient.owner_id)
        .bind(&ingredient.name)
        .bind(ingredient.created_at.timestamp())
        .execute(pool)
        .await
        .map_err(|e| {
            map_unique(e, format!("ingredient name already used: {}", ingredient.name))
        })?;

    Ok(())
}

/// Fetch one of the owner's ingredients
pub async fn get(
    pool: &SqlitePool,
    owner: &IdentityId,
    id: &IngredientId,
) -> Result<Option<Ingredient>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at FROM ingredients WHERE owner_id = ? AND id = ?",
    )
    .bind(owner)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(ingredient_from_row).transpose()
}

/// List the owner's ingredients, ordered by name
pub async fn list(pool: &SqlitePool, owner: &IdentityId) -> Result<Vec<Ingredient>> {
    let rows = sqlx::query(
        "SELECT id, owner_id, name, created_at FROM ingredients WHERE owner_id = ? ORDER BY name",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    rows.iter().map(ingredient_from_row).collect()
}

/// Rename one of the owner's ingredients
pub async fn rename(
    pool: &SqlitePool,
    owner: &IdentityId,
    id: &IngredientId,
    name: &str,
) -> Result<()> {
    let result = sqlx::query("UPDATE ingredients SET name = ? WHERE id = ? AND owner_id = ?")
        .bind(name)
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await
        .map_err(|e| map_unique(e, format!("ingredient name already used: {name}")))?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Ingredient", id.as_str()));
    }

    Ok(())
}

/// Delete one of the owner's ingredients. Join rows cascade.
pub async fn delete(pool: &SqlitePool, owner: &IdentityId, id: &IngredientId) -> Result<()> {
    let result = sqlx::query("DELETE FROM ingredients WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Ingredient", id.as_str()));
    }

    Ok(())
}
