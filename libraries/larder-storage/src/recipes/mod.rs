//! Recipe queries
//!
//! Every read and write is scoped to the owning identity: a recipe that
//! belongs to someone else behaves exactly like a recipe that does not
//! exist.

use crate::error::{Result, StorageError};
use chrono::DateTime;
use larder_core::{IdentityId, Ingredient, IngredientId, Price, Recipe, RecipeId, Tag, TagId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const COLUMNS: &str = "id, owner_id, title, description, time_minutes, price_cents, link, created_at";

/// Optional criteria for listing an owner's recipes.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Substring match over title and description
    pub search: Option<String>,

    /// Keep only recipes carrying this tag
    pub tag: Option<TagId>,

    /// Keep only recipes using this ingredient
    pub ingredient: Option<IngredientId>,
}

fn recipe_from_row(row: &SqliteRow) -> Result<Recipe> {
    Ok(Recipe {
        id: RecipeId::new(row.get::<String, _>("id")),
        owner_id: IdentityId::new(row.get::<String, _>("owner_id")),
        title: row.get("title"),
        description: row.get("description"),
        time_minutes: row.get("time_minutes"),
        price: Price::from_cents(row.get::<i64, _>("price_cents")),
        link: row.get("link"),
        created_at: DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| StorageError::Query("Invalid timestamp".to_string()))?,
    })
}

/// Persist a new recipe
pub async fn create(pool: &SqlitePool, recipe: &Recipe) -> Result<()> {
    sqlx::query(
        "INSERT INTO recipes (id, owner_id, title, description, time_minutes, price_cents, link, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&recipe.id)
    .bind(&recipe.owner_id)
    .bind(&recipe.title)
    .bind(&recipe.description)
    .bind(recipe.time_minutes)
    .bind(recipe.price.cents())
    .bind(&recipe.link)
    .bind(recipe.created_at.timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch one of the owner's recipes
pub async fn get(
    pool: &SqlitePool,
    owner: &IdentityId,
    id: &RecipeId,
) -> Result<Option<Recipe>> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM recipes WHERE owner_id = ? AND id = ?"
    ))
    .bind(owner)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(recipe_from_row).transpose()
}

/// List the owner's recipes, optionally filtered, ordered by title
pub async fn list(
    pool: &SqlitePool,
    owner: &IdentityId,
    filter: &RecipeFilter,
) -> Result<Vec<Recipe>> {
    let mut sql = format!("SELECT {COLUMNS} FROM recipes WHERE owner_id = ?");
    if filter.search.is_some() {
        sql.push_str(" AND (title LIKE ? OR description LIKE ?)");
    }
    if filter.tag.is_some() {
        sql.push_str(" AND id IN (SELECT recipe_id FROM recipe_tags WHERE tag_id = ?)");
    }
    if filter.ingredient.is_some() {
        sql.push_str(
            " AND id IN (SELECT recipe_id FROM recipe_ingredients WHERE ingredient_id = ?)",
        );
    }
    sql.push_str(" ORDER BY title");

    let mut query = sqlx::query(&sql).bind(owner);
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query = query.bind(pattern.clone()).bind(pattern);
    }
    if let Some(tag) = &filter.tag {
        query = query.bind(tag);
    }
    if let Some(ingredient) = &filter.ingredient {
        query = query.bind(ingredient);
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(recipe_from_row).collect()
}

/// List recipes across all owners for the administrative surface
pub async fn list_all(pool: &SqlitePool, search: Option<&str>) -> Result<Vec<Recipe>> {
    let mut sql = format!("SELECT {COLUMNS} FROM recipes WHERE 1 = 1");
    if search.is_some() {
        sql.push_str(" AND (title LIKE ? OR description LIKE ?)");
    }
    sql.push_str(" ORDER BY title");

    let mut query = sqlx::query(&sql);
    if let Some(search) = search {
        let pattern = format!("%{search}%");
        query = query.bind(pattern.clone()).bind(pattern);
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(recipe_from_row).collect()
}

/// Rewrite one of the owner's recipes with new field values
pub async fn update(pool: &SqlitePool, recipe: &Recipe) -> Result<()> {
    let result = sqlx::query(
        "UPDATE recipes SET title = ?, description = ?, time_minutes = ?, price_cents = ?, link = ?
         WHERE id = ? AND owner_id = ?",
    )
    .bind(&recipe.title)
    .bind(&recipe.description)
    .bind(recipe.time_minutes)
    .bind(recipe.price.cents())
    .bind(&recipe.link)
    .bind(&recipe.id)
    .bind(&recipe.owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Recipe", recipe.id.as_str()));
    }

    Ok(())
}

/// Delete one of the owner's recipes. Join rows cascade.
pub async fn delete(pool: &SqlitePool, owner: &IdentityId, id: &RecipeId) -> Result<()> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Recipe", id.as_str()));
    }

    Ok(())
}

/// Replace the set of tags attached to one of the owner's recipes.
///
/// Runs in a single transaction; every tag must belong to the same owner
/// as the recipe.
pub async fn set_tags(
    pool: &SqlitePool,
    owner: &IdentityId,
    recipe_id: &RecipeId,
    tag_ids: &[TagId],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let owned: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM recipes WHERE id = ? AND owner_id = ?")
            .bind(recipe_id)
            .bind(owner)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        return Err(StorageError::not_found("Recipe", recipe_id.as_str()));
    }

    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    for tag_id in tag_ids {
        let known: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM tags WHERE id = ? AND owner_id = ?")
                .bind(tag_id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
        if known.is_none() {
            return Err(StorageError::not_found("Tag", tag_id.as_str()));
        }

        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Replace the set of ingredients attached to one of the owner's recipes.
pub async fn set_ingredients(
    pool: &SqlitePool,
    owner: &IdentityId,
    recipe_id: &RecipeId,
    ingredient_ids: &[IngredientId],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let owned: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM recipes WHERE id = ? AND owner_id = ?")
            .bind(recipe_id)
            .bind(owner)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        return Err(StorageError::not_found("Recipe", recipe_id.as_str()));
    }

    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    for ingredient_id in ingredient_ids {
        let known: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM ingredients WHERE id = ? AND owner_id = ?")
                .bind(ingredient_id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
        if known.is_none() {
            return Err(StorageError::not_found("Ingredient", ingredient_id.as_str()));
        }

        sqlx::query("INSERT INTO recipe_ingredients (recipe_id, ingredient_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(ingredient_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Tags attached to a recipe, ordered by name
pub async fn tags_for(pool: &SqlitePool, recipe_id: &RecipeId) -> Result<Vec<Tag>> {
    let rows = sqlx::query(
        "SELECT t.id, t.owner_id, t.name, t.created_at
         FROM tags t
         INNER JOIN recipe_tags rt ON t.id = rt.tag_id
         WHERE rt.recipe_id = ?
         ORDER BY t.name",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(Tag {
                id: TagId::new(row.get::<String, _>("id")),
                owner_id: IdentityId::new(row.get::<String, _>("owner_id")),
                name: row.get("name"),
                created_at: DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
                    .ok_or_else(|| StorageError::Query("Invalid timestamp".to_string()))?,
            })
        })
        .collect()
}

/// Ingredients attached to a recipe, ordered by name
pub async fn ingredients_for(pool: &SqlitePool, recipe_id: &RecipeId) -> Result<Vec<Ingredient>> {
    let rows = sqlx::query(
        "SELECT i.id, i.owner_id, i.name, i.created_at
         FROM ingredients i
         INNER JOIN recipe_ingredients ri ON i.id = ri.ingredient_id
         WHERE ri.recipe_id = ?
         ORDER BY i.name",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(Ingredient {
                id: IngredientId::new(row.get::<String, _>("id")),
                owner_id: IdentityId::new(row.get::<String, _>("owner_id")),
                name: row.get("name"),
                created_at: DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
                    .ok_or_else(|| StorageError::Query("Invalid timestamp".to_string()))?,
            })
        })
        .collect()
}
