/// Ingredient API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use larder_core::{Ingredient, IngredientId};
use larder_storage::ingredients;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateIngredientRequest {
    pub name: String,
}

/// GET /api/ingredients
/// List the authenticated user's ingredients
pub async fn list_ingredients(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Ingredient>>> {
    let listed = ingredients::list(&app_state.pool, auth.identity_id()).await?;
    Ok(Json(listed))
}

/// POST /api/ingredients
/// Create a new ingredient
pub async fn create_ingredient(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<Ingredient>)> {
    if req.name.trim().is_empty() {
        return Err(ServerError::BadRequest("name must not be empty".to_string()));
    }

    let ingredient = Ingredient::new(auth.identity_id().clone(), req.name);
    ingredients::create(&app_state.pool, &ingredient).await?;

    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// PATCH /api/ingredients/:id
/// Rename an ingredient
pub async fn update_ingredient(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateIngredientRequest>,
) -> Result<Json<Ingredient>> {
    if req.name.trim().is_empty() {
        return Err(ServerError::BadRequest("name must not be empty".to_string()));
    }

    let ingredient_id = IngredientId::new(id);
    ingredients::rename(&app_state.pool, auth.identity_id(), &ingredient_id, &req.name).await?;

    let ingredient = ingredients::get(&app_state.pool, auth.identity_id(), &ingredient_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Ingredient not found".to_string()))?;
    Ok(Json(ingredient))
}

/// DELETE /api/ingredients/:id
/// Delete an ingredient
pub async fn delete_ingredient(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let ingredient_id = IngredientId::new(id);
    ingredients::delete(&app_state.pool, auth.identity_id(), &ingredient_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
