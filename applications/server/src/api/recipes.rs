/// Recipe API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use larder_core::{Ingredient, IngredientId, Price, Recipe, RecipeId, Tag, TagId};
use larder_storage::recipes::{self, RecipeFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub time_minutes: i64,
    pub price: Price,
    pub link: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_minutes: Option<i64>,
    pub price: Option<Price>,
    pub link: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ListRecipesQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub ingredient: Option<String>,
}

/// Recipe together with its attached tags and ingredients
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

async fn load_detail(app_state: &AppState, recipe: Recipe) -> Result<RecipeDetail> {
    let tags = recipes::tags_for(&app_state.pool, &recipe.id).await?;
    let ingredients = recipes::ingredients_for(&app_state.pool, &recipe.id).await?;
    Ok(RecipeDetail {
        recipe,
        tags,
        ingredients,
    })
}

/// GET /api/recipes
/// List the authenticated user's recipes
pub async fn list_recipes(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<ListRecipesQuery>,
) -> Result<Json<Vec<Recipe>>> {
    let filter = RecipeFilter {
        search: query.search,
        tag: query.tag.map(TagId::new),
        ingredient: query.ingredient.map(IngredientId::new),
    };

    let listed = recipes::list(&app_state.pool, auth.identity_id(), &filter).await?;
    Ok(Json(listed))
}

/// POST /api/recipes
/// Create a new recipe
pub async fn create_recipe(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetail>)> {
    if req.title.trim().is_empty() {
        return Err(ServerError::BadRequest("title must not be empty".to_string()));
    }

    let mut recipe = Recipe::new(
        auth.identity_id().clone(),
        req.title,
        req.time_minutes,
        req.price,
    );
    recipe.description = req.description;
    recipe.link = req.link;

    recipes::create(&app_state.pool, &recipe).await?;

    if let Some(tags) = req.tags {
        let tag_ids: Vec<TagId> = tags.into_iter().map(TagId::new).collect();
        recipes::set_tags(&app_state.pool, auth.identity_id(), &recipe.id, &tag_ids).await?;
    }
    if let Some(ingredients) = req.ingredients {
        let ingredient_ids: Vec<IngredientId> =
            ingredients.into_iter().map(IngredientId::new).collect();
        recipes::set_ingredients(
            &app_state.pool,
            auth.identity_id(),
            &recipe.id,
            &ingredient_ids,
        )
        .await?;
    }

    let detail = load_detail(&app_state, recipe).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/recipes/:id
/// Get one recipe with its tags and ingredients
pub async fn get_recipe(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<RecipeDetail>> {
    let recipe_id = RecipeId::new(id);
    let recipe = recipes::get(&app_state.pool, auth.identity_id(), &recipe_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Recipe not found".to_string()))?;

    Ok(Json(load_detail(&app_state, recipe).await?))
}

/// PATCH /api/recipes/:id
/// Partially update a recipe
pub async fn update_recipe(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeDetail>> {
    let recipe_id = RecipeId::new(id);
    let mut recipe = recipes::get(&app_state.pool, auth.identity_id(), &recipe_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Recipe not found".to_string()))?;

    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(ServerError::BadRequest("title must not be empty".to_string()));
        }
        recipe.title = title;
    }
    if let Some(description) = req.description {
        recipe.description = Some(description);
    }
    if let Some(time_minutes) = req.time_minutes {
        recipe.time_minutes = time_minutes;
    }
    if let Some(price) = req.price {
        recipe.price = price;
    }
    if let Some(link) = req.link {
        recipe.link = Some(link);
    }

    recipes::update(&app_state.pool, &recipe).await?;

    if let Some(tags) = req.tags {
        let tag_ids: Vec<TagId> = tags.into_iter().map(TagId::new).collect();
        recipes::set_tags(&app_state.pool, auth.identity_id(), &recipe.id, &tag_ids).await?;
    }
    if let Some(ingredients) = req.ingredients {
        let ingredient_ids: Vec<IngredientId> =
            ingredients.into_iter().map(IngredientId::new).collect();
        recipes::set_ingredients(
            &app_state.pool,
            auth.identity_id(),
            &recipe.id,
            &ingredient_ids,
        )
        .await?;
    }

    Ok(Json(load_detail(&app_state, recipe).await?))
}

/// DELETE /api/recipes/:id
/// Delete a recipe
pub async fn delete_recipe(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let recipe_id = RecipeId::new(id);
    recipes::delete(&app_state.pool, auth.identity_id(), &recipe_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// PUT /api/recipes/:id
/// Replace a recipe wholesale
pub async fn replace_recipe(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<Json<RecipeDetail>> {
    if req.title.trim().is_empty() {
        return Err(ServerError::BadRequest("title must not be empty".to_string()));
    }

    let recipe_id = RecipeId::new(id);
    let mut recipe = recipes::get(&app_state.pool, auth.identity_id(), &recipe_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Recipe not found".to_string()))?;

    recipe.title = req.title;
    recipe.description = req.description;
    recipe.time_minutes = req.time_minutes;
    recipe.price = req.price;
    recipe.link = req.link;

    recipes::update(&app_state.pool, &recipe).await?;

    let tag_ids: Vec<TagId> = req
        .tags
        .unwrap_or_default()
        .into_iter()
        .map(TagId::new)
        .collect();
    recipes::set_tags(&app_state.pool, auth.identity_id(), &recipe.id, &tag_ids).await?;

    let ingredient_ids: Vec<IngredientId> = req
        .ingredients
        .unwrap_or_default()
        .into_iter()
        .map(IngredientId::new)
        .collect();
    recipes::set_ingredients(
        &app_state.pool,
        auth.identity_id(),
        &recipe.id,
        &ingredient_ids,
    )
    .await?;

    Ok(Json(load_detail(&app_state, recipe).await?))
}
