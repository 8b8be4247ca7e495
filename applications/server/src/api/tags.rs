/// Tag API routes
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
use larder_core::{Tag, TagId};
use larder_storage::tags;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub name: String,
}

/// GET /api/tags
/// List the authenticated user's tags
pub async fn list_tags(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Tag>>> {
    let listed = tags::list(&app_state.pool, auth.identity_id()).await?;
    Ok(Json(listed))
}

/// POST /api/tags
/// Create a new tag
pub async fn create_tag(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>)> {
    if req.name.trim().is_empty() {
        return Err(ServerError::BadRequest("name must not be empty".to_string()));
    }

    let tag = Tag::new(auth.identity_id().clone(), req.name);
    tags::create(&app_state.pool, &tag).await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

/// PATCH /api/tags/:id
/// Rename a tag
pub async fn update_tag(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateTagRequest>,
) -> Result<Json<Tag>> {
    if req.name.trim().is_empty() {
        return Err(ServerError::BadRequest("name must not be empty".to_string()));
    }

    let tag_id = TagId::new(id);
    tags::rename(&app_state.pool, auth.identity_id(), &tag_id, &req.name).await?;

    let tag = tags::get(&app_state.pool, auth.identity_id(), &tag_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Tag not found".to_string()))?;
    Ok(Json(tag))
}

/// DELETE /api/tags/:id
/// Delete a tag
pub async fn delete_tag(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let tag_id = TagId::new(id);
    tags::delete(&app_state.pool, auth.identity_id(), &tag_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
