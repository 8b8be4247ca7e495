/// Admin API routes - staff-only listing, search, and account management
use crate::{
    api::users::UserResponse,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::accounts::AccountOverrides,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use larder_core::{Identity, IdentityId, Permissions, Recipe};
use larder_storage::{
    identities::{self, IdentityFilter},
    recipes,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AdminCreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListRecipesQuery {
    pub search: Option<String>,
}

/// Load the calling identity and refuse anyone without the staff flag.
async fn require_staff(app_state: &AppState, auth: &AuthenticatedUser) -> Result<Identity> {
    let identity = identities::find_by_id(&app_state.pool, auth.identity_id())
        .await?
        .ok_or_else(|| ServerError::Auth("Unknown account".to_string()))?;

    if !identity.permissions.is_active || !identity.permissions.is_staff {
        return Err(ServerError::Unauthorized(
            "Staff access required".to_string(),
        ));
    }

    Ok(identity)
}

/// GET /api/admin/users
/// List accounts, with optional search over email/name and flag filters
pub async fn list_users(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserResponse>>> {
    require_staff(&app_state, &auth).await?;

    let filter = IdentityFilter {
        search: query.search,
        is_active: query.is_active,
        is_staff: query.is_staff,
        is_superuser: query.is_superuser,
    };

    let listed = identities::list(&app_state.pool, &filter).await?;
    Ok(Json(listed.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/users
/// Create an account with explicit flag overrides
pub async fn create_user(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AdminCreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    require_staff(&app_state, &auth).await?;

    let identity = app_state
        .accounts
        .create_user(
            &req.email,
            &req.password,
            AccountOverrides {
                name: req.name,
                is_staff: req.is_staff,
                is_superuser: req.is_superuser,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(identity.into())))
}

/// PATCH /api/admin/users/:id
/// Activate/deactivate, promote/demote, or rename an account
pub async fn update_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AdminUpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    require_staff(&app_state, &auth).await?;

    let identity_id = IdentityId::new(id);
    let identity = identities::find_by_id(&app_state.pool, &identity_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    let permissions = Permissions {
        is_active: req.is_active.unwrap_or(identity.permissions.is_active),
        is_staff: req.is_staff.unwrap_or(identity.permissions.is_staff),
        is_superuser: req
            .is_superuser
            .unwrap_or(identity.permissions.is_superuser),
    };
    identities::set_permissions(&app_state.pool, &identity_id, &permissions).await?;

    if let Some(name) = &req.name {
        identities::set_name(&app_state.pool, &identity_id, name).await?;
    }

    let identity = identities::find_by_id(&app_state.pool, &identity_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;
    Ok(Json(identity.into()))
}

/// DELETE /api/admin/users/:id
/// Delete an account; owned records cascade
pub async fn delete_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    require_staff(&app_state, &auth).await?;

    let identity_id = IdentityId::new(id);
    identities::delete(&app_state.pool, &identity_id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/admin/recipes
/// List recipes across all owners, with optional search over title/description
pub async fn list_recipes(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<ListRecipesQuery>,
) -> Result<Json<Vec<Recipe>>> {
    require_staff(&app_state, &auth).await?;

    let listed = recipes::list_all(&app_state.pool, query.search.as_deref()).await?;
    Ok(Json(listed))
}
