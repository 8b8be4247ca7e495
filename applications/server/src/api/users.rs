/// User API routes - account creation, token issuance, own profile
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::accounts::{AccountOverrides, MIN_PASSWORD_LENGTH},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use larder_core::{Identity, PasswordHash};
use larder_storage::identities;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Identity representation returned by the API. Never carries password
/// material.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            email: identity.email.to_string(),
            name: identity.name,
            is_active: identity.permissions.is_active,
            is_staff: identity.permissions.is_staff,
            is_superuser: identity.permissions.is_superuser,
        }
    }
}

/// POST /api/users
/// Create a new account
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let identity = app_state
        .accounts
        .create_user(
            &req.email,
            &req.password,
            AccountOverrides {
                name: Some(req.name),
                ..AccountOverrides::default()
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(identity.into())))
}

/// POST /api/users/token
/// Exchange credentials for a bearer token
pub async fn issue_token(
    State(app_state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    let identity = app_state
        .accounts
        .verify_credentials(&req.email, &req.password)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    let token = app_state.auth.create_token(&identity.id)?;

    Ok(Json(TokenResponse { token }))
}

/// GET /api/users/me
/// The authenticated identity
pub async fn me(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<UserResponse>> {
    let identity = identities::find_by_id(&app_state.pool, auth.identity_id())
        .await?
        .ok_or_else(|| ServerError::Auth("Unknown account".to_string()))?;

    Ok(Json(identity.into()))
}

/// PATCH /api/users/me
/// Update own display name and/or password
pub async fn update_me(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>> {
    if let Some(password) = &req.password {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServerError::BadRequest(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        let hash = PasswordHash::new(app_state.auth.hash_password(password)?);
        identities::set_password_hash(&app_state.pool, auth.identity_id(), &hash).await?;
    }

    if let Some(name) = &req.name {
        identities::set_name(&app_state.pool, auth.identity_id(), name).await?;
    }

    let identity = identities::find_by_id(&app_state.pool, auth.identity_id())
        .await?
        .ok_or_else(|| ServerError::Auth("Unknown account".to_string()))?;

    Ok(Json(identity.into()))
}
