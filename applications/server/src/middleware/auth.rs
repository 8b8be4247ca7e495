/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use larder_core::IdentityId;
use std::sync::Arc;

/// Extension type storing the authenticated identity ID in the request.
/// Usable as an extractor in handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub IdentityId);

impl AuthenticatedUser {
    pub fn identity_id(&self) -> &IdentityId {
        &self.0
    }
}

/// Middleware validating the bearer token from the Authorization header.
///
/// Rejections carry the same JSON error body as every other failure.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::Auth("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ServerError::Auth("Malformed authorization header".to_string()))?;

    let identity_id = auth_service.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Auth("Invalid token".to_string())
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(identity_id));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}
