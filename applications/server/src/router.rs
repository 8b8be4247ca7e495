/// Router construction, shared by the binary and the integration tests
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/users", post(api::users::create_user))
        .route("/users/token", post(api::users::issue_token));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Own profile
        .route("/users/me", get(api::users::me))
        .route("/users/me", patch(api::users::update_me))
        // Recipes
        .route("/recipes", get(api::recipes::list_recipes))
        .route("/recipes", post(api::recipes::create_recipe))
        .route("/recipes/:id", get(api::recipes::get_recipe))
        .route("/recipes/:id", put(api::recipes::replace_recipe))
        .route("/recipes/:id", patch(api::recipes::update_recipe))
        .route("/recipes/:id", delete(api::recipes::delete_recipe))
        // Tags
        .route("/tags", get(api::tags::list_tags))
        .route("/tags", post(api::tags::create_tag))
        .route("/tags/:id", patch(api::tags::update_tag))
        .route("/tags/:id", delete(api::tags::delete_tag))
        // Ingredients
        .route("/ingredients", get(api::ingredients::list_ingredients))
        .route("/ingredients", post(api::ingredients::create_ingredient))
        .route("/ingredients/:id", patch(api::ingredients::update_ingredient))
        .route("/ingredients/:id", delete(api::ingredients::delete_ingredient))
        // Admin
        .route("/admin/users", get(api::admin::list_users))
        .route("/admin/users", post(api::admin::create_user))
        .route("/admin/users/:id", patch(api::admin::update_user))
        .route("/admin/users/:id", delete(api::admin::delete_user))
        .route("/admin/recipes", get(api::admin::list_recipes))
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    // Combine routes
    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
