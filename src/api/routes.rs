//! Router configuration for the API.
//!
//! Centralized route registration and middleware wiring.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::services::Services;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first): request IDs are assigned before logging picks them up. CORS is
/// open; the browser frontend is served from another origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes(state.services.clone()))
        .merge(handlers::health::health_routes().with_state(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Creates the service-backed API routes.
///
/// Split out from `create_router` so tests can drive the API surface with
/// in-memory repositories and no store connection.
pub fn api_routes(services: Services) -> Router {
    Router::new()
        .nest("/public", handlers::public::public_routes())
        .nest("/admin", handlers::admin::admin_routes())
        .nest("/journal", handlers::journal::journal_routes())
        .with_state(services)
}
