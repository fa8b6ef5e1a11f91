//! Unauthenticated endpoints: liveness string and self-registration.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Router, extract::State};

use crate::api::doc::PUBLIC_TAG;
use crate::api::dto::CreateUserRequest;
use crate::error::AppError;
use crate::services::Services;
use crate::utils::ValidatedJson;

/// Creates public routes.
///
/// Routes:
/// - GET  /healthCheck  - Constant liveness response
/// - POST /create_user  - Self-service registration
pub fn public_routes() -> Router<Services> {
    Router::new()
        .route("/healthCheck", get(health_check))
        .route("/create_user", post(create_user))
}

/// GET /public/healthCheck - Constant liveness response
///
/// Always returns 200 with a fixed string, independent of system state.
#[utoipa::path(
    get,
    path = "/public/healthCheck",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = PUBLIC_TAG
)]
pub async fn health_check() -> &'static str {
    "okk tested!"
}

/// POST /public/create_user - Register a user
///
/// Persists the user with the default role. Returns 200 with an empty
/// body on success; failures surface as typed errors (409 on duplicate
/// username) instead of being swallowed.
#[utoipa::path(
    post,
    path = "/public/create_user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Invalid payload", body = crate::api::dto::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::api::dto::ErrorResponse)
    ),
    tag = PUBLIC_TAG
)]
pub async fn create_user(
    State(services): State<Services>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<StatusCode, AppError> {
    services.users.save_new_user(payload.into_new_user()).await?;
    Ok(StatusCode::OK)
}
