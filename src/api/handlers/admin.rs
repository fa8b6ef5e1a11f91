//! Privileged endpoints for user administration.

use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router, extract::Path, extract::State};

use crate::api::doc::ADMIN_TAG;
use crate::api::dto::{CreateUserRequest, MessageResponse, UserResponse};
use crate::error::AppError;
use crate::repositories::USER_COLLECTION;
use crate::services::Services;
use crate::utils::ValidatedJson;

/// Creates admin routes.
///
/// Routes:
/// - GET    /all-users          - List every user
/// - POST   /create-admin-user  - Create a user with elevated roles
/// - DELETE /user/{username}    - Remove a user
pub fn admin_routes() -> Router<Services> {
    Router::new()
        .route("/all-users", get(get_all_users))
        .route("/create-admin-user", post(create_admin_user))
        .route("/user/{username}", delete(delete_user))
}

/// GET /admin/all-users - List every user
///
/// An empty collection is reported as 404 rather than as an empty list.
#[utoipa::path(
    get,
    path = "/admin/all-users",
    responses(
        (status = 200, description = "All stored users", body = [UserResponse]),
        (status = 404, description = "No users exist", body = crate::api::dto::ErrorResponse)
    ),
    tag = ADMIN_TAG
)]
pub async fn get_all_users(
    State(services): State<Services>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let all = services.users.get_all().await?;
    if all.is_empty() {
        return Err(AppError::NotFound {
            entity: "user".to_string(),
            field: "collection".to_string(),
            value: USER_COLLECTION.to_string(),
        });
    }
    Ok(Json(all.into_iter().map(UserResponse::from).collect()))
}

/// POST /admin/create-admin-user - Create an admin user
///
/// Returns the fixed confirmation payload on success; a failed save
/// propagates as a typed error rather than reporting success.
#[utoipa::path(
    post,
    path = "/admin/create-admin-user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Admin user created", body = MessageResponse),
        (status = 400, description = "Invalid payload", body = crate::api::dto::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::api::dto::ErrorResponse)
    ),
    tag = ADMIN_TAG
)]
pub async fn create_admin_user(
    State(services): State<Services>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    services.users.save_admin(payload.into_new_user()).await?;
    Ok(Json(MessageResponse::new("Admin user created successfully")))
}

/// DELETE /admin/user/{username} - Remove a user
#[utoipa::path(
    delete,
    path = "/admin/user/{username}",
    params(("username" = String, Path, description = "Username to remove")),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "Unknown username", body = crate::api::dto::ErrorResponse)
    ),
    tag = ADMIN_TAG
)]
pub async fn delete_user(
    State(services): State<Services>,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    if services.users.delete_by_username(&username).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            entity: "user".to_string(),
            field: "username".to_string(),
            value: username,
        })
    }
}
