//! Journal entry CRUD endpoints.
//!
//! Routes are username-scoped; the caller identity is taken from the path
//! rather than a session.

use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router, extract::Path, extract::State};
use mongodb::bson::oid::ObjectId;

use crate::api::doc::JOURNAL_TAG;
use crate::api::dto::{
    CreateJournalEntryRequest, JournalEntryResponse, UpdateJournalEntryRequest,
};
use crate::error::{AppError, AppResult};
use crate::services::Services;
use crate::utils::ValidatedJson;

/// Creates journal routes.
///
/// Routes:
/// - GET    /{username}           - List a user's entries
/// - POST   /{username}           - Create an entry for a user
/// - GET    /id/{id}              - Fetch one entry
/// - PUT    /id/{username}/{id}   - Update an entry
/// - DELETE /id/{username}/{id}   - Delete an entry
pub fn journal_routes() -> Router<Services> {
    Router::new()
        .route("/{username}", get(list_entries).post(create_entry))
        .route("/id/{id}", get(get_entry))
        .route("/id/{username}/{id}", put(update_entry).delete(delete_entry))
}

/// GET /journal/{username} - List a user's entries
#[utoipa::path(
    get,
    path = "/journal/{username}",
    params(("username" = String, Path, description = "Owning username")),
    responses(
        (status = 200, description = "The user's entries", body = [JournalEntryResponse]),
        (status = 404, description = "Unknown username", body = crate::api::dto::ErrorResponse)
    ),
    tag = JOURNAL_TAG
)]
pub async fn list_entries(
    State(services): State<Services>,
    Path(username): Path<String>,
) -> Result<Json<Vec<JournalEntryResponse>>, AppError> {
    let entries = services.journal_entries.entries_for_user(&username).await?;
    Ok(Json(
        entries.into_iter().map(JournalEntryResponse::from).collect(),
    ))
}

/// POST /journal/{username} - Create an entry
#[utoipa::path(
    post,
    path = "/journal/{username}",
    params(("username" = String, Path, description = "Owning username")),
    request_body = CreateJournalEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = JournalEntryResponse),
        (status = 400, description = "Invalid payload", body = crate::api::dto::ErrorResponse),
        (status = 404, description = "Unknown username", body = crate::api::dto::ErrorResponse)
    ),
    tag = JOURNAL_TAG
)]
pub async fn create_entry(
    State(services): State<Services>,
    Path(username): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateJournalEntryRequest>,
) -> Result<(StatusCode, Json<JournalEntryResponse>), AppError> {
    let entry = services
        .journal_entries
        .create_entry(&username, payload.into_new_entry())
        .await?;
    Ok((StatusCode::CREATED, Json(JournalEntryResponse::from(entry))))
}

/// GET /journal/id/{id} - Fetch one entry
#[utoipa::path(
    get,
    path = "/journal/id/{id}",
    params(("id" = String, Path, description = "Entry id (24-hex)")),
    responses(
        (status = 200, description = "The entry", body = JournalEntryResponse),
        (status = 400, description = "Malformed id", body = crate::api::dto::ErrorResponse),
        (status = 404, description = "Unknown id", body = crate::api::dto::ErrorResponse)
    ),
    tag = JOURNAL_TAG
)]
pub async fn get_entry(
    State(services): State<Services>,
    Path(id): Path<String>,
) -> Result<Json<JournalEntryResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let entry = services.journal_entries.get_entry(id).await?;
    Ok(Json(JournalEntryResponse::from(entry)))
}

/// PUT /journal/id/{username}/{id} - Update an entry
///
/// Blank fields in the payload leave the stored values untouched.
#[utoipa::path(
    put,
    path = "/journal/id/{username}/{id}",
    params(
        ("username" = String, Path, description = "Owning username"),
        ("id" = String, Path, description = "Entry id (24-hex)")
    ),
    request_body = UpdateJournalEntryRequest,
    responses(
        (status = 200, description = "Updated entry", body = JournalEntryResponse),
        (status = 400, description = "Malformed id", body = crate::api::dto::ErrorResponse),
        (status = 404, description = "Unknown username or id", body = crate::api::dto::ErrorResponse)
    ),
    tag = JOURNAL_TAG
)]
pub async fn update_entry(
    State(services): State<Services>,
    Path((username, id)): Path<(String, String)>,
    Json(payload): Json<UpdateJournalEntryRequest>,
) -> Result<Json<JournalEntryResponse>, AppError> {
    require_user(&services, &username).await?;
    let id = parse_object_id(&id)?;
    let entry = services
        .journal_entries
        .update_entry(id, payload.into_update())
        .await?;
    Ok(Json(JournalEntryResponse::from(entry)))
}

/// DELETE /journal/id/{username}/{id} - Delete an entry
#[utoipa::path(
    delete,
    path = "/journal/id/{username}/{id}",
    params(
        ("username" = String, Path, description = "Owning username"),
        ("id" = String, Path, description = "Entry id (24-hex)")
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 400, description = "Malformed id", body = crate::api::dto::ErrorResponse),
        (status = 404, description = "Unknown username or id", body = crate::api::dto::ErrorResponse)
    ),
    tag = JOURNAL_TAG
)]
pub async fn delete_entry(
    State(services): State<Services>,
    Path((username, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let id = parse_object_id(&id)?;
    if services.journal_entries.delete_entry(&username, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            entity: "journal entry".to_string(),
            field: "id".to_string(),
            value: id.to_hex(),
        })
    }
}

/// The username scopes the route; resolve it before touching the entry.
async fn require_user(services: &Services, username: &str) -> AppResult<()> {
    if services.users.find_by_username(username).await?.is_none() {
        return Err(AppError::NotFound {
            entity: "user".to_string(),
            field: "username".to_string(),
            value: username.to_string(),
        });
    }
    Ok(())
}

fn parse_object_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest {
        message: format!("'{}' is not a valid document id", raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(AppError::BadRequest { .. })
        ));
    }
}
