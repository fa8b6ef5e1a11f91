use utoipa::OpenApi;

pub const PUBLIC_TAG: &str = "Public";
pub const ADMIN_TAG: &str = "Admin";
pub const JOURNAL_TAG: &str = "Journal";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Journal",
        description = "A journaling backend over a document store",
    ),
    paths(
        crate::api::handlers::public::health_check,
        crate::api::handlers::public::create_user,
        crate::api::handlers::admin::get_all_users,
        crate::api::handlers::admin::create_admin_user,
        crate::api::handlers::admin::delete_user,
        crate::api::handlers::journal::list_entries,
        crate::api::handlers::journal::create_entry,
        crate::api::handlers::journal::get_entry,
        crate::api::handlers::journal::update_entry,
        crate::api::handlers::journal::delete_entry,
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::readiness_check,
        crate::api::handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = PUBLIC_TAG, description = "Unauthenticated endpoints"),
        (name = ADMIN_TAG, description = "User administration endpoints"),
        (name = JOURNAL_TAG, description = "Journal entry endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
