//! Application state for the Axum router.

use mongodb::Database;

use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Used with Axum's State extractor. Cloning is cheap; services share
/// their repositories behind `Arc` and `Database` is a handle.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct handle to the document database, used by health checks
    pub db: Database,
}

impl AppState {
    /// Creates the state from a database handle, wiring repositories and
    /// services on top of it.
    pub fn new(db: Database) -> Self {
        let repos = Repositories::mongo(&db);
        let services = Services::new(repos);
        Self { services, db }
    }
}
