//! MongoDB client setup.
//!
//! Builds a configured client and verifies connectivity up front so a bad
//! connection string fails at startup, not on the first request.

use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::{Client, Database, bson::doc};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Connects to MongoDB using the given configuration.
///
/// Pool sizes and timeouts from the configuration are applied on top of
/// whatever the connection string specifies. The connection is verified
/// with a `ping` command against the configured database.
///
/// # Errors
/// - `Configuration` when the connection string cannot be parsed
/// - `Database` when the server cannot be reached
pub async fn connect(config: &DatabaseConfig) -> AppResult<Client> {
    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|error| AppError::Configuration {
            key: "database.uri".to_string(),
            source: anyhow::Error::new(error),
        })?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout));
    options.server_selection_timeout = Some(Duration::from_secs(config.server_selection_timeout));

    let client = Client::with_options(options)?;

    ping(&client.database(&config.database)).await?;

    Ok(client)
}

/// Runs a `ping` command; cheap connectivity check used at startup and by
/// the health endpoints.
pub async fn ping(database: &Database) -> AppResult<()> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
