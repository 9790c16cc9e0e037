/// Warehouse connector.
///
/// Opens the single synchronous connection the whole pipeline runs on.
/// The analyses borrow the client mutably one after another; there is no
/// pooling and no retry — a failed connection aborts the run before any
/// analysis executes.

use postgres::{Client, NoTls};

use crate::config::DbSettings;
use crate::logging::{self, Stage};
use crate::model::AnalysisError;

/// Connect to the warehouse described by `settings`.
///
/// Connection failures (network, auth, availability) are wrapped in
/// `AnalysisError::Connection` so the caller can report the underlying
/// cause and abort.
pub fn connect(settings: &DbSettings) -> Result<Client, AnalysisError> {
    logging::info(
        Stage::Db,
        &format!(
            "connecting to {}:{}/{} as {}",
            settings.host, settings.port, settings.database, settings.user
        ),
    );

    let client = postgres::Config::new()
        .user(&settings.user)
        .password(&settings.password)
        .host(&settings.host)
        .port(settings.port)
        .dbname(&settings.database)
        .connect(NoTls)
        .map_err(AnalysisError::Connection)?;

    logging::info(Stage::Db, "connection established");
    Ok(client)
}
