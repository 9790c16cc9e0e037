/// Runtime configuration for the analytics pipeline.
///
/// All configuration comes from environment variables (optionally seeded
/// from a `.env` file via dotenv) and is loaded exactly once at process
/// start into an explicit `Settings` struct. Nothing else in the crate
/// reads the environment — the connector and the analyses only ever see
/// this struct.

use std::path::PathBuf;

use crate::model::AnalysisError;

// ---------------------------------------------------------------------------
// Database settings
// ---------------------------------------------------------------------------

/// Credentials and address for the warehouse connection.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Full pipeline settings: database plus output locations.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db: DbSettings,
    /// Directory for rendered chart images.
    pub viz_dir: PathBuf,
    /// Directory for the spreadsheet export and the run summary.
    pub analysis_dir: PathBuf,
    /// Optional log file; console logging is always on.
    pub log_file: Option<String>,
}

impl Settings {
    /// Load settings from the environment, failing fast on anything
    /// missing or malformed so no analysis ever runs half-configured.
    pub fn from_env() -> Result<Settings, AnalysisError> {
        dotenv::dotenv().ok();

        let user = required_var("DB_USER")?;
        let password = required_var("DB_PASS")?;
        let host = required_var("DB_HOST")?;
        let port_raw = required_var("DB_PORT")?;
        let database = required_var("DB_NAME")?;

        let port: u16 = port_raw.parse().map_err(|_| {
            AnalysisError::Config(format!("DB_PORT is not a valid port number: {port_raw:?}"))
        })?;

        let viz_dir = std::env::var("VIZ_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output/visualization"));
        let analysis_dir = std::env::var("ANALYSIS_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output/analysis"));
        let log_file = std::env::var("LOG_FILE").ok();

        Ok(Settings {
            db: DbSettings {
                user,
                password,
                host,
                port,
                database,
            },
            viz_dir,
            analysis_dir,
            log_file,
        })
    }
}

/// Read a required environment variable, rejecting empty values.
/// An empty password in particular must abort before any DB contact.
fn required_var(name: &str) -> Result<String, AnalysisError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(AnalysisError::Config(format!("{name} is set but empty"))),
        Err(_) => Err(AnalysisError::Config(format!("{name} is not set"))),
    }
}

/// Create the parent directory of an output path if it does not exist yet.
/// Called immediately before every chart or spreadsheet write.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), AnalysisError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_parent_dir_creates_missing_directories() {
        let base = std::env::temp_dir().join("medspend_cfg_test");
        let _ = std::fs::remove_dir_all(&base);
        let target = base.join("nested/deep/chart.png");

        ensure_parent_dir(&target).expect("directory creation should succeed");
        assert!(target.parent().unwrap().is_dir());

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn test_ensure_parent_dir_accepts_bare_filename() {
        ensure_parent_dir(std::path::Path::new("chart.png"))
            .expect("a bare filename has no directory to create");
    }
}
