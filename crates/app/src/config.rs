//! # Application Configuration
//!
//! Settings are read from environment variables (a `.env` file is honoured by
//! the binary before this runs).
//!
//! ## Environment Variables
//!
//! - `STUDYSPOT_DATA_DIR`: directory holding bookings, cancellations and the session (default: "./data")
//! - `STUDYSPOT_CATALOG`: path to a spaces JSON file (default: the bundled catalog)
//! - `STUDYSPOT_DEMO_USERNAME`: mock sign-in username (default: "user")
//! - `STUDYSPOT_DEMO_PASSWORD`: mock sign-in password (default: "123")
//! - `LOG_LEVEL`: logging level (default: "info")

use std::env;
use std::path::PathBuf;

use eyre::{Result, eyre};
use tracing::Level;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_USERNAME: &str = "user";
pub const DEFAULT_PASSWORD: &str = "123";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,

    /// Optional catalog file replacing the bundled spaces
    pub catalog_path: Option<PathBuf>,

    /// Credentials accepted by the mock authenticator
    pub demo_username: String,
    pub demo_password: String,

    /// Log level for the application
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            demo_username: DEFAULT_USERNAME.to_string(),
            demo_password: DEFAULT_PASSWORD.to_string(),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `STUDYSPOT_DATA_DIR` is set but empty
    /// - `STUDYSPOT_DEMO_USERNAME` is set but empty
    pub fn from_env() -> Result<Self> {
        let data_dir = match env::var("STUDYSPOT_DATA_DIR") {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(eyre!("STUDYSPOT_DATA_DIR must not be empty"));
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from(DEFAULT_DATA_DIR),
        };

        let catalog_path = env::var("STUDYSPOT_CATALOG")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let demo_username =
            env::var("STUDYSPOT_DEMO_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.to_string());
        if demo_username.trim().is_empty() {
            return Err(eyre!("STUDYSPOT_DEMO_USERNAME must not be empty"));
        }
        let demo_password =
            env::var("STUDYSPOT_DEMO_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        Ok(Self {
            data_dir,
            catalog_path,
            demo_username,
            demo_password,
            log_level,
        })
    }
}

/// Maps a level name to a [`Level`], falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
