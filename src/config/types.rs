use std::net::IpAddr;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// Name of the offending field or environment variable (e.g., "port", "PORT")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Listen address; must be an IP literal.
    pub host: String,
    /// Overridden by the `PORT` environment variable.
    pub port: u16,
    /// SQLite file holding the click counts.
    pub database_path: PathBuf,
    /// Directory served for every non-API path.
    pub static_root: PathBuf,
    /// `<lang>.json` files checked for missing keys at startup.
    pub locales_dir: Option<PathBuf>,
    /// When set, logs go to a daily rolling file in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from("kids_games.db"),
            static_root: PathBuf::from("."),
            locales_dir: None,
            log_dir: None,
        }
    }
}

impl ServerSettings {
    /// # Errors
    /// - Host is not an IP address
    /// - Required path is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.host.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::new(
                "host",
                format!("'{}' is not an IP address. Example: \"127.0.0.1\"", self.host),
            ));
        }

        if self.database_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "databasePath",
                "The path cannot be empty. Example: \"kids_games.db\"",
            ));
        }

        if self.static_root.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "staticRoot",
                "The path cannot be empty. Use \".\" to serve the working directory",
            ));
        }

        if let Some(dir) = &self.locales_dir
            && dir.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "localesDir",
                "The path cannot be empty. Please specify a directory, or remove this field",
            ));
        }

        if let Some(dir) = &self.log_dir
            && dir.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "logDir",
                "The path cannot be empty. Please specify a directory, or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
