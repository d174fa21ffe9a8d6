//! Application configuration loaded from environment variables.
//!
//! Every variable has a default suitable for local development; a `.env`
//! file is honored when present.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Directory holding the ordered migration scripts
    pub migrations_dir: PathBuf,
    /// Shared secret every request must present
    pub application_key: String,
    /// Header the shared secret is read from
    pub application_key_header: String,
    /// Log method, path, and body of authorized requests
    pub log_requests: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from(":memory:"),
            migrations_dir: PathBuf::from("migrations"),
            application_key: "test-application-key".to_string(),
            application_key_header: "application-key".to_string(),
            log_requests: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT"))?,
            db_path: env::var("DB_PATH")
                .unwrap_or_else(|_| "widoo.db".to_string())
                .into(),
            migrations_dir: env::var("MIGRATIONS_DIR")
                .unwrap_or_else(|_| "migrations".to_string())
                .into(),
            application_key: env::var("APPLICATION_KEY")
                .unwrap_or_else(|_| "mostSecretKeyEver".to_string()),
            application_key_header: env::var("APPLICATION_KEY_HEADER")
                .unwrap_or_else(|_| "application-key".to_string()),
            log_requests: env::var("LOG_REQUESTS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        // None of the variables are required; the defaults must load.
        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.application_key_header, "application-key");
        assert_eq!(config.migrations_dir, PathBuf::from("migrations"));
        assert_eq!(config.db_path, PathBuf::from("widoo.db"));
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("SERVER_PORT", "9090");
        env::set_var("APPLICATION_KEY", "s3cret");
        env::set_var("LOG_REQUESTS", "true");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.application_key, "s3cret");
        assert!(config.log_requests);

        env::remove_var("SERVER_PORT");
        env::remove_var("APPLICATION_KEY");
        env::remove_var("LOG_REQUESTS");
    }
}
