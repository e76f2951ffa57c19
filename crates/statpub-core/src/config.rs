//! Configuration module
//!
//! Environment-driven configuration for the import pipeline: database pool
//! settings, upload limits, and the MIME allow-lists used by the single-file
//! validator.

use std::env;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ANCILLARY_FILE_SIZE_MB: usize = 100;
const DEFAULT_MAX_CHART_FILE_SIZE_MB: usize = 20;

/// Application configuration for the import pipeline.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    /// Maximum size for ancillary uploads, in bytes.
    pub max_ancillary_file_size_bytes: usize,
    /// Maximum size for chart/image uploads, in bytes.
    pub max_chart_file_size_bytes: usize,
    pub ancillary_allowed_mime_types: Vec<String>,
    pub chart_allowed_mime_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best effort; the environment may be configured without a .env file.
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let db_max_connections = env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let db_timeout_seconds = env_parse("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?;
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let max_ancillary_file_size_bytes = env_parse(
            "MAX_ANCILLARY_FILE_SIZE_MB",
            DEFAULT_MAX_ANCILLARY_FILE_SIZE_MB,
        )? * 1024
            * 1024;
        let max_chart_file_size_bytes =
            env_parse("MAX_CHART_FILE_SIZE_MB", DEFAULT_MAX_CHART_FILE_SIZE_MB)? * 1024 * 1024;

        Ok(Config {
            database_url,
            db_max_connections,
            db_timeout_seconds,
            environment,
            max_ancillary_file_size_bytes,
            max_chart_file_size_bytes,
            ancillary_allowed_mime_types: default_ancillary_mime_types(),
            chart_allowed_mime_types: default_chart_mime_types(),
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.is_empty() {
            return Err(anyhow::anyhow!("DATABASE_URL cannot be empty"));
        }
        if self.max_ancillary_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_ANCILLARY_FILE_SIZE_MB cannot be 0"));
        }
        if self.max_chart_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_CHART_FILE_SIZE_MB cannot be 0"));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn default_ancillary_mime_types() -> Vec<String> {
    [
        "application/pdf",
        "application/zip",
        "text/plain",
        "text/csv",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_chart_mime_types() -> Vec<String> {
    ["image/png", "image/jpeg", "image/gif", "image/svg+xml"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mime_lists_cover_expected_kinds() {
        assert!(default_ancillary_mime_types().contains(&"application/pdf".to_string()));
        assert!(default_chart_mime_types().contains(&"image/png".to_string()));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = Config {
            database_url: "postgres://localhost/statpub".to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_timeout_seconds: DEFAULT_DB_TIMEOUT_SECS,
            environment: "test".to_string(),
            max_ancillary_file_size_bytes: 0,
            max_chart_file_size_bytes: 1024,
            ancillary_allowed_mime_types: default_ancillary_mime_types(),
            chart_allowed_mime_types: default_chart_mime_types(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = Config {
            database_url: "postgres://localhost/statpub".to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_timeout_seconds: DEFAULT_DB_TIMEOUT_SECS,
            environment: "Production".to_string(),
            max_ancillary_file_size_bytes: 1024,
            max_chart_file_size_bytes: 1024,
            ancillary_allowed_mime_types: Vec::new(),
            chart_allowed_mime_types: Vec::new(),
        };
        assert!(config.is_production());
        config.environment = "development".to_string();
        assert!(!config.is_production());
    }
}
