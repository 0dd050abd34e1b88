// dbbackup/src/config/mod.rs
use std::env;
use std::path::PathBuf;

use crate::errors::{BackupError, Result};

// Defaults applied when the corresponding variable is unset or empty.
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_DUMP_FILE: &str = "dump.sql.gz";

/// Database connection parameters handed to the dump engine.
///
/// Empty strings mean "not configured"; the dump engine emits no flag for
/// an empty field. `host` may embed a port as `host:port`.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub opts: String,
}

/// Object storage parameters for the S3 engine, plus the local artifact path.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint_url: Option<String>,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    pub dump_file: PathBuf,
}

/// Immutable application configuration, loaded once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Loads the configuration from environment variables.
    ///
    /// Database fields are optional and default to empty (the dump engine
    /// skips their flags). The S3 bucket and credentials are required.
    pub fn load_from_env() -> Result<Self> {
        let database = DatabaseConfig {
            host: env_or("DATABASE_HOST", DEFAULT_HOST),
            username: env_or("DATABASE_USERNAME", ""),
            password: env_or("DATABASE_PASSWORD", ""),
            name: env_or("DATABASE_NAME", ""),
            opts: env_or("DATABASE_OPTS", ""),
        };

        let storage = StorageConfig {
            endpoint_url: Some(env_or("S3_ENDPOINT_URL", "")).filter(|s| !s.is_empty()),
            region: env_or("S3_REGION", DEFAULT_REGION),
            access_key_id: env_required("S3_ACCESS_KEY_ID")?,
            secret_access_key: env_required("S3_SECRET_ACCESS_KEY")?,
            bucket_name: env_required("S3_BUCKET")?,
            dump_file: PathBuf::from(env_or("DUMP_FILE", DEFAULT_DUMP_FILE)),
        };

        Ok(AppConfig { database, storage })
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

fn env_required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(BackupError::Config(format!("{} must be set", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test touches only its own variable names; process environment is
    // shared across the test binary.

    #[test]
    fn test_env_or_applies_default() {
        unsafe { env::remove_var("DBBACKUP_TEST_UNSET") };
        assert_eq!(env_or("DBBACKUP_TEST_UNSET", "fallback"), "fallback");

        unsafe { env::set_var("DBBACKUP_TEST_BLANK", "   ") };
        assert_eq!(env_or("DBBACKUP_TEST_BLANK", "fallback"), "fallback");

        unsafe { env::set_var("DBBACKUP_TEST_SET", "value") };
        assert_eq!(env_or("DBBACKUP_TEST_SET", "fallback"), "value");
    }

    #[test]
    fn test_env_required_reports_missing_key() {
        unsafe { env::remove_var("DBBACKUP_TEST_REQUIRED") };
        let err = env_required("DBBACKUP_TEST_REQUIRED").unwrap_err();
        assert!(matches!(err, BackupError::Config(_)));
        assert!(err.to_string().contains("DBBACKUP_TEST_REQUIRED must be set"));
    }
}
