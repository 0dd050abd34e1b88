use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Engine initialization failed: {0}")]
    EngineInit(String),

    #[error("Bucket validation failed: {0}")]
    StorageValidation(String),

    #[error("Storage operation failed: {0}")]
    Storage(String),

    #[error("Database dump failed: {0}")]
    Dump(String),

    #[error("Can't read dump artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload failed: {0}")]
    Upload(String),
}

pub type Result<T> = std::result::Result<T, BackupError>;
