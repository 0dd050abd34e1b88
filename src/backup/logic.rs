// dbbackup/src/backup/logic.rs
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::dbdump::DumpEngine;
use crate::errors::{BackupError, Result};
use crate::storage::{StorageEngine, UploadOptions};

const UPLOAD_KEY_SUFFIX: &str = ".sql.gz";

/// Runs the backup pipeline: validate the bucket, produce the dump, read
/// the artifact, upload it under a timestamped key.
///
/// Strictly sequential; the upload is never attempted before the dump
/// engine reports success, and success is only reported when the upload
/// itself succeeded. Nothing is retried and nothing is rolled back.
pub async fn perform_backup_orchestration<S, D>(
    storage: &S,
    dump: &D,
    bucket: &str,
    dump_file: &Path,
) -> Result<()>
where
    S: StorageEngine,
    D: DumpEngine,
{
    match storage.bucket_exists(bucket).await {
        Ok(true) => {}
        Ok(false) => {
            return Err(BackupError::StorageValidation("bucket not exist".to_string()));
        }
        Err(e) => {
            return Err(BackupError::StorageValidation(format!(
                "bucket not exist or you don't have permission: {}",
                e
            )));
        }
    }

    dump.exec()?;

    let content = fs::read(dump_file).map_err(|source| BackupError::ArtifactRead {
        path: dump_file.to_path_buf(),
        source,
    })?;

    let key = upload_key(Local::now());
    storage
        .upload_file(bucket, &key, content, UploadOptions::default())
        .await
}

/// Derives the object key for one run: local timestamp plus fixed suffix.
/// Second resolution only; runs are assumed infrequent.
fn upload_key(now: DateTime<Local>) -> String {
    format!("{}{}", now.format("%Y%m%d%H%M%S"), UPLOAD_KEY_SUFFIX)
}
