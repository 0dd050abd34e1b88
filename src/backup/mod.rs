// dbbackup/src/backup/mod.rs
mod logic;

use crate::config::AppConfig;
use crate::dbdump::PostgresDump;
use crate::errors::Result;
use crate::storage::S3Engine;

/// Public entry point for the backup process.
///
/// Constructs the storage and dump engines from the configuration and runs
/// the orchestration; either constructor failure aborts before any step.
pub async fn run_backup_flow(config: &AppConfig) -> Result<()> {
    let storage = S3Engine::new(&config.storage).await?;
    let dump = PostgresDump::new(&config.database, &config.storage.dump_file)?;

    logic::perform_backup_orchestration(
        &storage,
        &dump,
        &config.storage.bucket_name,
        &config.storage.dump_file,
    )
    .await
}
