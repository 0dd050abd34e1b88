//! Database Backup Tool
//!
//! Dumps a PostgreSQL database with pg_dump, compresses the output, and
//! uploads the artifact to S3-compatible object storage under a
//! timestamped key.

// dbbackup/src/main.rs
mod backup;
mod config;
mod dbdump;
mod errors;
mod storage;

use anyhow::{Context, Result};
use config::AppConfig;
use std::env;
use std::process::ExitCode;

/// Build metadata assembled at startup and passed explicitly into the
/// entry point; no inner component reads it.
struct BuildInfo {
    version: &'static str,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load an env-file, if one is configured, before anything reads the
    // environment. Failure to load is not fatal.
    if let Ok(env_file) = env::var("ENV_FILE") {
        let _ = dotenv::from_filename(&env_file);
    } else {
        let _ = dotenv::dotenv();
    }

    let build = BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
    };

    match run_app(&build).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app(build: &BuildInfo) -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.iter().skip(1).any(|a| a == "--version" || a == "-V") {
        println!("dbbackup {}", build.version);
        return Ok(());
    }

    let app_config =
        AppConfig::load_from_env().context("Failed to load configuration from the environment")?;

    backup::run_backup_flow(&app_config)
        .await
        .context("Backup process failed")?;

    Ok(())
}
