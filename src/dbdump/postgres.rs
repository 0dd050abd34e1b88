// dbbackup/src/dbdump/postgres.rs
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use flate2::write::GzEncoder;
use flate2::Compression;
use which::which;

use crate::config::DatabaseConfig;
use crate::dbdump::DumpEngine;
use crate::errors::{BackupError, Result};

const DEFAULT_PORT: &str = "5432";

/// Dump engine backed by the `pg_dump` command-line tool.
///
/// Output is piped through a gzip encoder into the artifact path; the
/// database password travels only in the child process environment.
#[derive(Debug)]
pub struct PostgresDump {
    host: String,
    username: String,
    password: String,
    name: String,
    opts: String,
    dump_file: PathBuf,
}

impl PostgresDump {
    pub fn new(config: &DatabaseConfig, dump_file: &Path) -> Result<Self> {
        if dump_file.as_os_str().is_empty() {
            return Err(BackupError::EngineInit(
                "dump artifact path cannot be empty".to_string(),
            ));
        }

        Ok(PostgresDump {
            host: config.host.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            name: config.name.clone(),
            opts: config.opts.clone(),
            dump_file: dump_file.to_path_buf(),
        })
    }
}

impl DumpEngine for PostgresDump {
    fn exec(&self) -> Result<()> {
        let pg_dump_path = find_pg_dump_executable()?;

        // Probe the tool before attempting the real dump.
        trace(&pg_dump_path, &["--version".to_string()]);
        let status = Command::new(&pg_dump_path)
            .arg("--version")
            .status()
            .map_err(|e| {
                BackupError::Dump(format!(
                    "failed to launch {} --version: {}",
                    pg_dump_path.display(),
                    e
                ))
            })?;
        if !status.success() {
            return Err(BackupError::Dump(format!(
                "pg_dump --version exited with status: {}",
                status
            )));
        }

        let args = build_dump_args(&self.host, &self.username, &self.opts, &self.name);
        trace(&pg_dump_path, &args);

        // The child environment is cleared; only the password is scoped in.
        let mut command = Command::new(&pg_dump_path);
        command
            .args(&args)
            .env_clear()
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if !self.password.is_empty() {
            command.env("PGPASSWORD", &self.password);
        }

        let mut child = command.spawn().map_err(|e| {
            BackupError::Dump(format!(
                "failed to launch {}: {}",
                pg_dump_path.display(),
                e
            ))
        })?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| BackupError::Dump("pg_dump stdout was not captured".to_string()))?;

        let artifact = File::create(&self.dump_file).map_err(|e| {
            BackupError::Dump(format!(
                "failed to create dump artifact {}: {}",
                self.dump_file.display(),
                e
            ))
        })?;
        let mut encoder = GzEncoder::new(artifact, Compression::default());

        io::copy(&mut stdout, &mut encoder).map_err(|e| {
            BackupError::Dump(format!(
                "failed to compress pg_dump output into {}: {}",
                self.dump_file.display(),
                e
            ))
        })?;

        let status = child
            .wait()
            .map_err(|e| BackupError::Dump(format!("failed to wait for pg_dump: {}", e)))?;
        if !status.success() {
            return Err(BackupError::Dump(format!(
                "pg_dump exited with status: {}",
                status
            )));
        }

        encoder.finish().map_err(|e| {
            BackupError::Dump(format!(
                "failed to finish gzip encoding for {}: {}",
                self.dump_file.display(),
                e
            ))
        })?;

        Ok(())
    }
}

fn find_pg_dump_executable() -> Result<PathBuf> {
    which("pg_dump").map_err(|_| {
        BackupError::Dump(
            "pg_dump executable not found in PATH. Please ensure PostgreSQL client tools are installed and in your PATH.".to_string(),
        )
    })
}

/// Splits a `host:port` string, applying the default port when no port
/// segment is present. A trailing bare `:` yields an empty port.
fn split_host_port(host: &str) -> (String, String) {
    match host.split_once(':') {
        Some((h, p)) => (h.to_string(), p.to_string()),
        None => (host.to_string(), DEFAULT_PORT.to_string()),
    }
}

/// Assembles the pg_dump argument list in fixed order: host, port,
/// username, extra options, database name. Empty fields emit no flag.
fn build_dump_args(host: &str, username: &str, opts: &str, name: &str) -> Vec<String> {
    let (host, port) = split_host_port(host);
    let mut args = Vec::new();

    if !host.is_empty() {
        args.push("-h".to_string());
        args.push(host);
    }
    if !port.is_empty() {
        args.push("-p".to_string());
        args.push(port);
    }
    if !username.is_empty() {
        args.push("-U".to_string());
        args.push(username.to_string());
    }
    if !opts.is_empty() {
        args.push(opts.to_string());
    }
    if !name.is_empty() {
        args.push(name.to_string());
    }

    args
}

// Prints the exact command line before running it. The password is never
// part of the argument list, so it never shows up here.
fn trace(program: &Path, args: &[String]) {
    println!("$ {} {}", program.display(), args.join(" "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host_port_without_port_applies_default() {
        assert_eq!(
            split_host_port("db.internal"),
            ("db.internal".to_string(), "5432".to_string())
        );
    }

    #[test]
    fn test_split_host_port_with_explicit_port() {
        assert_eq!(
            split_host_port("db:5555"),
            ("db".to_string(), "5555".to_string())
        );
    }

    #[test]
    fn test_split_host_port_with_empty_segments() {
        assert_eq!(split_host_port("db:"), ("db".to_string(), "".to_string()));
        assert_eq!(split_host_port(""), ("".to_string(), "5432".to_string()));
    }

    #[test]
    fn test_build_dump_args_full_configuration_keeps_order() {
        let args = build_dump_args("db:5555", "deploy", "--no-owner", "app");
        assert_eq!(
            args,
            vec!["-h", "db", "-p", "5555", "-U", "deploy", "--no-owner", "app"]
        );
    }

    #[test]
    fn test_build_dump_args_omits_empty_fields() {
        let args = build_dump_args("", "", "", "app");
        assert_eq!(args, vec!["-p", "5432", "app"]);

        let args = build_dump_args("db", "", "", "");
        assert_eq!(args, vec!["-h", "db", "-p", "5432"]);
    }

    #[test]
    fn test_password_never_appears_in_args() {
        let config = DatabaseConfig {
            host: "db:5555".to_string(),
            username: "deploy".to_string(),
            password: "s3cret".to_string(),
            name: "app".to_string(),
            opts: String::new(),
        };
        let engine = PostgresDump::new(&config, Path::new("dump.sql.gz")).unwrap();
        let args = build_dump_args(&engine.host, &engine.username, &engine.opts, &engine.name);
        assert!(!args.iter().any(|a| a.contains("s3cret")));
    }

    #[test]
    fn test_new_rejects_empty_artifact_path() {
        let config = DatabaseConfig {
            host: "db".to_string(),
            username: String::new(),
            password: String::new(),
            name: String::new(),
            opts: String::new(),
        };
        let err = PostgresDump::new(&config, Path::new("")).unwrap_err();
        assert!(matches!(err, BackupError::EngineInit(_)));
    }
}
