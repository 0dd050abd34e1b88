// dbbackup/src/dbdump/mod.rs
pub(crate) mod postgres;

pub use postgres::PostgresDump;

use crate::errors::Result;

/// Capability of producing a compressed dump artifact on local disk.
///
/// Implementations own their connection parameters and the artifact path;
/// the orchestrator only asks them to run. Alternative database engines
/// plug in here without touching the backup flow.
pub trait DumpEngine {
    /// Runs the dump. The artifact file exists at the agreed path on
    /// success; any probe or execution failure is surfaced verbatim.
    fn exec(&self) -> Result<()>;
}
