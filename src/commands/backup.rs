//! `pg-backup-rs backup`: dump every configured database.
//!
//! Databases are processed strictly in configuration order, one `pg_dump` at
//! a time.  All files from one run share a single timestamp taken when the
//! batch starts.  A failure for one database is printed and the batch moves
//! on; only an unusable backup directory aborts the run.

use std::{fs, path::Path};

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    backups::{self, db_name, redact_url},
    clock::Clock,
    config::{Config, ToolsConfig},
    error::DumpError,
    exec::Executor,
    runner::dump_args,
    ui::{self, DumpOutcome},
};

/// Run the backup batch and return one outcome per configured database.
pub fn run(cfg: &Config, exec: &dyn Executor, clock: &dyn Clock) -> Result<Vec<DumpOutcome>> {
    backups::ensure_dir(&cfg.backup_dir)?;

    if cfg.databases.is_empty() {
        warn!("no databases configured");
        eprintln!("Warning: no databases configured; add connection strings to `databases`.");
        return Ok(Vec::new());
    }

    let timestamp = backups::timestamp(clock.now());
    println!();

    let mut outcomes = Vec::with_capacity(cfg.databases.len());
    for url in &cfg.databases {
        let name = db_name(url);
        let file = backups::file_path(&cfg.backup_dir, &name, &timestamp);
        info!(database = %name, url = %redact_url(url), file = %file.display(), "backing up");

        let spinner = ui::make_spinner(&format!("Backing up {name} ..."));
        let result = dump_one(exec, &cfg.tools, url, &file);
        spinner.finish_and_clear();

        if let Err(ref e) = result {
            warn!(database = %name, error = %e, "backup failed");
        }
        let outcome = DumpOutcome::new(name, file, result);
        outcome.print();
        outcomes.push(outcome);
    }

    ui::print_summary(&outcomes);
    Ok(outcomes)
}

/// Dump one database into `file`.
///
/// The file is only written once the dump program has exited successfully,
/// so a failed dump never leaves a truncated `.sql` behind.
pub fn dump_one(
    exec: &dyn Executor,
    tools: &ToolsConfig,
    url: &str,
    file: &Path,
) -> Result<(), DumpError> {
    let out = exec.capture(&dump_args(tools, url)).map_err(DumpError::Spawn)?;

    if !out.success() {
        return Err(DumpError::Exit {
            program: tools.pg_dump.clone(),
            status: out.status,
            stderr: out.stderr.trim_end().to_string(),
        });
    }

    fs::write(file, &out.stdout).map_err(|source| DumpError::Write {
        path: file.to_path_buf(),
        source,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
