//! Typed failures for the two workflows.
//!
//! Command handlers convert these into `anyhow::Error` at their boundary;
//! the variants exist so callers (and tests) can tell the cases apart.

use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Why one database could not be dumped.  Never fatal to the batch.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("{0:#}")]
    Spawn(anyhow::Error),

    /// The dump program ran but failed.  `stderr` is kept so it can be
    /// replayed to the operator.
    #[error("{program} failed ({status})")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("No backup files found in {}", .dir.display())]
    NoBackups { dir: PathBuf },

    #[error("restore could not start: {0:#}")]
    Spawn(anyhow::Error),

    #[error("Restore failed: {program} ({status}) while restoring {}", .file.display())]
    Failed {
        program: String,
        status: ExitStatus,
        file: PathBuf,
    },
}
