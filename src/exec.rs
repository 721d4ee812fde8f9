//! Child-process execution.
//!
//! Two modes are needed:
//!
//! - **capture**: stdout and stderr are buffered in full.  Used for `pg_dump`,
//!   whose stdout *is* the dump.
//! - **passthrough**: the child inherits the terminal so the operator sees
//!   `psql` output live.
//!
//! Both hand back the child's `ExitStatus`; success is never inferred from
//! output.  Spawn failures are `Err`.
//!
//! The [`Executor`] trait exists so the command handlers can be driven by a
//! scripted executor in tests.

use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

use crate::backups::redact_url;

/// Buffered result of a captured run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub status: ExitStatus,
    /// Raw stdout, untouched.
    pub stdout: Vec<u8>,
    /// stderr decoded lossily, for error reports.
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs external programs.  `args[0]` is the program.
pub trait Executor {
    /// Run to completion with stdout and stderr captured.
    fn capture(&self, args: &[String]) -> Result<Captured>;

    /// Run to completion with stdout and stderr inherited.
    fn passthrough(&self, args: &[String]) -> Result<ExitStatus>;
}

/// [`Executor`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn capture(&self, args: &[String]) -> Result<Captured> {
        let mut cmd = command(args)?;
        debug!(command = %command_line(args), "spawning (captured)");

        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to spawn: {}", command_line(args)))?;

        debug!(status = %output.status, bytes = output.stdout.len(), "child exited");
        Ok(Captured {
            status: output.status,
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn passthrough(&self, args: &[String]) -> Result<ExitStatus> {
        let mut cmd = command(args)?;
        debug!(command = %command_line(args), "spawning (inherited)");

        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("failed to spawn: {}", command_line(args)))?;

        debug!(%status, "child exited");
        Ok(status)
    }
}

fn command(args: &[String]) -> Result<Command> {
    let (prog, rest) = args.split_first().context("cannot run an empty command")?;
    let mut cmd = Command::new(prog);
    cmd.args(rest);
    Ok(cmd)
}

/// Space-joined command line with credentials masked, for messages and logs.
pub fn command_line(args: &[String]) -> String {
    args.iter()
        .map(|a| redact_url(a))
        .collect::<Vec<_>>()
        .join(" ")
}

// ─── Tests ────────────────────────────────────────────────────────────────────
