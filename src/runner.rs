//! Command argument construction helpers.
//!
//! This module only *builds* the argument lists handed to `pg_dump` and
//! `psql`.  Execution lives in [`crate::exec`], so every function here is
//! pure and unit-testable without a PostgreSQL client installed.

use std::path::Path;

use crate::config::ToolsConfig;

/// Flags passed to every dump, in order.
///
/// Ownership and privilege statements are left out so a dump can be replayed
/// into a database owned by a different role.
pub const DUMP_FLAGS: [&str; 4] = [
    "--no-owner",
    "--no-privileges",
    "--format=plain",
    "--encoding=UTF8",
];

// ─── pg_dump ──────────────────────────────────────────────────────────────────

/// ```text
/// pg_dump  --no-owner --no-privileges --format=plain --encoding=UTF8  <url>
/// ```
pub fn dump_args(tools: &ToolsConfig, url: &str) -> Vec<String> {
    let mut cmd: Vec<String> = vec![tools.pg_dump.clone()];
    cmd.extend(DUMP_FLAGS.iter().map(|f| (*f).to_string()));
    cmd.push(url.to_string());
    cmd
}

// ─── psql ─────────────────────────────────────────────────────────────────────

/// ```text
/// psql  <target>  -f <file>
/// ```
pub fn restore_args(tools: &ToolsConfig, target: &str, file: &Path) -> Vec<String> {
    vec![
        tools.psql.clone(),
        target.to_string(),
        "-f".into(),
        file.to_string_lossy().into_owned(),
    ]
}

// ─── Tests ────────────────────────────────────────────────────────────────────
