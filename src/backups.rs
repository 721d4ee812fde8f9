//! Backup directory conventions.
//!
//! Every dump lands flat inside one directory as `<db>_<timestamp>.sql`,
//! where the timestamp is `YYYY_MM_DD_HH_MM_SS` in UTC.  That format sorts
//! lexically in chronological order, so listings compare the timestamp
//! suffix as a string to put the newest dump first, whatever the database.
//!
//! Everything here is pure string/path work except [`ensure_dir`] and
//! [`list`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Name used when a connection string has no final path segment.
pub const UNKNOWN_DB: &str = "unknown_db";

/// Extension shared by every dump file.
pub const EXTENSION: &str = ".sql";

/// Length of a `YYYY_MM_DD_HH_MM_SS` timestamp.
const TIMESTAMP_LEN: usize = 19;

/// Prefix a restore target must start with.
pub const TARGET_SCHEME: &str = "postgres://";

// ─── Naming ───────────────────────────────────────────────────────────────────

/// Derive a display/file name from a connection string.
///
/// The query string is dropped first (so `?sslrootcert=/etc/ca.pem` cannot
/// masquerade as a path), then the scheme, then everything up to the last
/// `/`.  A URL without a path, or with an empty one, yields [`UNKNOWN_DB`].
pub fn db_name(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or_default();
    let rest = without_query
        .split_once("://")
        .map_or(without_query, |(_, r)| r);

    match rest.rsplit_once('/') {
        Some((_, segment)) if !segment.is_empty() => segment.to_string(),
        _ => UNKNOWN_DB.to_string(),
    }
}

/// Format `now` as `YYYY_MM_DD_HH_MM_SS`, second precision.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y_%m_%d_%H_%M_%S").to_string()
}

/// `<dir>/<name>_<timestamp>.sql`
pub fn file_path(dir: &Path, name: &str, timestamp: &str) -> PathBuf {
    dir.join(format!("{name}_{timestamp}{EXTENSION}"))
}

/// Replace the password in a connection string with `***`.
///
/// Strings without credentials are returned unchanged.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    // Userinfo ends at the last `@` ahead of the query, so an unencoded `/`
    // in the password still counts as part of it.
    let query_start = rest.find('?').unwrap_or(rest.len());
    let Some(at) = rest[..query_start].rfind('@') else {
        return url.to_string();
    };
    let (userinfo, host_and_tail) = (&rest[..at], &rest[at + 1..]);

    match userinfo.split_once(':') {
        Some((user, _)) if !user.contains('/') => {
            format!("{scheme}://{user}:***@{host_and_tail}")
        },
        _ => url.to_string(),
    }
}

/// Accept only `postgres://…` restore targets.
pub fn validate_target(input: &str) -> Result<(), String> {
    if input.starts_with(TARGET_SCHEME) {
        Ok(())
    } else {
        Err(format!("Must start with {TARGET_SCHEME}"))
    }
}

// ─── Filesystem ───────────────────────────────────────────────────────────────

/// Create the backup directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating backup directory {}", dir.display()))
}

/// File names of every backup in `dir`, newest first.
///
/// Ordered by the timestamp suffix, then by full name (both descending).
/// Only regular files ending in `.sql` count; anything else in the directory
/// is ignored.
pub fn list(dir: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading backup directory {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        if !entry.file_type().is_ok_and(|t| t.is_file()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(EXTENSION) {
            names.push(name);
        }
    }

    names.sort_unstable_by(|a, b| {
        timestamp_of(b)
            .cmp(timestamp_of(a))
            .then_with(|| b.cmp(a))
    });
    Ok(names)
}

/// The `YYYY_MM_DD_HH_MM_SS` part of a backup file name, or `""` for names
/// too short to carry one.
fn timestamp_of(name: &str) -> &str {
    let stem = name.strip_suffix(EXTENSION).unwrap_or(name);
    stem.len()
        .checked_sub(TIMESTAMP_LEN)
        .and_then(|start| stem.get(start..))
        .unwrap_or_default()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
