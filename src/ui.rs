//! Terminal UI: spinners, per-database result lines, and summaries.
//!
//! - While `pg_dump` runs the operator sees only a spinner and the database
//!   name.
//! - If a dump fails, the error and whatever the client wrote to stderr are
//!   printed in full so the problem can be diagnosed without re-running.
//! - Restore prints no spinner: `psql` owns the terminal while it runs.

use std::{path::PathBuf, time::Duration};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::DumpError;

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Braille spinner frames, as in indicatif's default.
static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}
fn icon_done() -> console::StyledObject<&'static str> {
    style("✓").cyan().bold()
}
fn icon_info() -> console::StyledObject<&'static str> {
    style("►").dim()
}

// ─── Dump outcome ─────────────────────────────────────────────────────────────

/// Result of dumping one database.
#[derive(Debug)]
pub struct DumpOutcome {
    /// Name derived from the connection string, e.g. `"alpha"`.
    pub database: String,
    /// Destination file (written only on success).
    pub file: PathBuf,
    pub success: bool,
    /// What the dump program wrote to stderr, when it failed.
    pub stderr: String,
    pub error: Option<String>,
}

impl DumpOutcome {
    pub fn new(database: String, file: PathBuf, result: Result<(), DumpError>) -> Self {
        match result {
            Ok(()) => Self {
                database,
                file,
                success: true,
                stderr: String::new(),
                error: None,
            },
            Err(e) => {
                let stderr = match &e {
                    DumpError::Exit { stderr, .. } => stderr.clone(),
                    _ => String::new(),
                };
                Self {
                    database,
                    file,
                    success: false,
                    stderr,
                    error: Some(e.to_string()),
                }
            },
        }
    }

    /// Print the one-line ✓/✗ result, plus error detail on failure.
    pub fn print(&self) {
        if self.success {
            println!(
                "  {}  {}  {}",
                icon_ok(),
                style(&self.database).bold(),
                style(format!("→ {}", self.file.display())).dim()
            );
            return;
        }

        println!("  {}  {}", icon_err(), style(&self.database).bold());
        if let Some(ref msg) = self.error {
            eprintln!(
                "  {} Failed to backup {}: {}",
                style("Error:").red().bold(),
                self.database,
                msg
            );
        }
        if !self.stderr.is_empty() {
            eprintln!("  {} stderr:", icon_info());
            for line in self.stderr.lines() {
                eprintln!("    {line}");
            }
        }
    }

    pub const fn failed(&self) -> bool {
        !self.success
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

/// Start an indeterminate spinner for `label`.  Hidden automatically when
/// stderr is not a terminal.
pub fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(s) = ProgressStyle::with_template("  {spinner:.cyan}  {msg}") {
        pb.set_style(s.tick_chars(SPINNER_CHARS));
    }
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ─── Summaries & status lines ─────────────────────────────────────────────────

/// Final banner after a backup batch.
pub fn print_summary(outcomes: &[DumpOutcome]) {
    let failed: Vec<&DumpOutcome> = outcomes.iter().filter(|o| o.failed()).collect();
    println!();
    if failed.is_empty() {
        println!(
            "  {} {}",
            icon_done(),
            style(format!("{} database(s) backed up.", outcomes.len()))
                .cyan()
                .bold()
        );
    } else {
        eprintln!(
            "  {}  {}",
            icon_err(),
            style(format!(
                "{} of {} backup(s) failed.",
                failed.len(),
                outcomes.len()
            ))
            .red()
            .bold()
        );
        for o in &failed {
            eprintln!("    {} {}", icon_err(), style(&o.database).red());
        }
    }
    println!();
}

pub fn info(msg: &str) {
    println!("  {}  {}", icon_info(), msg);
}

pub fn success(msg: &str) {
    println!("  {}  {}", icon_ok(), style(msg).bold());
}

/// Print a fatal error and its cause chain.
pub fn error(err: &anyhow::Error) {
    eprintln!("  {}  {} {}", icon_err(), style("Error:").red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("     {} {cause}", style("caused by:").dim());
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
