//! `pg-backup-rs`: PostgreSQL dumps and interactive restores.
//!
//! # Overview
//!
//! A thin orchestration layer around `pg_dump` and `psql`.  `backup` dumps
//! every database listed in `pg-backup.toml` into timestamped plain-SQL files;
//! `restore` lets the operator pick one of those files and replays it into a
//! target database.
//!
//! # Usage
//!
//! ```text
//! pg-backup-rs backup          # dump all configured databases
//! pg-backup-rs restore         # interactive restore
//! pg-backup-rs list            # show saved dumps, newest first
//! pg-backup-rs init            # scaffold pg-backup.toml
//! pg-backup-rs --print-config  # show resolved config without running anything
//! ```
//!
//! # Module layout
//!
//! | Module                   | Responsibility                              |
//! |--------------------------|---------------------------------------------|
//! | [`cli`]                  | Argument types parsed by clap               |
//! | [`config`]               | `Config` struct + layered TOML loader       |
//! | [`backups`]              | File naming, listing, URL helpers           |
//! | [`runner`]               | `pg_dump` / `psql` argument construction    |
//! | [`exec`]                 | Captured and inherited child execution      |
//! | [`prompt`]               | Operator prompts                            |
//! | [`ui`]                   | Spinner, result lines, summaries            |
//! | [`commands`]             | One handler per subcommand                  |

mod backups;
mod cli;
mod clock;
mod commands;
mod config;
mod error;
mod exec;
mod prompt;
mod runner;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("exiting with error: {e:?}");
            ui::error(&e);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        // ── init ──────────────────────────────────────────────────────────────
        Some(Subcommand::Init) => commands::init::run(&cli.config),

        // ── --print-config ────────────────────────────────────────────────────
        _ if cli.print_config => {
            println!("{:#?}", load_config(cli)?);
            Ok(())
        },

        // ── backup ────────────────────────────────────────────────────────────
        Some(Subcommand::Backup) => {
            let cfg = load_config(cli)?;
            // Per-database failures are reported inside; they never fail the run.
            commands::backup::run(&cfg, &exec::SystemExecutor, &clock::SystemClock)?;
            Ok(())
        },

        // ── restore ───────────────────────────────────────────────────────────
        Some(Subcommand::Restore) => {
            let cfg = load_config(cli)?;
            let mut prompter = prompt::TerminalPrompter::new();
            commands::restore::run(&cfg, &exec::SystemExecutor, &mut prompter)?;
            Ok(())
        },

        // ── list ──────────────────────────────────────────────────────────────
        Some(Subcommand::List) => commands::list::run(&load_config(cli)?),

        // ── usage ─────────────────────────────────────────────────────────────
        None | Some(Subcommand::Other(_)) => {
            Cli::command().print_help()?;
            Ok(())
        },
    }
}

/// Resolve the config from the global and local files, then apply CLI
/// overrides.
fn load_config(cli: &Cli) -> Result<config::Config> {
    let global = config::global_config_path();
    let mut cfg = config::load_merged(global.as_deref(), &cli.config)?;

    if let Some(dir) = &cli.backup_dir {
        cfg.backup_dir.clone_from(dir);
    }
    tracing::debug!(backup_dir = ?cfg.backup_dir, databases = cfg.databases.len(), "config loaded");
    Ok(cfg)
}

/// Diagnostics go to stderr so they never mix with command output.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("PG_BACKUP_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
