//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  The `Cli` struct is parsed once in `main` and then
//! passed (by reference) into the command handlers.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Top-level CLI arguments, shared across every subcommand.
#[derive(Parser, Debug)]
#[command(
    name    = "pg-backup-rs",
    about   = "Dump PostgreSQL databases with pg_dump and restore them with psql",
    version,
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Defaults to `pg-backup.toml` in the current working directory.  Values
    /// here override the machine-wide `<config dir>/pg-backup-rs/config.toml`.
    #[arg(short, long, env = "PG_BACKUP_CONFIG", default_value = "pg-backup.toml")]
    pub config: PathBuf,

    /// Directory holding the dump files.  Overrides `backup_dir` from the
    /// config file.
    #[arg(short, long, env = "PG_BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Print the resolved configuration and exit without running anything.
    #[arg(long)]
    pub print_config: bool,

    /// Log more detail to stderr (`-v` info, `-vv` debug).  `PG_BACKUP_LOG`
    /// takes precedence when set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.  Omit to print usage.
    #[command(subcommand)]
    pub command: Option<Subcommand>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum Subcommand {
    /// Back up every configured database into the backup directory.
    Backup,

    /// Pick a saved dump and restore it into a target database.
    Restore,

    /// List saved dumps, newest first.
    List,

    /// Scaffold a `pg-backup.toml` in the current directory.
    ///
    /// Exits with an error if the file already exists.
    Init,

    /// Anything else prints usage.
    #[command(external_subcommand)]
    Other(Vec<String>),
}
