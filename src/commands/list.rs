//! `pg-backup-rs list`: show saved dumps in the order `restore` offers them.

use std::{fs, path::Path};

use anyhow::Result;
use console::style;
use indicatif::HumanBytes;

use crate::{backups, config::Config};

pub fn run(cfg: &Config) -> Result<()> {
    if !cfg.backup_dir.is_dir() {
        println!("No backups yet ({} does not exist).", cfg.backup_dir.display());
        return Ok(());
    }

    let files = backups::list(&cfg.backup_dir)?;
    if files.is_empty() {
        println!("No backup files found in {}", cfg.backup_dir.display());
        return Ok(());
    }

    for name in &files {
        println!("  {name}  {}", style(size_of(&cfg.backup_dir, name)).dim());
    }
    Ok(())
}

/// Size of one dump; unreadable entries show as zero.
fn size_of(dir: &Path, name: &str) -> HumanBytes {
    HumanBytes(fs::metadata(dir.join(name)).map_or(0, |m| m.len()))
}
