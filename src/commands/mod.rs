//! Subcommand handlers.
//!
//! Each file in this module corresponds to one user-facing command:
//!
//! | File          | Invocation               | Description                          |
//! |---------------|--------------------------|--------------------------------------|
//! | `backup.rs`   | `pg-backup-rs backup`    | Dump every configured database       |
//! | `restore.rs`  | `pg-backup-rs restore`   | Interactive restore of one dump      |
//! | `list.rs`     | `pg-backup-rs list`      | Show saved dumps, newest first       |
//! | `init.rs`     | `pg-backup-rs init`      | Scaffold a `pg-backup.toml`          |

pub mod backup;
pub mod init;
pub mod list;
pub mod restore;
