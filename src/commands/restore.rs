//! `pg-backup-rs restore`: replay one saved dump into one target database.
//!
//! The flow is strictly linear:
//!
//! | # | Step    | Ends the run when …                          |
//! |---|---------|----------------------------------------------|
//! | 1 | List    | no `.sql` files exist (error, exit 1)        |
//! | 2 | Select  | the operator backs out (clean exit)          |
//! | 3 | Target  | never; invalid input is asked again          |
//! | 4 | Execute | -                                            |
//! | 5 | Report  | `psql` failed (error, exit 1)                |

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    backups::{self, redact_url, validate_target},
    config::Config,
    error::RestoreError,
    exec::Executor,
    prompt::Prompter,
    runner::restore_args,
    ui,
};

pub const SELECT_PROMPT: &str = "Select a backup to restore";
pub const TARGET_PROMPT: &str = "Enter target PostgreSQL URL";

#[derive(Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored { file: PathBuf, target: String },
    Cancelled,
}

pub fn run(cfg: &Config, exec: &dyn Executor, prompter: &mut dyn Prompter) -> Result<RestoreOutcome> {
    // 1. List
    backups::ensure_dir(&cfg.backup_dir)?;
    let files = backups::list(&cfg.backup_dir)?;
    if files.is_empty() {
        return Err(RestoreError::NoBackups {
            dir: cfg.backup_dir.clone(),
        }
        .into());
    }

    // 2. Select
    let Some(choice) = prompter.select(SELECT_PROMPT, &files)? else {
        ui::info("No file selected, exiting...");
        return Ok(RestoreOutcome::Cancelled);
    };
    let name = files
        .get(choice)
        .with_context(|| format!("selection {choice} is out of range"))?;
    let file = cfg.backup_dir.join(name);

    // 3. Target
    let target = prompter.text(TARGET_PROMPT, validate_target)?;

    // 4. Execute
    ui::info(&format!(
        "Restoring {} → {}",
        file.display(),
        redact_url(&target)
    ));
    info!(file = %file.display(), target = %redact_url(&target), "restoring");

    let status = exec
        .passthrough(&restore_args(&cfg.tools, &target, &file))
        .map_err(RestoreError::Spawn)?;

    // 5. Report
    if !status.success() {
        return Err(RestoreError::Failed {
            program: cfg.tools.psql.clone(),
            status,
            file,
        }
        .into());
    }

    ui::success("Restore completed");
    Ok(RestoreOutcome::Restored { file, target })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell, collections::VecDeque, fs, os::unix::process::ExitStatusExt, path::Path,
        process::ExitStatus,
    };

    use super::*;
    use crate::{config::ToolsConfig, exec::Captured, prompt::Validator};

    /// Replays canned answers.  Text answers rejected by the validator are
    /// consumed and counted, mimicking a prompt that asks again.
    #[derive(Default)]
    struct ScriptedPrompter {
        selection: Option<usize>,
        answers: VecDeque<String>,
        shown: Vec<String>,
        prompts: Vec<String>,
        rejected: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(selection: Option<usize>, answers: &[&str]) -> Self {
            Self {
                selection,
                answers: answers.iter().map(|a| (*a).to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
            self.prompts.push(prompt.into());
            self.shown = items.to_vec();
            Ok(self.selection)
        }

        fn text(&mut self, prompt: &str, validate: Validator) -> Result<String> {
            self.prompts.push(prompt.into());
            while let Some(answer) = self.answers.pop_front() {
                match validate(&answer) {
                    Ok(()) => return Ok(answer),
                    Err(_) => self.rejected.push(answer),
                }
            }
            anyhow::bail!("script ran out of answers")
        }
    }

    struct RecordingExecutor {
        status: ExitStatus,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl RecordingExecutor {
        /// `code` is the exit code `psql` pretends to return.
        fn new(code: i32) -> Self {
            Self {
                status: ExitStatus::from_raw(code << 8),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Executor for RecordingExecutor {
        fn capture(&self, _args: &[String]) -> Result<Captured> {
            unreachable!("restore never captures output")
        }

        fn passthrough(&self, args: &[String]) -> Result<ExitStatus> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(self.status)
        }
    }

    fn cfg_with(dir: &Path, files: &[&str]) -> Config {
        let backup_dir = dir.join("db_backups");
        fs::create_dir_all(&backup_dir).unwrap();
        for f in files {
            fs::write(backup_dir.join(f), "-- dump").unwrap();
        }
        Config {
            backup_dir,
            databases: vec![],
            tools: ToolsConfig::default(),
        }
    }

    const TWO_FILES: [&str; 2] = [
        "beta_2024_01_01_00_00_00.sql",
        "alpha_2024_06_01_00_00_00.sql",
    ];

    #[test]
    fn presents_newest_backup_first_across_databases() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &TWO_FILES);
        let mut prompter = ScriptedPrompter::new(None, &[]);

        run(&cfg, &RecordingExecutor::new(0), &mut prompter).unwrap();

        assert_eq!(prompter.shown, vec![
            "alpha_2024_06_01_00_00_00.sql",
            "beta_2024_01_01_00_00_00.sql",
        ]);
    }

    #[test]
    fn newest_backup_of_one_database_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &[
            "app_2024_01_01_00_00_00.sql",
            "app_2024_03_01_00_00_00.sql",
            "app_2024_02_01_00_00_00.sql",
        ]);
        let mut prompter = ScriptedPrompter::new(None, &[]);

        run(&cfg, &RecordingExecutor::new(0), &mut prompter).unwrap();

        assert_eq!(prompter.shown[0], "app_2024_03_01_00_00_00.sql");
        assert_eq!(prompter.shown[2], "app_2024_01_01_00_00_00.sql");
    }

    #[test]
    fn empty_directory_errors_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &[]);
        let mut prompter = ScriptedPrompter::new(Some(0), &["postgres://h/db"]);
        let exec = RecordingExecutor::new(0);

        let err = run(&cfg, &exec, &mut prompter).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RestoreError>(),
            Some(RestoreError::NoBackups { .. })
        ));
        assert!(prompter.prompts.is_empty());
        assert!(exec.calls.borrow().is_empty());
    }

    #[test]
    fn cancelled_selection_is_a_clean_exit() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &TWO_FILES);
        let mut prompter = ScriptedPrompter::new(None, &["postgres://h/db"]);
        let exec = RecordingExecutor::new(0);

        let outcome = run(&cfg, &exec, &mut prompter).unwrap();

        assert_eq!(outcome, RestoreOutcome::Cancelled);
        assert_eq!(prompter.prompts, vec![SELECT_PROMPT]);
        assert!(exec.calls.borrow().is_empty());
    }

    #[test]
    fn invalid_targets_are_asked_again() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &TWO_FILES);
        let mut prompter =
            ScriptedPrompter::new(Some(0), &["localhost/db", "mysql://h/db", "postgres://h/db"]);

        let outcome = run(&cfg, &RecordingExecutor::new(0), &mut prompter).unwrap();

        assert_eq!(prompter.rejected, vec!["localhost/db", "mysql://h/db"]);
        assert!(matches!(
            outcome,
            RestoreOutcome::Restored { ref target, .. } if target == "postgres://h/db"
        ));
    }

    #[test]
    fn runs_psql_against_selected_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &TWO_FILES);
        let mut prompter = ScriptedPrompter::new(Some(0), &["postgres://u:p@h/target"]);
        let exec = RecordingExecutor::new(0);

        let outcome = run(&cfg, &exec, &mut prompter).unwrap();

        let expected_file = cfg.backup_dir.join("alpha_2024_06_01_00_00_00.sql");
        assert_eq!(outcome, RestoreOutcome::Restored {
            file: expected_file.clone(),
            target: "postgres://u:p@h/target".into(),
        });
        assert_eq!(exec.calls.borrow().as_slice(), &[vec![
            "psql".to_string(),
            "postgres://u:p@h/target".to_string(),
            "-f".to_string(),
            expected_file.to_string_lossy().into_owned(),
        ]]);
    }

    #[test]
    fn psql_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &TWO_FILES);
        let mut prompter = ScriptedPrompter::new(Some(0), &["postgres://h/db"]);

        let err = run(&cfg, &RecordingExecutor::new(3), &mut prompter).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RestoreError>(),
            Some(RestoreError::Failed { status, .. }) if status.code() == Some(3)
        ));
        let msg = err.to_string();
        assert!(msg.contains("exit status: 3"), "got: {msg}");
        assert!(msg.contains("alpha_2024_06_01_00_00_00.sql"), "got: {msg}");
    }

    #[test]
    fn out_of_range_selection_errors() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_with(dir.path(), &TWO_FILES);
        let mut prompter = ScriptedPrompter::new(Some(7), &["postgres://h/db"]);

        assert!(run(&cfg, &RecordingExecutor::new(0), &mut prompter).is_err());
    }
}
