//! cd - Change directory builtin
//!
//! `cd` with no argument goes to HOME, `cd dir` to the given path. Every
//! failure is recoverable: the shell reports, sets a nonzero status, and
//! keeps looping. The working directory is the only state a successful cd
//! changes.

use std::env;

use crate::interpreter::types::ShellState;

/// Why a cd target could not be resolved or entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdError {
    TooManyArgs,
    HomeNotSet,
    /// chdir itself failed; carries the target and the OS error text.
    ChangeFailed { target: String, reason: String },
}

impl CdError {
    pub fn message(&self) -> String {
        match self {
            CdError::TooManyArgs => "cd: too many arguments".to_string(),
            CdError::HomeNotSet => "cd: HOME not set".to_string(),
            CdError::ChangeFailed { target, reason } => {
                format!("cd: {}: {}", target, reason)
            }
        }
    }
}

/// Resolve the target directory from the arguments and the HOME value.
pub fn resolve_cd_target(args: &[String], home: Option<String>) -> Result<String, CdError> {
    match args {
        [] => match home {
            Some(dir) if !dir.is_empty() => Ok(dir),
            _ => Err(CdError::HomeNotSet),
        },
        [dir] => Ok(dir.clone()),
        _ => Err(CdError::TooManyArgs),
    }
}

/// Handle the cd builtin: resolve the target, chdir, record the status.
pub fn handle_cd(state: &mut ShellState, args: &[String]) {
    let result = resolve_cd_target(args, env::var("HOME").ok()).and_then(|target| {
        env::set_current_dir(&target).map_err(|err| CdError::ChangeFailed {
            target,
            reason: err.to_string(),
        })
    });

    match result {
        Ok(()) => state.last_status = 0,
        Err(err) => {
            eprintln!("minish: {}", err.message());
            state.last_status = 1;
        }
    }
}
