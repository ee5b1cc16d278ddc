//! Builtin Command Dispatch
//!
//! Routes a parsed command to a builtin handler. Anything unrecognized
//! falls through to the process launcher.

use crate::interpreter::builtins::{handle_cd, handle_exit};
use crate::interpreter::types::{Command, ShellState};

/// Dispatch a command to the appropriate builtin handler.
/// Returns false if the command should be launched as an external process.
pub fn dispatch_builtin(state: &mut ShellState, command: &Command) -> bool {
    match command.argv.first().map(String::as_str) {
        Some("exit") => {
            handle_exit(state, &command.argv[1..]);
            true
        }
        Some("cd") => {
            handle_cd(state, &command.argv[1..]);
            true
        }
        // The parser never builds an empty argv; treat one as handled so a
        // nonexistent command name is never inspected or launched.
        None => true,
        Some(_) => false,
    }
}
