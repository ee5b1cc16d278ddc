//! exit - Exit shell builtin
//!
//! `exit` with no argument terminates with the last foreground status;
//! `exit N` with an all-digit argument terminates with N. A malformed
//! argument or excess arguments are recoverable: the shell reports, sets a
//! nonzero status, and keeps looping. Confirmed termination sends SIGINT to
//! every still-running process in the shell's process group first.

use std::process;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

use crate::interpreter::types::ShellState;

/// Outcome of validating `exit` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitRequest {
    /// Terminate the shell with this code.
    Terminate(i32),
    /// Recoverable error: report `message`, set `status`, keep looping.
    Invalid { status: i32, message: String },
}

/// Validate `exit` arguments against the last foreground status.
///
/// A valid argument is all ASCII digits (non-negative by construction);
/// anything else, including digit strings too large for an exit code's
/// `i32`, is recoverable.
pub fn parse_exit_args(args: &[String], last_status: i32) -> ExitRequest {
    match args {
        [] => ExitRequest::Terminate(last_status),
        [arg] => {
            if arg.is_empty() || !arg.chars().all(|c| c.is_ascii_digit()) {
                return ExitRequest::Invalid {
                    status: 2,
                    message: format!("exit: {}: numeric argument required", arg),
                };
            }
            match arg.parse::<i32>() {
                Ok(code) => ExitRequest::Terminate(code),
                Err(_) => ExitRequest::Invalid {
                    status: 2,
                    message: format!("exit: {}: numeric argument out of range", arg),
                },
            }
        }
        _ => ExitRequest::Invalid {
            status: 1,
            message: "exit: too many arguments".to_string(),
        },
    }
}

/// Handle the exit builtin. Returns only when the arguments were invalid.
pub fn handle_exit(state: &mut ShellState, args: &[String]) {
    match parse_exit_args(args, state.last_status) {
        ExitRequest::Terminate(code) => terminate_shell(code),
        ExitRequest::Invalid { status, message } => {
            eprintln!("minish: {}", message);
            state.last_status = status;
        }
    }
}

/// Confirmed termination: SIGINT to the whole process group (the shell
/// itself ignores SIGINT in this phase), the farewell notice, then exit.
/// Also the end-of-input path: EOF on standard input behaves as `exit`
/// with no argument.
pub fn terminate_shell(code: i32) -> ! {
    // Best effort; there may be no children left to signal.
    let _ = kill(Pid::from_raw(0), Signal::SIGINT);
    eprintln!("exit");
    process::exit(code);
}
