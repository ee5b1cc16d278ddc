//! Process Launcher
//!
//! Forks a child, configures signals and redirection inside it, and replaces
//! its image with the external command. The parent blocks for a foreground
//! child's next state change or records a background child's pid and
//! returns to the loop. A successful exec never returns to shell logic.

use std::ffi::CString;
use std::path::Path;
use std::process;

use nix::fcntl::{open, OFlag};
use nix::sys::signal::{kill, Signal};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{close, dup2, execvp, fork, ForkResult, Pid};

use crate::interpreter::errors::ShellError;
use crate::interpreter::signals::{self, SavedDispositions};
use crate::interpreter::types::{Command, ShellState};

/// Child exit status when redirection or signal setup fails before exec.
const CHILD_SETUP_FAILURE: i32 = 1;
/// Child exit status when the image replacement itself fails.
const EXEC_FAILURE: i32 = 127;

/// How a foreground wait result feeds back into shell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForegroundOutcome {
    /// Normal exit: the code becomes `last_status`.
    Exited(i32),
    /// Signal death: `last_status` becomes 128 + signal number.
    Signaled(i32),
    /// Stopped: report, send SIGCONT, and track the child as the most
    /// recent background job.
    Stopped(Pid),
    /// Any other transition leaves state untouched.
    Other,
}

/// Classify a wait status into its effect on shell state.
pub fn classify_wait_status(status: WaitStatus) -> ForegroundOutcome {
    match status {
        WaitStatus::Exited(_pid, code) => ForegroundOutcome::Exited(code),
        WaitStatus::Signaled(_pid, sig, _core_dumped) => ForegroundOutcome::Signaled(128 + sig as i32),
        WaitStatus::Stopped(pid, _sig) => ForegroundOutcome::Stopped(pid),
        _ => ForegroundOutcome::Other,
    }
}

/// Fork and run an external command.
///
/// Fork failure is recoverable: it is reported, `last_status` is set, and
/// the loop continues without a dispatch.
pub fn launch(
    command: &Command,
    state: &mut ShellState,
    saved: &SavedDispositions,
) -> Result<(), ShellError> {
    match unsafe { fork() } {
        Err(err) => {
            eprintln!("minish: fork failed: {}", err);
            state.last_status = 1;
            Ok(())
        }
        Ok(ForkResult::Child) => run_child(command, saved),
        Ok(ForkResult::Parent { child }) => {
            if command.background {
                state.last_background_pid = Some(child);
                Ok(())
            } else {
                wait_foreground(child, state)
            }
        }
    }
}

/// Child side: restore signals, wire redirections, exec. Every failure
/// terminates only this child.
fn run_child(command: &Command, saved: &SavedDispositions) -> ! {
    if let Err(err) = signals::restore_child_dispositions(saved) {
        eprintln!("minish: cannot restore signal dispositions: {}", err);
        process::exit(CHILD_SETUP_FAILURE);
    }

    if let Some(path) = &command.input_file {
        if let Err(err) = redirect_fd(path, libc::STDIN_FILENO, OFlag::O_RDONLY, Mode::empty()) {
            eprintln!("minish: cannot redirect standard input from {}: {}", path, err);
            process::exit(CHILD_SETUP_FAILURE);
        }
    }

    if let Some(path) = &command.output_file {
        let flags = OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC;
        let mode = Mode::S_IRWXU | Mode::S_IRWXG | Mode::S_IRWXO;
        if let Err(err) = redirect_fd(path, libc::STDOUT_FILENO, flags, mode) {
            eprintln!("minish: cannot redirect standard output to {}: {}", path, err);
            process::exit(CHILD_SETUP_FAILURE);
        }
    }

    let argv: Vec<CString> = match command
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<_, _>>()
    {
        Ok(argv) => argv,
        Err(_) => {
            eprintln!("minish: {}: argument contains an interior nul byte", command.argv[0]);
            process::exit(CHILD_SETUP_FAILURE);
        }
    };

    // execvp searches PATH iff the command name has no slash.
    let err = match execvp(&argv[0], &argv) {
        Ok(infallible) => match infallible {},
        Err(err) => err,
    };
    eprintln!("minish: {}: cannot execute: {}", command.argv[0], err);
    process::exit(EXEC_FAILURE);
}

/// Open `path` and duplicate it onto `target_fd`, closing the source fd
/// unless it already is the target.
fn redirect_fd(path: &str, target_fd: i32, flags: OFlag, mode: Mode) -> nix::Result<()> {
    let fd = open(Path::new(path), flags, mode)?;
    if fd != target_fd {
        dup2(fd, target_fd)?;
        close(fd)?;
    }
    Ok(())
}

/// Parent side of a foreground dispatch: block for that specific child's
/// next state change and apply it to shell state. A child stopped in the
/// foreground is resumed and becomes a tracked background job.
fn wait_foreground(child: Pid, state: &mut ShellState) -> Result<(), ShellError> {
    let status = waitpid(child, Some(WaitPidFlag::WUNTRACED)).map_err(ShellError::Wait)?;
    match classify_wait_status(status) {
        ForegroundOutcome::Exited(code) => state.last_status = code,
        ForegroundOutcome::Signaled(code) => state.last_status = code,
        ForegroundOutcome::Stopped(pid) => {
            eprintln!("Child process {} stopped. Continuing.", pid);
            kill(pid, Signal::SIGCONT).map_err(ShellError::SignalChild)?;
            state.last_background_pid = Some(pid);
        }
        ForegroundOutcome::Other => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;

    #[test]
    fn test_classify_exited() {
        let status = WaitStatus::Exited(Pid::from_raw(100), 3);
        assert_eq!(classify_wait_status(status), ForegroundOutcome::Exited(3));
    }

    #[test]
    fn test_classify_signaled_maps_to_128_plus_signo() {
        let status = WaitStatus::Signaled(Pid::from_raw(100), Signal::SIGTERM, false);
        assert_eq!(classify_wait_status(status), ForegroundOutcome::Signaled(128 + 15));
    }

    #[test]
    fn test_classify_stopped_tracks_pid() {
        let pid = Pid::from_raw(321);
        let status = WaitStatus::Stopped(pid, Signal::SIGTSTP);
        assert_eq!(classify_wait_status(status), ForegroundOutcome::Stopped(pid));
    }

    #[test]
    fn test_classify_still_alive_is_inert() {
        assert_eq!(classify_wait_status(WaitStatus::StillAlive), ForegroundOutcome::Other);
    }
}
