//! Job Reaper
//!
//! Non-blocking scan over every child in the shell's process group, run
//! before each prompt and again right after each dispatch. One pass drains
//! all currently reportable transitions, not just the first: exited and
//! signaled children are reported, stopped children are reported and
//! resumed with SIGCONT. Having nothing to reap is not an error; any other
//! wait failure is shell-fatal.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::interpreter::errors::ShellError;

/// Pid argument selecting every child in the caller's process group.
const OWN_PROCESS_GROUP: i32 = 0;

/// Drain all reportable child-state transitions.
pub fn reap_background_jobs() -> Result<(), ShellError> {
    let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
    loop {
        match waitpid(Pid::from_raw(OWN_PROCESS_GROUP), Some(flags)) {
            Ok(WaitStatus::Exited(pid, code)) => {
                eprintln!("Child process {} done. Exit status {}.", pid, code);
            }
            Ok(WaitStatus::Signaled(pid, sig, _core_dumped)) => {
                eprintln!("Child process {} done. Signaled {}.", pid, sig as i32);
            }
            Ok(WaitStatus::Stopped(pid, _sig)) => {
                kill(pid, Signal::SIGCONT).map_err(ShellError::SignalChild)?;
                eprintln!("Child process {} stopped. Continuing.", pid);
            }
            // SIGCONT deliveries surface as continued transitions; drained
            // without a notice.
            Ok(WaitStatus::Continued(_pid)) => {}
            Ok(WaitStatus::StillAlive) => break,
            // Ptrace stops cannot occur for these children.
            Ok(_) => {}
            Err(Errno::ECHILD) => break,
            Err(err) => return Err(ShellError::Wait(err)),
        }
    }
    Ok(())
}
