//! Signal Dispositions
//!
//! The shell ignores SIGTSTP for its entire lifetime and ignores SIGINT in
//! every phase except the blocking line read, where a no-op handler is
//! installed (without SA_RESTART) so delivery interrupts the read with
//! EINTR and the loop restarts at a fresh prompt. Forked children restore
//! the pre-shell dispositions of both signals before exec.

use nix::errno::Errno;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

/// SIGINT handler used around the line read. The handler body does nothing;
/// its installation without SA_RESTART is what makes the blocking read
/// return EINTR.
extern "C" fn interrupt_read(_signo: libc::c_int) {}

/// The SIGINT/SIGTSTP actions the shell inherited at startup. Children
/// restore these before exec so external commands and background jobs see
/// normal signal behavior.
#[derive(Debug, Clone, Copy)]
pub struct SavedDispositions {
    sigint: SigAction,
    sigtstp: SigAction,
}

/// Install the shell's own dispositions (both signals ignored) and return
/// the inherited ones for later restoration in children.
pub fn install_shell_dispositions() -> Result<SavedDispositions, Errno> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    let sigint = unsafe { signal::sigaction(Signal::SIGINT, &ignore) }?;
    let sigtstp = unsafe { signal::sigaction(Signal::SIGTSTP, &ignore) }?;
    Ok(SavedDispositions { sigint, sigtstp })
}

/// Restore the inherited dispositions. Called in the child between fork and
/// exec.
pub fn restore_child_dispositions(saved: &SavedDispositions) -> Result<(), Errno> {
    unsafe {
        signal::sigaction(Signal::SIGINT, &saved.sigint)?;
        signal::sigaction(Signal::SIGTSTP, &saved.sigtstp)?;
    }
    Ok(())
}

/// Scoped SIGINT disposition for the blocking line read.
///
/// Construction installs the read-interrupting handler; drop restores the
/// previous action on every exit path, interruption included.
pub struct ReadInterruptGuard {
    previous: SigAction,
}

impl ReadInterruptGuard {
    pub fn install() -> Result<Self, Errno> {
        let action = SigAction::new(
            SigHandler::Handler(interrupt_read),
            SaFlags::empty(),
            SigSet::empty(),
        );
        let previous = unsafe { signal::sigaction(Signal::SIGINT, &action) }?;
        Ok(Self { previous })
    }
}

impl Drop for ReadInterruptGuard {
    fn drop(&mut self) {
        // Restoration failure here is unreportable; the next guarded read
        // reinstalls the handler regardless.
        let _ = unsafe { signal::sigaction(Signal::SIGINT, &self.previous) };
    }
}
