//! Shell Errors
//!
//! The shell-fatal error tier. Everything here means shell-internal state can
//! no longer be trusted: the run loop returns the error, main reports it, and
//! the process exits nonzero. Recoverable user errors (bad builtin usage,
//! cd/redirection failures, a malformed exit argument) never appear as
//! `ShellError` values; they are reported on stderr and recorded in
//! `ShellState::last_status`.

use nix::errno::Errno;
use std::collections::TryReserveError;
use thiserror::Error;

/// Shell-fatal errors.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("cannot read command line: {0}")]
    ReadLine(Errno),

    #[error("cannot write prompt: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("cannot configure signal dispositions: {0}")]
    SignalSetup(Errno),

    #[error("cannot signal child process: {0}")]
    SignalChild(Errno),

    #[error("wait for child processes failed: {0}")]
    Wait(Errno),

    #[error("out of memory while expanding a word")]
    Alloc(#[from] TryReserveError),
}
