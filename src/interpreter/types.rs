//! Interpreter Types
//!
//! Type definitions for the shell state and the per-dispatch command
//! descriptor.

use nix::unistd::{self, Pid};

/// Process-wide shell state, alive for the whole run.
///
/// There is no job table: the only individually addressable background
/// identity is the most recent background pid. Earlier background children
/// are reachable only through the reaper's process-group-wide scan.
#[derive(Debug, Clone)]
pub struct ShellState {
    /// Pid of the shell itself. Immutable; used for `$$` expansion.
    pub shell_pid: Pid,
    /// Exit status of the last foreground command. Used for `$?` expansion
    /// and as the default `exit` code.
    pub last_status: i32,
    /// Pid of the most recent background child, if any. Used for `$!`
    /// expansion; `None` expands to the empty string.
    pub last_background_pid: Option<Pid>,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            shell_pid: unistd::getpid(),
            last_status: 0,
            last_background_pid: None,
        }
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed command line, consumed by one dispatch.
///
/// `argv` is never empty (the parser returns `None` instead of building an
/// empty command); element 0 is the command name. The exec-time argv is
/// rebuilt as a `CString` vector in the launcher, where `execvp` supplies
/// the terminating sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Command name and positional arguments, in order.
    pub argv: Vec<String>,
    /// Redirection target for standard input, if any. Must pre-exist.
    pub input_file: Option<String>,
    /// Redirection target for standard output, if any. Created if absent,
    /// always truncated.
    pub output_file: Option<String>,
    /// True when the trailing `&` marker was present: the launcher does not
    /// wait and the reaper discovers the child's completion later.
    pub background: bool,
}
