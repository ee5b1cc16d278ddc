//! minish - A minimal interactive command interpreter
//!
//! This library provides the read-eval loop of a small shell: IFS word
//! splitting, tilde and special-parameter expansion, redirection and
//! background parsing, two builtins (`exit`, `cd`), process launching, and
//! opportunistic reaping of background jobs.

pub mod interpreter;
pub mod shell;

pub use interpreter::{Command, ShellError, ShellState};
pub use shell::{Shell, ShellOptions};
