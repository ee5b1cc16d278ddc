//! Shell Environment
//!
//! Main entry point for the shell. Ties together the reaper, prompt, line
//! reader, splitter, expander, parser, builtins, and launcher into the
//! read-eval loop: reap, prompt, read (interruptible), split, expand,
//! parse, dispatch, reap again.

use std::env;
use std::io::{self, Write};

use nix::errno::Errno;
use nix::unistd;

use crate::interpreter::builtins;
use crate::interpreter::errors::ShellError;
use crate::interpreter::signals::{self, ReadInterruptGuard, SavedDispositions};
use crate::interpreter::{
    dispatch_builtin, effective_ifs, expand_token, launcher, parse_tokens, reaper, split_words,
    ShellState,
};

/// Options for running a shell.
#[derive(Debug, Default)]
pub struct ShellOptions {
    /// A single command line to execute instead of reading interactively.
    pub command: Option<String>,
}

/// What one attempt to read a line produced.
enum ReadOutcome {
    /// A complete line (or a final unterminated one).
    Line(Vec<u8>),
    /// SIGINT arrived during the blocking read; restart at a fresh prompt.
    Interrupted,
    /// End of input: behaves as `exit` with no argument.
    Eof,
}

/// The interactive shell: process-wide state plus the signal dispositions
/// recorded before the shell installed its own.
pub struct Shell {
    state: ShellState,
    saved_signals: SavedDispositions,
}

impl Shell {
    /// Create a shell, installing its signal dispositions (SIGINT and
    /// SIGTSTP ignored; SIGTSTP stays that way for the whole run).
    pub fn new() -> Result<Self, ShellError> {
        let saved_signals =
            signals::install_shell_dispositions().map_err(ShellError::SignalSetup)?;
        Ok(Self {
            state: ShellState::new(),
            saved_signals,
        })
    }

    /// Run to completion. Returns the shell's exit status; `exit` and
    /// end-of-input terminate the process directly and never return here.
    pub fn run(&mut self, options: ShellOptions) -> Result<i32, ShellError> {
        if let Some(line) = options.command {
            self.exec_line(&line)?;
            reaper::reap_background_jobs()?;
            return Ok(self.state.last_status);
        }
        self.run_interactive()
    }

    fn run_interactive(&mut self) -> Result<i32, ShellError> {
        loop {
            reaper::reap_background_jobs()?;
            self.write_prompt()?;
            match self.read_line()? {
                ReadOutcome::Line(bytes) => {
                    let line = String::from_utf8_lossy(&bytes).into_owned();
                    self.exec_line(&line)?;
                    reaper::reap_background_jobs()?;
                }
                ReadOutcome::Interrupted => {
                    // Abandon the partial line; the prompt comes back fresh.
                    eprintln!();
                }
                ReadOutcome::Eof => builtins::terminate_shell(self.state.last_status),
            }
        }
    }

    /// Run one line through the full pipeline: split, expand, parse,
    /// dispatch. Blank, comment-only, and empty-argv lines are no-ops.
    fn exec_line(&mut self, line: &str) -> Result<(), ShellError> {
        let ifs = effective_ifs(env::var("IFS").ok());
        let tokens = split_words(line, &ifs);
        if tokens.is_empty() {
            return Ok(());
        }

        let home = env::var("HOME").unwrap_or_default();
        let mut expanded = Vec::with_capacity(tokens.len());
        for token in &tokens {
            expanded.push(expand_token(token, &home, &self.state)?);
        }

        let Some(command) = parse_tokens(expanded) else {
            return Ok(());
        };

        if dispatch_builtin(&mut self.state, &command) {
            return Ok(());
        }
        launcher::launch(&command, &mut self.state, &self.saved_signals)
    }

    /// Write the PS1 prompt (default empty) to stderr.
    fn write_prompt(&self) -> Result<(), ShellError> {
        let prompt = env::var("PS1").unwrap_or_default();
        let mut stderr = io::stderr();
        stderr.write_all(prompt.as_bytes())?;
        stderr.flush()?;
        Ok(())
    }

    /// Read one line from standard input, byte at a time, under the
    /// read-interrupting SIGINT disposition.
    ///
    /// The raw read(2) is deliberate: buffered readers retry interrupted
    /// reads internally, which would make the read uninterruptible.
    fn read_line(&mut self) -> Result<ReadOutcome, ShellError> {
        let _guard = ReadInterruptGuard::install().map_err(ShellError::SignalSetup)?;
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match unistd::read(libc::STDIN_FILENO, &mut byte) {
                Ok(0) => {
                    if line.is_empty() {
                        return Ok(ReadOutcome::Eof);
                    }
                    return Ok(ReadOutcome::Line(line));
                }
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == b'\n' {
                        return Ok(ReadOutcome::Line(line));
                    }
                }
                Err(Errno::EINTR) => return Ok(ReadOutcome::Interrupted),
                Err(err) => return Err(ShellError::ReadLine(err)),
            }
        }
    }
}
