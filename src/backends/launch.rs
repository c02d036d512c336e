//! Program launch
//!
//! Splits a command string with shell-word rules (quotes and backslash
//! escapes honored, no expansion) and replaces the current process with it.

use anyhow::Result;
use serde::Serialize;
use std::process::Command;
use tracing::info;

use crate::core::error::PappyError;

/// A tokenized command ready to execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Full argv, program first
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Replace the current process image; returns only on failure
    #[cfg(unix)]
    pub fn exec(self) -> anyhow::Error {
        use std::os::unix::process::CommandExt;

        info!(program = %self.program, args = ?self.args, "executing");
        let err = self.to_command().exec();
        PappyError::Exec {
            program: self.program,
            source: err,
        }
        .into()
    }

    /// Without exec(2) the closest equivalent is to run the program and
    /// exit with its status.
    #[cfg(not(unix))]
    pub fn exec(self) -> anyhow::Error {
        info!(program = %self.program, args = ?self.args, "executing");
        match self.to_command().status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(err) => PappyError::Exec {
                program: self.program,
                source: err,
            }
            .into(),
        }
    }
}

/// Tokenize a command string
///
/// Empty commands and unbalanced quotes are rejected. Desktop-entry field
/// codes such as `%U` are passed through untouched.
pub fn prepare(command: &str) -> Result<Invocation, PappyError> {
    let mut words = shlex::split(command)
        .ok_or_else(|| PappyError::invalid_command(command, "unbalanced quotes or trailing escape"))?
        .into_iter();

    let program = words
        .next()
        .ok_or_else(|| PappyError::invalid_command(command, "empty command"))?;

    Ok(Invocation {
        program,
        args: words.collect(),
    })
}

/// Tokenize and exec; only returns on failure
pub fn run(command: &str) -> Result<()> {
    let invocation = prepare(command)?;
    Err(invocation.exec())
}
