//! Running external commands.

use std::fmt;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// A program and its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs an [`Invocation`] to completion and reports its exit code.
///
/// `Ok(code)` means the command ran; a non-zero `code` is the command's own
/// failure.  `Err` means it could not be run at all.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32>;
}

/// Spawns a child process that inherits the working directory and stdio,
/// and blocks until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .with_context(|| format!("failed to execute `{invocation}`"))?;
        Ok(exit_code(status))
    }
}

/// Exit code of a finished child.  A child killed by a signal reports
/// `128 + signal`, like a POSIX shell.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
