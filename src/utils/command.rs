//! Command execution utilities

use crate::error::{FetchError, Result};
use std::process::{Command, Stdio};

use tracing::debug;

/// Execute a command and return its stdout untouched.
///
/// stderr is passed through to the terminal. A non-zero exit status is
/// an error even when stdout was read completely.
pub fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let command = display_command(program, args);
    debug!(%command, "spawning");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| FetchError::Spawn {
            command: command.clone(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(FetchError::CommandFailed {
            command,
            status: output.status,
        })
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
