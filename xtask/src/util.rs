// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::{bail, Result};
use std::process::Command;

/// Format a `Command` as "program arg1 arg2" for logging.
pub fn command_to_string(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Print a command, run it, and check that it completed successfully.
///
/// Every pipeline step goes through here: a step that exits non-zero turns
/// into an `Err`, which aborts the remaining steps.
pub fn run_cmd(mut cmd: Command) -> Result<()> {
    println!("{}", command_to_string(&cmd));

    let status = cmd.status()?;
    if status.success() {
        Ok(())
    } else {
        bail!("command failed: {}", status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_to_string() {
        let mut cmd = Command::new("MyCommand");
        cmd.args(["abc", "123"]);
        assert_eq!(command_to_string(&cmd), "MyCommand abc 123");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_cmd_propagates_failure() {
        assert!(run_cmd(Command::new("true")).is_ok());
        assert!(run_cmd(Command::new("false")).is_err());
    }
}
