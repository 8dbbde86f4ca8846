// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inspection step: dump the built image's headers and symbols.

use crate::util::run_cmd;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use std::process::Command;

/// Pick the dump tool: `$OBJDUMP` wins, then `llvm-objdump` (understands
/// PE/COFF regardless of how the host binutils were configured), then GNU
/// `objdump`.
fn objdump_tool() -> String {
    if let Ok(tool) = env::var("OBJDUMP") {
        return tool;
    }
    if has_cmd("llvm-objdump") {
        return "llvm-objdump".into();
    }
    "objdump".into()
}

fn has_cmd(target_cmd: &str) -> bool {
    #[cfg(target_family = "unix")]
    let mut cmd = Command::new("which");
    #[cfg(target_os = "windows")]
    let mut cmd = Command::new("where");
    cmd.arg(target_cmd);
    cmd.output().map(|out| out.status.success()).unwrap_or(false)
}

fn dump_command(tool: &str, artifact: &Path) -> Command {
    let mut cmd = Command::new(tool);
    // All headers: file header, sections, and the symbol table.
    cmd.arg("-x");
    cmd.arg(artifact);
    cmd
}

/// Print the artifact's file, section, and symbol headers.
///
/// Purely observational: the artifact is only ever opened for reading.
pub fn dump(artifact: &Path) -> Result<()> {
    fs_err::metadata(artifact)
        .with_context(|| format!("kernel image not found: {}", artifact.display()))?;

    run_cmd(dump_command(&objdump_tool(), artifact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::command_to_string;

    #[test]
    fn test_dump_command() {
        let cmd = dump_command(
            "llvm-objdump",
            Path::new("target/x86_64-unknown-uefi/debug/gem.efi"),
        );
        assert_eq!(
            command_to_string(&cmd),
            "llvm-objdump -x target/x86_64-unknown-uefi/debug/gem.efi"
        );
    }
}
