// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::arch::UefiArch;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Clone, Copy, Debug)]
pub enum Package {
    Gem,
    GemEfi,
    Xtask,
}

impl Package {
    fn as_str(self) -> &'static str {
        match self {
            Self::Gem => "gem",
            Self::GemEfi => "gem-efi",
            Self::Xtask => "xtask",
        }
    }

    /// Packages with host-runnable unit tests. The kernel and its drivers
    /// only run inside a VM.
    pub fn host_tested() -> Vec<Package> {
        vec![Self::GemEfi, Self::Xtask]
    }
}

#[derive(Clone, Copy, Debug)]
pub enum CargoAction {
    Build,
    Test,
}

/// A cargo invocation, described declaratively so tests can check the
/// command line it turns into.
#[derive(Debug)]
pub struct Cargo {
    pub action: CargoAction,
    pub packages: Vec<Package>,
    pub release: bool,
    /// UEFI target triple, or `None` to build for the host.
    pub target: Option<UefiArch>,
}

impl Cargo {
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::new("cargo");

        let action = match self.action {
            CargoAction::Build => "build",
            CargoAction::Test => "test",
        };
        cmd.arg(action);

        if self.release {
            cmd.arg("--release");
        }

        if let Some(target) = self.target {
            cmd.args(["--target", &target.as_triple()]);
        }

        if self.packages.is_empty() {
            bail!("packages cannot be empty");
        }
        for package in &self.packages {
            cmd.args(["--package", package.as_str()]);
        }

        Ok(cmd)
    }
}

/// Path where cargo places the kernel image.
///
/// This is the single source of truth for the artifact location: the dump
/// step and the QEMU TFTP configuration both derive from it, so they can
/// never disagree with what the build step produced.
pub fn artifact_path(arch: UefiArch, release: bool) -> PathBuf {
    Path::new("target")
        .join(arch.as_triple())
        .join(if release { "release" } else { "debug" })
        .join("gem.efi")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::command_to_string;

    #[test]
    fn test_build_command() {
        let cargo = Cargo {
            action: CargoAction::Build,
            packages: vec![Package::Gem],
            release: false,
            target: Some(UefiArch::X86_64),
        };
        assert_eq!(
            command_to_string(&cargo.command().unwrap()),
            "cargo build --target x86_64-unknown-uefi --package gem"
        );
    }

    #[test]
    fn test_test_command() {
        let cargo = Cargo {
            action: CargoAction::Test,
            packages: Package::host_tested(),
            release: false,
            target: None,
        };
        assert_eq!(
            command_to_string(&cargo.command().unwrap()),
            "cargo test --package gem-efi --package xtask"
        );
    }

    #[test]
    fn test_empty_packages_rejected() {
        let cargo = Cargo {
            action: CargoAction::Build,
            packages: Vec::new(),
            release: false,
            target: None,
        };
        assert!(cargo.command().is_err());
    }

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            artifact_path(UefiArch::X86_64, false),
            Path::new("target/x86_64-unknown-uefi/debug/gem.efi")
        );
        assert_eq!(
            artifact_path(UefiArch::X86_64, true),
            Path::new("target/x86_64-unknown-uefi/release/gem.efi")
        );
    }
}
