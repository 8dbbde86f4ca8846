// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::arch::UefiArch;
use clap::{Parser, Subcommand};
use std::ops::Deref;
use std::path::PathBuf;

// Common options, flattened into the subcommands that need them so the doc
// strings don't have to be copy-pasted.

#[derive(Debug, Parser)]
pub struct TargetOpt {
    /// UEFI target to build for.
    #[clap(long, action, default_value_t)]
    pub target: UefiArch,
}

impl Deref for TargetOpt {
    type Target = UefiArch;

    fn deref(&self) -> &Self::Target {
        &self.target
    }
}

#[derive(Debug, Parser)]
pub struct BuildModeOpt {
    /// Build in release mode.
    #[clap(long, action)]
    pub release: bool,
}

/// Developer utility for building, inspecting, and booting gem.
#[derive(Debug, Parser)]
pub struct Opt {
    #[clap(subcommand)]
    pub action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    Build(BuildOpt),
    Dump(DumpOpt),
    Run(QemuOpt),
    Test(TestOpt),
}

/// Build the kernel image.
#[derive(Debug, Parser)]
pub struct BuildOpt {
    #[clap(flatten)]
    pub target: TargetOpt,

    #[clap(flatten)]
    pub build_mode: BuildModeOpt,
}

/// Print the kernel image's file, section, and symbol headers.
#[derive(Debug, Parser)]
pub struct DumpOpt {
    #[clap(flatten)]
    pub target: TargetOpt,

    #[clap(flatten)]
    pub build_mode: BuildModeOpt,
}

/// Build the kernel, dump its headers, then network-boot it in QEMU.
#[derive(Debug, Parser)]
pub struct QemuOpt {
    #[clap(flatten)]
    pub target: TargetOpt,

    #[clap(flatten)]
    pub build_mode: BuildModeOpt,

    /// Guest memory size (passed to QEMU's `-m`).
    #[clap(long, action, default_value = "128M")]
    pub memory: String,

    /// Disable hardware accelerated virtualization support in QEMU.
    #[clap(long, action)]
    pub disable_kvm: bool,

    /// Path of an OVMF code file.
    #[clap(long, action, env = "OVMF_CODE")]
    pub ovmf_code: Option<PathBuf>,

    /// Path of an OVMF vars file.
    #[clap(long, action, env = "OVMF_VARS")]
    pub ovmf_vars: Option<PathBuf>,
}

/// Run unit tests on the host.
#[derive(Debug, Parser)]
pub struct TestOpt {}
