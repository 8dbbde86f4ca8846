// SPDX-License-Identifier: MIT OR Apache-2.0

mod arch;
mod cargo;
mod dump;
mod opt;
mod platform;
mod qemu;
mod util;

use anyhow::Result;
use arch::UefiArch;
use cargo::{Cargo, CargoAction, Package};
use clap::Parser;
use opt::{Action, BuildOpt, DumpOpt, Opt, QemuOpt, TestOpt};
use util::run_cmd;

/// Build the kernel for the UEFI target.
fn build_kernel(arch: UefiArch, release: bool) -> Result<()> {
    let cargo = Cargo {
        action: CargoAction::Build,
        packages: vec![Package::Gem],
        release,
        target: Some(arch),
    };
    run_cmd(cargo.command()?)
}

fn build(opt: &BuildOpt) -> Result<()> {
    build_kernel(*opt.target, opt.build_mode.release)
}

/// Print the headers of a previously built kernel image.
fn dump(opt: &DumpOpt) -> Result<()> {
    let artifact = cargo::artifact_path(*opt.target, opt.build_mode.release);
    dump::dump(&artifact)
}

/// The build → dump → boot pipeline. Each step runs only if the previous
/// one succeeded, so a broken or malformed image is never booted.
fn run_vm(opt: &QemuOpt) -> Result<()> {
    build_kernel(*opt.target, opt.build_mode.release)?;

    let artifact = cargo::artifact_path(*opt.target, opt.build_mode.release);
    dump::dump(&artifact)?;

    qemu::run_qemu(*opt.target, opt, &artifact)
}

/// Run unit tests on the host. The kernel itself is only exercised in a VM,
/// but the bindings' ABI checks and all of xtask are regular host tests.
fn run_host_tests(_opt: &TestOpt) -> Result<()> {
    let cargo = Cargo {
        action: CargoAction::Test,
        packages: Package::host_tested(),
        release: false,
        target: None,
    };
    run_cmd(cargo.command()?)
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    match &opt.action {
        Action::Build(build_opt) => build(build_opt),
        Action::Dump(dump_opt) => dump(dump_opt),
        Action::Run(qemu_opt) => run_vm(qemu_opt),
        Action::Test(test_opt) => run_host_tests(test_opt),
    }
}
