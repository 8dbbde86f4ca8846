// SPDX-License-Identifier: MIT OR Apache-2.0

//! The boot step: launch QEMU and let the firmware network-boot the kernel.
//!
//! The guest gets no disk. OVMF falls through to its PXE path, obtains an
//! address from QEMU's built-in DHCP server, and fetches the boot file over
//! TFTP. The TFTP root is the build output directory and the boot file is
//! the kernel image itself, so the guest always runs exactly what the build
//! step produced.

use crate::arch::UefiArch;
use crate::opt::QemuOpt;
use crate::platform;
use crate::util::command_to_string;
use anyhow::{bail, Context, Result};
use ovmf_prebuilt::{FileType, Prebuilt, Source};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use tempfile::TempDir;
#[cfg(target_os = "linux")]
use {std::fs::Permissions, std::os::unix::fs::PermissionsExt};

/// Name of the ovmf-prebuilt release to use by default.
const OVMF_PREBUILT_SOURCE: Source = Source::EDK2_STABLE202502_R2;

/// Directory the prebuilts are downloaded into (relative to the repo root).
const OVMF_PREBUILT_DIR: &str = "target/ovmf";

impl From<UefiArch> for ovmf_prebuilt::Arch {
    fn from(arch: UefiArch) -> Self {
        match arch {
            UefiArch::X86_64 => Self::X64,
        }
    }
}

struct OvmfPaths {
    code: PathBuf,
    vars: PathBuf,
}

impl OvmfPaths {
    /// Search for an OVMF file (either code or vars), in priority order:
    /// 1. Command-line arg
    /// 2. Environment variable
    /// 3. Prebuilt file (automatically downloaded)
    fn find_ovmf_file(file_type: FileType, opt: &QemuOpt, arch: UefiArch) -> Result<PathBuf> {
        let user_provided = match file_type {
            FileType::Code => opt.ovmf_code.clone(),
            FileType::Vars => opt.ovmf_vars.clone(),
            FileType::Shell => None,
        };

        if let Some(path) = user_provided {
            if path.exists() {
                Ok(path)
            } else {
                bail!(
                    "ovmf {} file does not exist: {}",
                    file_type.as_str(),
                    path.display()
                );
            }
        } else {
            let prebuilt = Prebuilt::fetch(OVMF_PREBUILT_SOURCE, OVMF_PREBUILT_DIR)?;

            Ok(prebuilt.get_file(arch.into(), file_type))
        }
    }

    fn find(opt: &QemuOpt, arch: UefiArch) -> Result<Self> {
        let code = Self::find_ovmf_file(FileType::Code, opt, arch)?;
        let vars = Self::find_ovmf_file(FileType::Vars, opt, arch)?;

        Ok(Self { code, vars })
    }
}

enum PflashMode {
    ReadOnly,
    ReadWrite,
}

fn add_pflash_args(cmd: &mut Command, file: &Path, mode: PflashMode) {
    // Build the argument as an OsString to avoid requiring a UTF-8 path.
    let mut arg = OsString::from("if=pflash,format=raw,readonly=");
    arg.push(match mode {
        PflashMode::ReadOnly => "on",
        PflashMode::ReadWrite => "off",
    });
    arg.push(",file=");
    arg.push(file);

    cmd.arg("-drive");
    cmd.arg(arg);
}

/// Network arguments: a user-mode backend whose TFTP tree is rooted at the
/// artifact's directory with the artifact as the advertised boot file, plus
/// the virtio NIC the firmware boots from. `<tftp root>/<boot file>` is the
/// artifact path by construction.
fn netboot_args(artifact: &Path) -> Result<[OsString; 4]> {
    let tftp_root = artifact
        .parent()
        .context("artifact path has no parent directory")?;
    let boot_file = artifact
        .file_name()
        .context("artifact path has no file name")?;

    let mut netdev = OsString::from("user,id=net0,tftp=");
    netdev.push(tftp_root);
    netdev.push(",bootfile=");
    netdev.push(boot_file);

    Ok([
        "-netdev".into(),
        netdev,
        "-device".into(),
        "virtio-net-pci,netdev=net0".into(),
    ])
}

/// Wrap a child process to automatically kill it when dropped, so an error
/// (or panic) in the harness never leaves a QEMU process behind.
struct ChildWrapper(Child);

impl Drop for ChildWrapper {
    fn drop(&mut self) {
        // Do nothing if the child has already exited (does not block).
        if matches!(self.0.try_wait(), Ok(Some(_))) {
            return;
        }

        if let Err(err) = self.0.kill() {
            eprintln!("failed to kill process: {err}");
        }
        if let Err(err) = self.0.wait() {
            eprintln!("failed to wait for process exit: {err}");
        }
    }
}

pub fn run_qemu(arch: UefiArch, opt: &QemuOpt, artifact: &Path) -> Result<()> {
    let mut cmd = Command::new("qemu-system-x86_64");

    if platform::is_windows() {
        // The QEMU installer for Windows does not add the executables to
        // the PATH; append the default install directory so launching is
        // more likely to work there.
        let mut path = env::var_os("PATH").unwrap_or_default();
        path.push(r";C:\Program Files\qemu");
        cmd.env("PATH", path);
    }

    // QEMU by default enables a ton of devices which slow down boot; gem
    // only needs what is added back below.
    cmd.arg("-nodefaults");
    cmd.args(["-machine", "q35"]);
    cmd.args(["-m", &opt.memory]);

    // Headless, with the guest console and the QEMU monitor multiplexed on
    // the invoking terminal.
    cmd.args(["-display", "none"]);
    cmd.args(["-serial", "mon:stdio"]);

    // Skip the boot menu delay; with no disk attached the firmware goes
    // straight to the PXE path.
    cmd.args(["-boot", "menu=on,splash-time=0"]);

    if platform::is_linux() && !opt.disable_kvm {
        cmd.arg("--enable-kvm");
    }

    // Set up OVMF.
    let tmp_dir = TempDir::new()?;
    let ovmf_paths = OvmfPaths::find(opt, arch)?;

    // Make a copy of the OVMF vars file so it can be mapped read+write
    // without modifying the original.
    let ovmf_vars = tmp_dir.path().join("ovmf_vars");
    fs_err::copy(&ovmf_paths.vars, &ovmf_vars)?;
    // Necessary on NixOS and friends, where the source file is read-only.
    #[cfg(target_os = "linux")]
    fs_err::set_permissions(&ovmf_vars, Permissions::from_mode(0o666))?;

    add_pflash_args(&mut cmd, &ovmf_paths.code, PflashMode::ReadOnly);
    add_pflash_args(&mut cmd, &ovmf_vars, PflashMode::ReadWrite);

    cmd.args(netboot_args(artifact)?);

    println!("{}", command_to_string(&cmd));

    // The session is interactive and blocks until the operator quits QEMU.
    let mut child = ChildWrapper(cmd.spawn().context("failed to launch qemu")?);
    let status = child.0.wait()?;

    if !status.success() {
        bail!("qemu exited with {}", status);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netboot_args() {
        let artifact = Path::new("target/x86_64-unknown-uefi/debug/gem.efi");
        let args = netboot_args(artifact).unwrap();

        assert_eq!(args[0], "-netdev");
        assert_eq!(
            args[1],
            "user,id=net0,tftp=target/x86_64-unknown-uefi/debug,bootfile=gem.efi"
        );
        assert_eq!(args[3], "virtio-net-pci,netdev=net0");
    }

    #[test]
    fn test_tftp_tree_resolves_to_artifact() {
        // The path the guest firmware fetches must be the build output.
        let artifact = Path::new("target/x86_64-unknown-uefi/debug/gem.efi");
        let root = artifact.parent().unwrap();
        let boot_file = artifact.file_name().unwrap();
        assert_eq!(root.join(boot_file), artifact);
    }

    #[test]
    fn test_bad_artifact_path_rejected() {
        assert!(netboot_args(Path::new("/")).is_err());
    }
}
