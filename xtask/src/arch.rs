// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::{anyhow, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Target architectures gem can be built for. The kernel's port I/O and
/// exception plumbing are x86_64 only, so the list is currently short.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UefiArch {
    #[default]
    X86_64,
}

impl UefiArch {
    fn all() -> &'static [Self] {
        &[Self::X86_64]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
        }
    }

    pub fn as_triple(self) -> String {
        format!("{}-unknown-uefi", self.as_str())
    }
}

impl fmt::Display for UefiArch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UefiArch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .find(|arch| arch.as_str() == s)
            .copied()
            .ok_or_else(|| anyhow!("invalid arch: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(UefiArch::from_str("x86_64").unwrap(), UefiArch::X86_64);
        assert!(UefiArch::from_str("riscv64").is_err());
    }

    #[test]
    fn test_triple() {
        assert_eq!(UefiArch::X86_64.as_triple(), "x86_64-unknown-uefi");
    }
}
