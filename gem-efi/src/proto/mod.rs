// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol definitions.

pub mod console;
