// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw interface for working with UEFI from the gem kernel.
//!
//! The types in this crate mirror the ABI of the UEFI specification: tables
//! and protocols are `#[repr(C)]` structs of function pointers, C enums are
//! integer newtypes, and nothing here calls into the firmware on its own.
//! The one convenience on top of the bindings is [`console`], which writes
//! UTF-8 text through the system table's console-out protocol.
//!
//! Function pointers are only typed for the services gem actually calls;
//! the remaining slots are kept as pointer-sized placeholders so the table
//! layouts still match the specification.

#![no_std]

#[macro_use]
mod enums;

pub mod console;
pub mod proto;
pub mod table;

mod status;

pub use status::Status;
pub use uguid::{guid, Guid};

use core::ffi::c_void;

/// Handle to an event structure.
pub type Event = *mut c_void;

/// Handle to a UEFI entity (protocol, image, etc).
pub type Handle = *mut c_void;

/// Two-byte character, encoded as UCS-2.
///
/// UCS-2 is UTF-16 without surrogate pairs; every character is exactly one
/// 16-bit unit, which is why console output can be chunked freely.
pub type Char16 = u16;

/// Physical memory address. Always 64 bits wide, regardless of target.
pub type PhysicalAddress = u64;

/// Virtual memory address. Always 64 bits wide, regardless of target.
pub type VirtualAddress = u64;
