// SPDX-License-Identifier: MIT OR Apache-2.0

//! The EFI system table, and the kernel-wide pointer to it.

use crate::proto::console::{SimpleTextInputProtocol, SimpleTextOutputProtocol};
use crate::table::boot::BootServices;
use crate::table::configuration::ConfigurationTable;
use crate::table::Header;
use crate::{Char16, Handle};
use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

/// Contains pointers to the runtime and boot services tables.
#[repr(C)]
pub struct SystemTable {
    pub header: Header,

    /// Null-terminated string identifying the firmware vendor.
    pub firmware_vendor: *const Char16,
    pub firmware_revision: u32,

    pub stdin_handle: Handle,
    pub stdin: *mut SimpleTextInputProtocol,

    pub stdout_handle: Handle,
    pub stdout: *mut SimpleTextOutputProtocol,

    pub stderr_handle: Handle,
    pub stderr: *mut SimpleTextOutputProtocol,

    /// Runtime services are not used by gem; opaque placeholder.
    pub runtime_services: usize,
    pub boot_services: *mut BootServices,

    pub number_of_configuration_table_entries: usize,
    pub configuration_table: *mut ConfigurationTable,
}

impl SystemTable {
    pub const SIGNATURE: u64 = 0x5453_5953_2049_4249;
}

/// The system table pointer handed to `efi_main`, saved at entry so that
/// console output and boot services are reachable from anywhere in the
/// kernel (the panic handler in particular).
static SYSTEM_TABLE: AtomicPtr<SystemTable> = AtomicPtr::new(ptr::null_mut());

/// Register the system table pointer.
///
/// Only the first non-null registration is kept; later calls are ignored.
///
/// # Safety
///
/// `table` must point to a valid EFI system table, and it must remain valid
/// for as long as anything in the kernel may produce console output.
pub unsafe fn register(table: *mut SystemTable) {
    let _ = SYSTEM_TABLE.compare_exchange(
        ptr::null_mut(),
        table,
        Ordering::SeqCst,
        Ordering::SeqCst,
    );
}

/// The registered system table, or null before [`register`] has run.
#[must_use]
pub fn get() -> *mut SystemTable {
    SYSTEM_TABLE.load(Ordering::SeqCst)
}
