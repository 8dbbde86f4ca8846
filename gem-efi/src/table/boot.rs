// SPDX-License-Identifier: MIT OR Apache-2.0

//! UEFI services available during boot.

use crate::table::Header;
use crate::{Handle, PhysicalAddress, Status, VirtualAddress};
use bitflags::bitflags;

/// Table of pointers to all the boot services.
///
/// Only the services gem calls carry a function signature; every other slot
/// is a pointer-sized placeholder that keeps the table layout intact.
#[repr(C)]
pub struct BootServices {
    pub header: Header,

    // Task priority services
    pub raise_tpl: usize,
    pub restore_tpl: usize,

    // Memory services
    pub allocate_pages: usize,
    pub free_pages: usize,
    /// Returns the current boot-services memory map and its key.
    ///
    /// On [`Status::BUFFER_TOO_SMALL`] the required byte count is left in
    /// `size`; callers grow their buffer and retry.
    pub get_memory_map: unsafe extern "efiapi" fn(
        size: *mut usize,
        map: *mut MemoryDescriptor,
        key: *mut usize,
        desc_size: *mut usize,
        desc_version: *mut u32,
    ) -> Status,
    pub allocate_pool: usize,
    pub free_pool: usize,

    // Event & timer services
    pub create_event: usize,
    pub set_timer: usize,
    pub wait_for_event: usize,
    pub signal_event: usize,
    pub close_event: usize,
    pub check_event: usize,

    // Protocol handler services
    pub install_protocol_interface: usize,
    pub reinstall_protocol_interface: usize,
    pub uninstall_protocol_interface: usize,
    pub handle_protocol: usize,
    pub reserved: usize,
    pub register_protocol_notify: usize,
    pub locate_handle: usize,
    pub locate_device_path: usize,
    pub install_configuration_table: usize,

    // Image services
    pub load_image: usize,
    pub start_image: usize,
    pub exit: usize,
    pub unload_image: usize,
    /// Terminates boot services. The map key must come from the most recent
    /// [`Self::get_memory_map`] call, otherwise the firmware refuses.
    pub exit_boot_services:
        unsafe extern "efiapi" fn(image_handle: Handle, map_key: usize) -> Status,

    // Misc services
    pub get_next_monotonic_count: usize,
    /// Busy-waits for at least `microseconds`.
    pub stall: unsafe extern "efiapi" fn(microseconds: usize) -> Status,
    pub set_watchdog_timer: usize,
}

/// A structure describing a region of memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
pub struct MemoryDescriptor {
    /// Type of memory occupying this range.
    pub ty: MemoryType,
    /// Starting physical address, 4 KiB aligned.
    pub phys_start: PhysicalAddress,
    /// Starting virtual address, 4 KiB aligned.
    pub virt_start: VirtualAddress,
    /// Number of 4 KiB pages contained in this range.
    pub page_count: u64,
    /// The capability attributes of this memory range.
    pub att: MemoryAttribute,
}

impl MemoryDescriptor {
    /// Memory descriptor version number.
    pub const VERSION: u32 = 1;

    /// Size of this range in bytes.
    #[must_use]
    pub const fn byte_count(&self) -> u64 {
        self.page_count * 4096
    }
}

newtype_enum! {
/// The type of a memory range.
///
/// Firmwares and OS loaders may introduce custom types in the range
/// `0x7000_0000..=0xffff_ffff`, so the known set is not exhaustive and this
/// C enum must not be modeled as a Rust enum.
#[derive(PartialOrd, Ord, Hash)]
pub enum MemoryType: u32 => {
    /// This enum variant is not used.
    RESERVED                = 0,
    /// The code portions of a loaded UEFI application.
    LOADER_CODE             = 1,
    /// The data portions of a loaded UEFI application,
    /// as well as any memory allocated by it.
    LOADER_DATA             = 2,
    /// Code of the boot drivers. Can be reclaimed after boot services end.
    BOOT_SERVICES_CODE      = 3,
    /// Boot drivers' data. Can be reclaimed after boot services end.
    BOOT_SERVICES_DATA      = 4,
    /// Runtime drivers' code.
    RUNTIME_SERVICES_CODE   = 5,
    /// Runtime drivers' data.
    RUNTIME_SERVICES_DATA   = 6,
    /// Free usable memory.
    CONVENTIONAL            = 7,
    /// Memory in which errors have been detected.
    UNUSABLE                = 8,
    /// Memory that holds ACPI tables. Can be reclaimed after they are parsed.
    ACPI_RECLAIM            = 9,
    /// Firmware-reserved addresses.
    ACPI_NON_VOLATILE       = 10,
    /// A region used for memory-mapped I/O.
    MMIO                    = 11,
    /// Address space used for memory-mapped port I/O.
    MMIO_PORT_SPACE         = 12,
    /// Address space which is part of the processor.
    PAL_CODE                = 13,
    /// Memory region which is usable and is also non-volatile.
    PERSISTENT_MEMORY       = 14,
}}

impl MemoryType {
    /// Whether a range of this type is free for the kernel to claim once
    /// boot services have been exited.
    #[must_use]
    pub fn is_usable_after_exit_boot_services(self) -> bool {
        matches!(
            self,
            Self::BOOT_SERVICES_CODE
                | Self::BOOT_SERVICES_DATA
                | Self::CONVENTIONAL
                | Self::PERSISTENT_MEMORY
        )
    }
}

bitflags! {
    /// Flags describing the capabilities of a memory range.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct MemoryAttribute: u64 {
        /// Supports marking as uncacheable.
        const UNCACHEABLE = 0x1;
        /// Supports write-combining.
        const WRITE_COMBINE = 0x2;
        /// Supports write-through.
        const WRITE_THROUGH = 0x4;
        /// Supports write-back.
        const WRITE_BACK = 0x8;
        /// Supports write-protection.
        const WRITE_PROTECT = 0x1000;
        /// Supports read-protection.
        const READ_PROTECT = 0x2000;
        /// Supports disabling code execution.
        const EXECUTE_PROTECT = 0x4000;
        /// Persistent memory.
        const NON_VOLATILE = 0x8000;
        /// This memory region is more reliable than other memory.
        const MORE_RELIABLE = 0x10000;
        /// This memory range can be set as read-only.
        const READ_ONLY = 0x20000;
        /// This memory must be mapped by the OS when a runtime service is
        /// called.
        const RUNTIME = 0x8000_0000_0000_0000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_descriptor_abi() {
        // u32 type + padding, then four u64 fields.
        assert_eq!(core::mem::size_of::<MemoryDescriptor>(), 40);
    }

    #[test]
    fn test_memory_type_reclaim() {
        assert!(MemoryType::CONVENTIONAL.is_usable_after_exit_boot_services());
        assert!(MemoryType::BOOT_SERVICES_CODE.is_usable_after_exit_boot_services());
        assert!(MemoryType::BOOT_SERVICES_DATA.is_usable_after_exit_boot_services());
        assert!(MemoryType::PERSISTENT_MEMORY.is_usable_after_exit_boot_services());

        assert!(!MemoryType::RESERVED.is_usable_after_exit_boot_services());
        assert!(!MemoryType::LOADER_CODE.is_usable_after_exit_boot_services());
        assert!(!MemoryType::RUNTIME_SERVICES_DATA.is_usable_after_exit_boot_services());
        assert!(!MemoryType::MMIO.is_usable_after_exit_boot_services());
        // Unknown firmware-specific types are never reclaimed.
        assert!(!MemoryType(0x7000_0042).is_usable_after_exit_boot_services());
    }

    #[test]
    fn test_byte_count() {
        let desc = MemoryDescriptor {
            ty: MemoryType::CONVENTIONAL,
            phys_start: 0x10_0000,
            virt_start: 0,
            page_count: 16,
            att: MemoryAttribute::WRITE_BACK,
        };
        assert_eq!(desc.byte_count(), 64 * 1024);
    }
}
