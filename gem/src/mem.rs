// SPDX-License-Identifier: MIT OR Apache-2.0

//! Firmware memory map retrieval and reporting.

use gem_efi::table::boot::MemoryDescriptor;
use gem_efi::table::system;
use gem_efi::Status;

/// Fixed map buffer. The map is fetched before any allocator exists, so it
/// lives on the stack; OVMF maps comfortably fit.
const MAP_BUF_LEN: usize = 8 * 1024;

/// Fetch the boot-services memory map and log one line per descriptor.
///
/// Returns the number of bytes that would become usable once boot services
/// are exited (conventional plus reclaimable boot-services memory).
pub fn report_memory_map() -> Result<u64, Status> {
    let st = system::get();
    if st.is_null() {
        return Err(Status::NOT_READY);
    }
    let bs = unsafe { (*st).boot_services };
    if bs.is_null() {
        return Err(Status::NOT_READY);
    }

    let mut buf = [0u8; MAP_BUF_LEN];
    let mut size = buf.len();
    let mut key = 0usize;
    let mut desc_size = 0usize;
    let mut desc_version = 0u32;

    let status = unsafe {
        ((*bs).get_memory_map)(
            &mut size,
            buf.as_mut_ptr().cast::<MemoryDescriptor>(),
            &mut key,
            &mut desc_size,
            &mut desc_version,
        )
    };
    if !status.is_success() {
        return Err(status);
    }
    if desc_size < core::mem::size_of::<MemoryDescriptor>() {
        return Err(Status::INCOMPATIBLE_VERSION);
    }

    let mut usable = 0u64;
    for off in (0..size).step_by(desc_size) {
        // Entries are `desc_size` apart, which newer firmware may set
        // larger than the descriptor struct; read each one unaligned
        // straight out of the byte buffer.
        let desc = unsafe {
            buf.as_ptr()
                .add(off)
                .cast::<MemoryDescriptor>()
                .read_unaligned()
        };

        if desc.ty.is_usable_after_exit_boot_services() {
            usable += desc.byte_count();
        }

        log::debug!(
            "{:016x} {:016x} {:?}",
            desc.phys_start,
            desc.byte_count(),
            desc.ty
        );
    }

    Ok(usable)
}
