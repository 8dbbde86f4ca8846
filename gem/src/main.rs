// SPDX-License-Identifier: MIT OR Apache-2.0

//! The gem kernel entry point.
//!
//! The firmware fetches `gem.efi` over TFTP and calls `efi_main` with boot
//! services still active. Boot proceeds in stages: save the system table,
//! bring up logging (console + serial), install the IDT, then retrieve and
//! report the firmware memory map. Boot services are left running and
//! control returns to the firmware when there is nothing left to do.

#![no_std]
#![no_main]
#![feature(abi_x86_interrupt)]

mod idt;
mod logger;
mod mem;

use core::panic::PanicInfo;
use gem_efi::table::system::{self, SystemTable};
use gem_efi::{Handle, Status};

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("{}", info);
    loop {
        gem_cpu::hlt();
    }
}

#[no_mangle]
extern "efiapi" fn efi_main(_image: Handle, system_table: *mut SystemTable) -> Status {
    // Must happen before any output: the console writer and the memory map
    // both go through the registered table.
    unsafe { system::register(system_table) };

    logger::init();
    log::info!("gem {} starting", env!("CARGO_PKG_VERSION"));

    idt::init();
    log::info!("IDT loaded, exception reporting active");

    match mem::report_memory_map() {
        Ok(usable) => {
            log::info!("{} KiB reclaimable once boot services exit", usable / 1024);
        }
        Err(status) => log::error!("failed to get the memory map: {}", status),
    }

    log::info!("done, returning to firmware");
    Status::SUCCESS
}
