// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kernel logging.
//!
//! A single `log::Log` implementation mirrors every record to the firmware
//! console and to all serial ports found in the BIOS data area, so output
//! survives both in the QEMU window and on the `-nographic` terminal.

use core::fmt::Write;
use gem_efi::console;
use gem_serial::{SerialPort, BDA_COM_PORTS};
use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

static SERIAL: Mutex<Option<SerialPort>> = Mutex::new(None);

struct KernelLogger;

static LOGGER: KernelLogger = KernelLogger;

impl Log for KernelLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let _ = writeln!(console::Writer, "[{:>5}] {}", record.level(), record.args());
        if let Some(serial) = SERIAL.lock().as_mut() {
            let _ = writeln!(serial, "[{:>5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        // Neither sink buffers.
    }
}

/// Probe the serial ports and install the global logger.
pub fn init() {
    let serial = unsafe { SerialPort::probe(BDA_COM_PORTS as *const u16) };
    *SERIAL.lock() = Some(serial);

    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace));
}
