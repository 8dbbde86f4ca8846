// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serial console driver.
//!
//! The BIOS data area holds the I/O addresses of up to four COM ports;
//! every port the BIOS reported is initialized to 115200 8N1. Output is
//! broadcast to all present ports, input is taken from whichever port has a
//! byte ready first.

#![no_std]

use core::fmt;
use gem_cpu::{inb, outb};

/// Physical address of the BIOS data area's COM port table.
pub const BDA_COM_PORTS: usize = 0x400;

/// Driver over the COM ports the BIOS reported.
pub struct SerialPort {
    /// I/O base address of each present COM port.
    devices: [Option<u16>; 4],
}

impl SerialPort {
    /// Probe the BIOS data area for COM ports and bring every present port
    /// into a known state.
    ///
    /// # Safety
    ///
    /// `bda_base` must point to the identity-mapped BIOS data area COM
    /// table ([`BDA_COM_PORTS`] under UEFI), and the UARTs it names must
    /// not be driven by anything else.
    pub unsafe fn probe(bda_base: *const u16) -> Self {
        let mut ret = Self {
            devices: [None; 4],
        };

        for (com_id, device) in ret.devices.iter_mut().enumerate() {
            let port = *bda_base.add(com_id);

            // A zero entry means the BIOS found no UART there.
            if port == 0 {
                continue;
            }

            outb(port + 1, 0x00); // Disable all interrupts
            outb(port + 3, 0x80); // Enable DLAB (set baud rate divisor)
            outb(port, 0x01); // 115200 baud (divisor 1, low byte)
            outb(port + 1, 0x00); // (divisor 1, high byte)
            outb(port + 3, 0x03); // 8 bits, no parity, one stop bit
            outb(port + 4, 0x03); // RTS/DSR set

            *device = Some(port);
        }

        // Drain stale inbound bytes left over from the firmware.
        while ret.read_byte().is_some() {}

        ret
    }

    /// Read a byte from whichever COM port has one available.
    pub fn read_byte(&mut self) -> Option<u8> {
        for port in self.devices.iter().flatten() {
            unsafe {
                // LSR bit 0: data ready.
                if inb(port + 5) & 1 == 0 {
                    continue;
                }
                return Some(inb(*port));
            }
        }

        None
    }

    /// Write a byte to one COM port, translating LF to CRLF.
    fn write_byte(&mut self, device: usize, byte: u8) {
        if byte == b'\n' {
            self.write_byte(device, b'\r');
        }

        if let Some(&Some(port)) = self.devices.get(device) {
            unsafe {
                // LSR bit 5: transmit holding register empty.
                while inb(port + 5) & 0x20 == 0 {
                    core::hint::spin_loop();
                }
                outb(port, byte);
            }
        }
    }

    /// Broadcast bytes to every present COM port.
    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            for com_id in 0..self.devices.len() {
                self.write_byte(com_id, byte);
            }
        }
    }
}

impl fmt::Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}
