// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text output through the firmware console.
//!
//! UEFI consoles speak null-terminated UCS-2, so output is converted from
//! UTF-8 in fixed-size chunks on the stack. Everything here is best effort:
//! before the system table is registered, or on characters the console
//! cannot represent, output is silently dropped rather than failed.

use crate::proto::console::SimpleTextOutputProtocol;
use crate::table::system;
use crate::Char16;
use core::fmt;

const BUF_LEN: usize = 128;

/// Write a string to the firmware's console-out device.
pub fn output_string(string: &str) {
    let st = system::get();
    if st.is_null() {
        return;
    }
    let out = unsafe { (*st).stdout };
    if out.is_null() {
        return;
    }

    fn flush(out: *mut SimpleTextOutputProtocol, buf: &mut [Char16; BUF_LEN], used: &mut usize) {
        if *used == 0 {
            return;
        }
        buf[*used] = 0;
        let _ = unsafe { ((*out).output_string)(out, buf.as_ptr()) };
        *used = 0;
    }

    let mut buf = [0 as Char16; BUF_LEN];
    let mut used = 0;

    let _ = ucs2::encode_with(string, |ch| {
        // Keep room for an injected CR, the character, and the terminator.
        if used + 3 > BUF_LEN {
            flush(out, &mut buf, &mut used);
        }
        if ch == Char16::from(b'\n') {
            buf[used] = Char16::from(b'\r');
            used += 1;
        }
        buf[used] = ch;
        used += 1;
        Ok(())
    });

    flush(out, &mut buf, &mut used);
}

/// `core::fmt::Write` adapter over [`output_string`].
pub struct Writer;

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        output_string(s);
        Ok(())
    }
}
