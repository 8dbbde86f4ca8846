// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interrupt descriptor table and CPU exception reporting.
//!
//! Every vector starts out pointing at a reporting default handler so no
//! exception escapes into a silent triple fault; breakpoint, double fault,
//! general protection and page fault get dedicated handlers.

use core::arch::asm;
use spin::Once;

/// IDT entry (16 bytes on x86_64).
#[repr(C, packed)]
#[derive(Clone, Copy)]
struct IdtEntry {
    offset_low: u16,
    selector: u16,
    ist: u8,
    type_attr: u8,
    offset_mid: u16,
    offset_high: u32,
    _reserved: u32,
}

impl IdtEntry {
    const fn missing() -> Self {
        Self {
            offset_low: 0,
            selector: 0,
            ist: 0,
            type_attr: 0, // not present
            offset_mid: 0,
            offset_high: 0,
            _reserved: 0,
        }
    }

    fn new(handler: u64, type_attr: u8) -> Self {
        Self {
            offset_low: handler as u16,
            selector: current_cs(),
            ist: 0,
            type_attr,
            offset_mid: (handler >> 16) as u16,
            offset_high: (handler >> 32) as u32,
            _reserved: 0,
        }
    }

    /// Present interrupt gate, DPL=0.
    fn interrupt_gate(handler: u64) -> Self {
        Self::new(handler, 0x8E)
    }

    /// Present trap gate, DPL=0; interrupts stay enabled in the handler.
    fn trap_gate(handler: u64) -> Self {
        Self::new(handler, 0x8F)
    }
}

/// The IDT, all 256 vectors.
#[repr(C, align(16))]
struct Idt {
    entries: [IdtEntry; 256],
}

#[repr(C, packed)]
struct IdtPointer {
    limit: u16,
    base: u64,
}

impl Idt {
    /// Activate this IDT via `lidt`.
    fn load(&'static self) {
        let ptr = IdtPointer {
            limit: (core::mem::size_of::<Self>() - 1) as u16,
            base: self as *const _ as u64,
        };

        unsafe {
            asm!("lidt [{}]", in(reg) &ptr, options(nostack));
        }
    }
}

static IDT: Once<Idt> = Once::new();

/// The code segment selector the firmware entered us with. Exception gates
/// must target the same segment; UEFI does not guarantee any fixed value.
fn current_cs() -> u16 {
    let cs: u16;
    unsafe {
        asm!("mov {0:x}, cs", out(reg) cs, options(nostack, nomem, preserves_flags));
    }
    cs
}

/// Build the IDT and load it.
pub fn init() {
    IDT.call_once(|| {
        let mut idt = Idt {
            entries: [IdtEntry::missing(); 256],
        };

        for entry in idt.entries.iter_mut() {
            *entry = IdtEntry::interrupt_gate(isr_default as *const () as u64);
        }

        idt.entries[3] = IdtEntry::trap_gate(isr_breakpoint as *const () as u64);
        idt.entries[8] = IdtEntry::interrupt_gate(isr_double_fault as *const () as u64);
        idt.entries[13] = IdtEntry::interrupt_gate(isr_general_protection as *const () as u64);
        idt.entries[14] = IdtEntry::interrupt_gate(isr_page_fault as *const () as u64);

        idt
    })
    .load();
}

/// Interrupt stack frame pushed by the CPU before the handler runs.
#[repr(C)]
struct InterruptFrame {
    rip: u64,
    cs: u64,
    rflags: u64,
    rsp: u64,
    ss: u64,
}

extern "x86-interrupt" fn isr_default(frame: InterruptFrame) {
    report("unhandled interrupt", &frame, None);
}

extern "x86-interrupt" fn isr_breakpoint(frame: InterruptFrame) {
    // Not fatal; report and resume.
    log::warn!("breakpoint at {:#x}", frame.rip);
}

extern "x86-interrupt" fn isr_double_fault(frame: InterruptFrame, error_code: u64) {
    report("double fault", &frame, Some(error_code));
}

extern "x86-interrupt" fn isr_general_protection(frame: InterruptFrame, error_code: u64) {
    report("general protection fault", &frame, Some(error_code));
}

extern "x86-interrupt" fn isr_page_fault(frame: InterruptFrame, error_code: u64) {
    let cr2: u64;
    unsafe {
        asm!("mov {}, cr2", out(reg) cr2, options(nostack, nomem));
    }
    log::error!("page fault addressing {:#x}", cr2);
    report("page fault", &frame, Some(error_code));
}

/// Log the exception state and halt; none of these are recoverable here.
fn report(name: &str, frame: &InterruptFrame, error_code: Option<u64>) -> ! {
    log::error!("CPU exception: {}", name);
    if let Some(code) = error_code {
        log::error!("  error code: {:#x}", code);
    }
    log::error!(
        "  rip={:#x} cs={:#x} rflags={:#x} rsp={:#x}",
        frame.rip,
        frame.cs,
        frame.rflags,
        frame.rsp
    );

    loop {
        gem_cpu::hlt();
    }
}
