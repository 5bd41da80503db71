//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and memory contents, optionally
//! with a hook that fails on the Nth access, then executes a few
//! instructions. A step either succeeds or fails with registers and cycles
//! untouched.

#![no_main]

use arbitrary::Arbitrary;
use beeb6502::{Access, AddressSpace, Hook, HookError, HookResult, Registers, Trigger, CPU};
use libfuzzer_sys::fuzz_target;
use std::cell::Cell;
use std::rc::Rc;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Packed status byte
    status: u8,
    irq_line: bool,
    nmi: bool,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    code: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Small region of memory for absolute addressing
    main_memory: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    /// Fail the Nth hooked read (none if `None`)
    fail_read_at: Option<u8>,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = AddressSpace::new();

    // Reset vector to 0x8000, IRQ/BRK to 0x9000, NMI to 0xA000
    memory.load(0xFFFA, &[0x00, 0xA0, 0x00, 0x80, 0x00, 0x90]).unwrap();
    memory.load(0x8000, &input.memory.code).unwrap();
    memory.load(0x0000, &input.memory.zero_page).unwrap();
    memory.load(0x0100, &input.memory.stack_page).unwrap();
    memory.load(0x4000, &input.memory.main_memory).unwrap();

    if let Some(limit) = input.fail_read_at {
        let count = Rc::new(Cell::new(0u8));
        memory.register_hook(
            Trigger::Any,
            Hook::pre_read(move |_: &mut AddressSpace, _: &Access| -> HookResult<Option<u8>> {
                count.set(count.get().wrapping_add(1));
                if count.get() == limit {
                    Err(HookError::msg("injected failure"))
                } else {
                    Ok(None)
                }
            }),
        );
    }

    let mut cpu = CPU::new(memory);
    let state = &input.cpu_state;
    cpu.apply_snapshot(Registers {
        a: state.a,
        x: state.x,
        y: state.y,
        sp: state.sp,
        pc: 0x8000,
        ..Registers::default()
    });
    cpu.set_status(state.status);
    cpu.set_irq_line(state.irq_line);
    if state.nmi {
        cpu.trigger_nmi();
    }

    for _ in 0..(input.steps % 8) {
        let before = cpu.register_snapshot();
        let cycles = cpu.cycles();
        match cpu.step() {
            Ok(consumed) => {
                assert_eq!(cpu.cycles(), cycles + consumed);
                assert!(consumed <= 7 + 7);
            }
            Err(_) => {
                assert_eq!(cpu.register_snapshot(), before);
                assert_eq!(cpu.cycles(), cycles);
                break;
            }
        }
    }
});
