//! # beeb6502
//!
//! An NMOS 6502 CPU core over a hooked 64KB address space, built for running
//! BBC Micro language and utility ROMs with their operating system calls
//! answered by host code.
//!
//! The CPU owns an [`AddressSpace`]. Every bus access the CPU makes goes
//! through the address space's hook layer, so the host can overlay ROM
//! images, intercept memory-mapped registers or take over execution at an
//! entry point such as OSWRCH (`$FFEE`) without touching the CPU.
//!
//! ## Quick Start
//!
//! ```rust
//! use beeb6502::{AddressSpace, CPU};
//!
//! let mut memory = AddressSpace::new();
//!
//! // Reset vector -> $8000, then LDA #$42 / STA $0200
//! memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
//! memory.load(0x8000, &[0xA9, 0x42, 0x8D, 0x00, 0x02]).unwrap();
//!
//! let mut cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//! assert!(cpu.flag_i());
//!
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//! assert_eq!(cpu.memory().peek(0x0200), 0x42);
//! assert_eq!(cpu.cycles(), 6);
//! ```
//!
//! ## Hooks
//!
//! ```rust
//! use beeb6502::{AddressSpace, ExecuteAction, ExecuteContext, Hook, Trigger, CPU};
//!
//! let mut memory = AddressSpace::new();
//! memory.load(0xFFFC, &[0x00, 0x20]).unwrap();
//! memory.load(0x2000, &[0xA9, 0x41, 0x20, 0xEE, 0xFF]).unwrap(); // LDA #'A' / JSR OSWRCH
//!
//! let output = std::rc::Rc::new(std::cell::RefCell::new(String::new()));
//! let sink = output.clone();
//! memory.register_hook(
//!     Trigger::Address(0xFFEE),
//!     Hook::pre_execute(move |mem: &mut AddressSpace, ctx: &mut ExecuteContext| {
//!         sink.borrow_mut().push(ctx.registers.a as char);
//!         // Emulate RTS: pull the return address pushed by JSR
//!         let sp = ctx.registers.sp;
//!         let lo = mem.peek(0x0100 | sp.wrapping_add(1) as u16);
//!         let hi = mem.peek(0x0100 | sp.wrapping_add(2) as u16);
//!         ctx.registers.sp = sp.wrapping_add(2);
//!         ctx.registers.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
//!         Ok(ExecuteAction::Continue)
//!     }),
//! );
//!
//! let mut cpu = CPU::new(memory);
//! cpu.run_until(0x2005, Some(10)).unwrap();
//! assert_eq!(output.borrow().as_str(), "A");
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, instruction execution and run control
//! - `memory` - the 64KB [`AddressSpace`] and hook dispatch
//! - `hooks` - hook traits, triggers and the registry
//! - `devices` - ROM images and other devices mapped through hooks
//! - `opcodes` - opcode metadata table
//! - `addressing` - addressing mode enumerations
//! - `disassembler` - machine code to assembly text
//! - `trace` - instruction trace hook
//! - `error` - error types

pub mod addressing;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod error;
pub mod hooks;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod trace;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{
    CallArgs, CpuOptions, RunOutcome, StopHandle, StopReason, CPU, INTERRUPT_CYCLES, IRQ_VECTOR,
    NMI_VECTOR, RESET_VECTOR, RETURN_SENTINEL,
};
pub use devices::{Device, DeviceHandles, RomDevice};
pub use disassembler::{
    disassemble, disassemble_line, disassemble_memory, disassemble_one, effective_address,
    format_instruction, format_instruction_with, format_line, DisassemblyOptions, HexNotation,
    Instruction,
};
pub use error::{AddressError, ExecutionFault, HookError, HookFault, IllegalOpcode, MemoryError};
pub use hooks::{
    Access, ExecuteAction, ExecuteContext, ExecuteHook, Hook, HookHandle, HookKind, HookRegistry,
    HookResult, ReadHook, Trigger, WriteHook,
};
pub use memory::{AddressSpace, ADDRESS_SPACE_SIZE};
pub use opcodes::{find_opcode, lookup, OpcodeMetadata, Operation, OPCODE_TABLE};
pub use registers::{Register, Registers, Status};
pub use trace::TraceHook;
