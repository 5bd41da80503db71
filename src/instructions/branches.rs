//! # Branch Instructions
//!
//! This module implements the eight conditional branches (BCC, BCS, BEQ,
//! BNE, BMI, BPL, BVC, BVS).
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! from the address of the following instruction. Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use super::Decoded;
use crate::cpu::CPU;
use crate::error::HookFault;
use crate::opcodes::Operation;
use crate::registers::Registers;

/// Whether the branch `operation` is taken with the given flags.
pub(crate) fn condition(operation: Operation, regs: &Registers) -> bool {
    match operation {
        Operation::Bcc => !regs.carry(),
        Operation::Bcs => regs.carry(),
        Operation::Bne => !regs.zero(),
        Operation::Beq => regs.zero(),
        Operation::Bpl => !regs.negative(),
        Operation::Bmi => regs.negative(),
        Operation::Bvc => !regs.overflow(),
        Operation::Bvs => regs.overflow(),
        _ => false,
    }
}

/// Executes a conditional branch.
///
/// PC already points past the branch; when taken it moves by the signed
/// offset, costing one extra cycle plus one more if the target lies in a
/// different page from the following instruction.
pub(crate) fn execute_branch(cpu: &mut CPU, op: &Decoded, taken: bool) -> Result<(), HookFault> {
    if taken {
        let (target, crossed) = cpu.effective_address(op)?;
        cpu.cycles += if crossed { 2 } else { 1 };
        cpu.regs.pc = target;
    }
    Ok(())
}
