//! # Control Flow Instructions
//!
//! - JMP: absolute, and indirect with the NMOS page-wrap quirk
//! - JSR/RTS: subroutine call and return through the page 1 stack
//! - RTI: return from interrupt
//! - BRK: software interrupt through the IRQ vector
//!
//! JSR pushes the address of its own last byte (return address minus one),
//! high byte first; RTS pulls it and adds one.

use super::Decoded;
use crate::cpu::{CPU, IRQ_VECTOR};
use crate::error::HookFault;
use crate::registers::Status;

/// Executes the JMP (Jump) instruction. No flags are affected.
pub(crate) fn execute_jmp(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let (target, _) = cpu.effective_address(op)?;
    cpu.regs.pc = target;
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
pub(crate) fn execute_jsr(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let return_address = cpu.regs.pc.wrapping_sub(1);
    cpu.push_word(return_address)?;
    cpu.regs.pc = op.operand;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts(cpu: &mut CPU) -> Result<(), HookFault> {
    let return_address = cpu.pull_word()?;
    cpu.regs.pc = return_address.wrapping_add(1);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (bit 5 ignored) and then PC. Unlike RTS the
/// pulled PC is used as is.
pub(crate) fn execute_rti(cpu: &mut CPU) -> Result<(), HookFault> {
    let status = cpu.pull_byte()?;
    cpu.regs.set_status_byte(status);
    cpu.regs.pc = cpu.pull_word()?;
    Ok(())
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is a two-byte instruction as far as the return address goes: it
/// pushes the address of the byte after its padding byte, then the status
/// with B and bit 5 set, sets I and jumps through the IRQ vector at
/// $FFFE/$FFFF. Takes 7 cycles.
pub(crate) fn execute_brk(cpu: &mut CPU) -> Result<(), HookFault> {
    let return_address = cpu.regs.pc.wrapping_add(1);
    cpu.push_word(return_address)?;
    let status = cpu.regs.status_byte() | Status::BREAK.bits();
    cpu.push_byte(status)?;
    cpu.regs.set_interrupt_disable(true);
    cpu.regs.pc = cpu.read_word(IRQ_VECTOR)?;
    Ok(())
}
