//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register from memory, updating Z and N. Indexed
//!   loads pay the page-crossing cycle.
//! - STA, STX, STY: store a register to memory. Stores never pay the
//!   page-crossing cycle (their table cost already includes it) and affect
//!   no flags.

use super::Decoded;
use crate::cpu::CPU;
use crate::error::HookFault;

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    cpu.regs.a = value;
    cpu.regs.set_zn(value);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    cpu.regs.x = value;
    cpu.regs.set_zn(value);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    cpu.regs.y = value;
    cpu.regs.set_zn(value);
    Ok(())
}

fn store(cpu: &mut CPU, op: &Decoded, value: u8) -> Result<(), HookFault> {
    let (addr, _) = cpu.effective_address(op)?;
    cpu.write(addr, value)
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.regs.a;
    store(cpu, op, value)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.regs.x;
    store(cpu, op, value)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.regs.y;
    store(cpu, op, value)
}
