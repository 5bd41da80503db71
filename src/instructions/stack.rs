//! # Stack Instructions
//!
//! PHA/PLA and PHP/PLP. The stack lives at $0100-$01FF and grows downward;
//! SP wraps within page 1.
//!
//! PHP always pushes the status with B and bit 5 set. PLP restores every
//! flag from the pulled byte except bit 5, which is not stored.

use crate::cpu::CPU;
use crate::error::HookFault;
use crate::registers::Status;

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.push_byte(cpu.regs.a)
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php(cpu: &mut CPU) -> Result<(), HookFault> {
    let status = cpu.regs.status_byte() | Status::BREAK.bits();
    cpu.push_byte(status)
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn execute_pla(cpu: &mut CPU) -> Result<(), HookFault> {
    let value = cpu.pull_byte()?;
    cpu.regs.a = value;
    cpu.regs.set_zn(value);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp(cpu: &mut CPU) -> Result<(), HookFault> {
    let status = cpu.pull_byte()?;
    cpu.regs.set_status_byte(status);
    Ok(())
}
