//! # Flag Instructions
//!
//! Set/clear instructions for the status register (CLC, SEC, CLI, SEI, CLD,
//! SED, CLV). All are 1 byte, 2 cycles, and touch only their own flag.

use crate::cpu::CPU;
use crate::error::HookFault;

pub(crate) fn execute_clc(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.set_carry(false);
    Ok(())
}

pub(crate) fn execute_sec(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.set_carry(true);
    Ok(())
}

pub(crate) fn execute_cli(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.set_interrupt_disable(false);
    Ok(())
}

pub(crate) fn execute_sei(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.set_interrupt_disable(true);
    Ok(())
}

pub(crate) fn execute_cld(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.set_decimal(false);
    Ok(())
}

pub(crate) fn execute_sed(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.set_decimal(true);
    Ok(())
}

/// There is no SEV; V is only set by ADC, SBC, BIT, PLP and RTI.
pub(crate) fn execute_clv(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.set_overflow(false);
    Ok(())
}
