//! # Increment and Decrement Instructions
//!
//! INC/DEC on memory (read-modify-write, one hooked read and one hooked
//! write) and INX/INY/DEX/DEY on the index registers. All wrap modulo 256
//! and update Z and N.

use super::Decoded;
use crate::cpu::CPU;
use crate::error::HookFault;

fn modify_memory(cpu: &mut CPU, op: &Decoded, f: fn(u8) -> u8) -> Result<(), HookFault> {
    let (addr, _) = cpu.effective_address(op)?;
    let result = f(cpu.read(addr)?);
    cpu.write(addr, result)?;
    cpu.regs.set_zn(result);
    Ok(())
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    modify_memory(cpu, op, |v| v.wrapping_add(1))
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    modify_memory(cpu, op, |v| v.wrapping_sub(1))
}

pub(crate) fn execute_inx(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.regs.set_zn(cpu.regs.x);
    Ok(())
}

pub(crate) fn execute_iny(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.regs.set_zn(cpu.regs.y);
    Ok(())
}

pub(crate) fn execute_dex(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.regs.set_zn(cpu.regs.x);
    Ok(())
}

pub(crate) fn execute_dey(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.regs.set_zn(cpu.regs.y);
    Ok(())
}
