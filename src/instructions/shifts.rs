//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR, on the accumulator or on memory. The bit shifted
//! out lands in Carry; rotates shift the old Carry in. Z and N follow the
//! result.

use super::Decoded;
use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::error::HookFault;

/// Applies `f(value, carry_in) -> (result, carry_out)` to the accumulator or
/// to the byte at the effective address.
fn shift(cpu: &mut CPU, op: &Decoded, f: fn(u8, bool) -> (u8, bool)) -> Result<(), HookFault> {
    let carry_in = cpu.regs.carry();
    let result = if op.mode() == AddressingMode::Accumulator {
        let (result, carry_out) = f(cpu.regs.a, carry_in);
        cpu.regs.a = result;
        cpu.regs.set_carry(carry_out);
        result
    } else {
        let (addr, _) = cpu.effective_address(op)?;
        let (result, carry_out) = f(cpu.read(addr)?, carry_in);
        cpu.write(addr, result)?;
        cpu.regs.set_carry(carry_out);
        result
    };
    cpu.regs.set_zn(result);
    Ok(())
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    shift(cpu, op, |v, _| (v << 1, v & 0x80 != 0))
}

/// Executes the LSR (Logical Shift Right) instruction. N is always cleared.
pub(crate) fn execute_lsr(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    shift(cpu, op, |v, _| (v >> 1, v & 0x01 != 0))
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    shift(cpu, op, |v, c| ((v << 1) | c as u8, v & 0x80 != 0))
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    shift(cpu, op, |v, c| ((v >> 1) | ((c as u8) << 7), v & 0x01 != 0))
}
