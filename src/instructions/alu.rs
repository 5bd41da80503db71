//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC, SBC: add/subtract with carry, binary or BCD per the Decimal flag
//! - AND, ORA, EOR: bitwise logic into the accumulator
//! - CMP, CPX, CPY: compare without storing
//! - BIT: test accumulator bits against memory
//!
//! Decimal mode follows NMOS behaviour: the accumulator and Carry hold the
//! BCD-corrected result. For ADC, Z comes from the binary sum while N and V
//! come from the intermediate high nibble; for SBC every flag comes from the
//! binary difference.

use super::Decoded;
use crate::cpu::CPU;
use crate::error::HookFault;
use crate::registers::Registers;

/// Executes the ADC (Add with Carry) instruction.
///
/// Updates C, Z, V and N.
pub(crate) fn execute_adc(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    if cpu.regs.decimal() {
        add_decimal(&mut cpu.regs, value);
    } else {
        add_binary(&mut cpu.regs, value);
    }
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Carry clear means borrow. Updates C, Z, V and N.
pub(crate) fn execute_sbc(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    if cpu.regs.decimal() {
        subtract_decimal(&mut cpu.regs, value);
    } else {
        // A - M - !C == A + !M + C
        add_binary(&mut cpu.regs, !value);
    }
    Ok(())
}

fn add_binary(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let sum = a as u16 + value as u16 + regs.carry() as u16;
    let result = sum as u8;

    regs.set_carry(sum > 0xFF);
    // Both operands share a sign that the result lacks
    regs.set_overflow((a ^ result) & (value ^ result) & 0x80 != 0);
    regs.set_zn(result);
    regs.a = result;
}

fn add_decimal(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let carry = regs.carry() as u16;

    let mut lo = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry;
    let mut hi = (a >> 4) as u16 + (value >> 4) as u16;
    if lo > 0x09 {
        lo += 0x06;
    }
    if lo > 0x0F {
        hi += 1;
    }

    let binary = (a as u16 + value as u16 + carry) as u8;
    regs.set_zero(binary == 0);
    regs.set_negative(hi & 0x08 != 0);
    regs.set_overflow(((hi << 4) ^ a as u16) & 0x80 != 0 && (a ^ value) & 0x80 == 0);

    if hi > 0x09 {
        hi += 0x06;
    }
    regs.set_carry(hi > 0x0F);
    regs.a = ((hi << 4) | (lo & 0x0F)) as u8;
}

fn subtract_decimal(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let borrow = (!regs.carry()) as i16;

    let difference = a as i16 - value as i16 - borrow;
    let binary = difference as u8;
    regs.set_carry(difference >= 0);
    regs.set_overflow((a ^ value) & (a ^ binary) & 0x80 != 0);
    regs.set_zn(binary);

    let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
    let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
    if lo < 0 {
        lo -= 0x06;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 0x06;
    }
    regs.a = ((hi << 4) | (lo & 0x0F)) as u8;
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    cpu.regs.a &= value;
    cpu.regs.set_zn(cpu.regs.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_ora(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    cpu.regs.a |= value;
    cpu.regs.set_zn(cpu.regs.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    cpu.regs.a ^= value;
    cpu.regs.set_zn(cpu.regs.a);
    Ok(())
}

/// Register minus memory: C = register >= memory, Z and N from the difference.
fn compare(regs: &mut Registers, register: u8, value: u8) {
    regs.set_carry(register >= value);
    regs.set_zn(register.wrapping_sub(value));
}

pub(crate) fn execute_cmp(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    let a = cpu.regs.a;
    compare(&mut cpu.regs, a, value);
    Ok(())
}

pub(crate) fn execute_cpx(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    let x = cpu.regs.x;
    compare(&mut cpu.regs, x, value);
    Ok(())
}

pub(crate) fn execute_cpy(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    let y = cpu.regs.y;
    compare(&mut cpu.regs, y, value);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from A AND M; N and V are copied from bits 7 and 6 of M. The
/// accumulator is not modified.
pub(crate) fn execute_bit(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    let value = cpu.operand_value(op)?;
    cpu.regs.set_zero(cpu.regs.a & value == 0);
    cpu.regs.set_negative(value & 0x80 != 0);
    cpu.regs.set_overflow(value & 0x40 != 0);
    Ok(())
}
