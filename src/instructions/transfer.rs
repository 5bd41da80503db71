//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX update Z and N from the copied value.
//! TXS affects no flags.

use crate::cpu::CPU;
use crate::error::HookFault;

pub(crate) fn execute_tax(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.x = cpu.regs.a;
    cpu.regs.set_zn(cpu.regs.x);
    Ok(())
}

pub(crate) fn execute_tay(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.y = cpu.regs.a;
    cpu.regs.set_zn(cpu.regs.y);
    Ok(())
}

pub(crate) fn execute_txa(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.a = cpu.regs.x;
    cpu.regs.set_zn(cpu.regs.a);
    Ok(())
}

pub(crate) fn execute_tya(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.a = cpu.regs.y;
    cpu.regs.set_zn(cpu.regs.a);
    Ok(())
}

pub(crate) fn execute_tsx(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.x = cpu.regs.sp;
    cpu.regs.set_zn(cpu.regs.x);
    Ok(())
}

pub(crate) fn execute_txs(cpu: &mut CPU) -> Result<(), HookFault> {
    cpu.regs.sp = cpu.regs.x;
    Ok(())
}
