//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! `CPU::step` has already fetched the opcode and operand bytes, advanced PC
//! past them and charged the base cycles; each function here performs the
//! operation and adds any extra cycles (page crossing, taken branches).
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

use crate::addressing::AddressingMode;
use crate::cpu::CPU;
use crate::error::HookFault;
use crate::opcodes::{OpcodeMetadata, Operation};

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

/// An instruction after fetch: opcode, table entry and raw operand.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decoded {
    /// Address the opcode was fetched from
    pub address: u16,
    pub opcode: u8,
    pub metadata: &'static OpcodeMetadata,
    /// Operand bytes, little-endian; 0 when there are none
    pub operand: u16,
}

impl Decoded {
    pub fn mode(&self) -> AddressingMode {
        self.metadata.addressing_mode
    }

    /// Low operand byte.
    pub fn operand_byte(&self) -> u8 {
        self.operand as u8
    }
}

/// Dispatches on the operation tag.
pub(crate) fn execute(cpu: &mut CPU, op: &Decoded) -> Result<(), HookFault> {
    use Operation::*;
    match op.metadata.operation {
        Adc => alu::execute_adc(cpu, op),
        Sbc => alu::execute_sbc(cpu, op),
        And => alu::execute_and(cpu, op),
        Ora => alu::execute_ora(cpu, op),
        Eor => alu::execute_eor(cpu, op),
        Cmp => alu::execute_cmp(cpu, op),
        Cpx => alu::execute_cpx(cpu, op),
        Cpy => alu::execute_cpy(cpu, op),
        Bit => alu::execute_bit(cpu, op),

        Bcc | Bcs | Bne | Beq | Bpl | Bmi | Bvc | Bvs => {
            let taken = branches::condition(op.metadata.operation, &cpu.regs);
            branches::execute_branch(cpu, op, taken)
        }

        Asl => shifts::execute_asl(cpu, op),
        Lsr => shifts::execute_lsr(cpu, op),
        Rol => shifts::execute_rol(cpu, op),
        Ror => shifts::execute_ror(cpu, op),

        Lda => load_store::execute_lda(cpu, op),
        Ldx => load_store::execute_ldx(cpu, op),
        Ldy => load_store::execute_ldy(cpu, op),
        Sta => load_store::execute_sta(cpu, op),
        Stx => load_store::execute_stx(cpu, op),
        Sty => load_store::execute_sty(cpu, op),

        Inc => inc_dec::execute_inc(cpu, op),
        Dec => inc_dec::execute_dec(cpu, op),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        Jmp => control::execute_jmp(cpu, op),
        Jsr => control::execute_jsr(cpu, op),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Brk => control::execute_brk(cpu),
        Nop => Ok(()),

        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),

        Clc => flags::execute_clc(cpu),
        Sec => flags::execute_sec(cpu),
        Cli => flags::execute_cli(cpu),
        Sei => flags::execute_sei(cpu),
        Cld => flags::execute_cld(cpu),
        Sed => flags::execute_sed(cpu),
        Clv => flags::execute_clv(cpu),

        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),

        // Filtered out by the caller
        Illegal => Ok(()),
    }
}

/// Whether two addresses lie in different 256-byte pages.
#[inline]
pub(crate) fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl CPU {
    /// Resolves the effective address of a memory operand.
    ///
    /// Returns the address and whether indexing crossed a page (only
    /// meaningful for AbsoluteX, AbsoluteY and IndirectY). Pointer reads for
    /// the indirect modes go through hooks.
    pub(crate) fn effective_address(&mut self, op: &Decoded) -> Result<(u16, bool), HookFault> {
        let zp = op.operand_byte();
        let resolved = match op.mode() {
            AddressingMode::ZeroPage => (zp as u16, false),
            AddressingMode::ZeroPageX => (zp.wrapping_add(self.regs.x) as u16, false),
            AddressingMode::ZeroPageY => (zp.wrapping_add(self.regs.y) as u16, false),
            AddressingMode::Absolute => (op.operand, false),
            AddressingMode::AbsoluteX => {
                let addr = op.operand.wrapping_add(self.regs.x as u16);
                (addr, page_crossed(op.operand, addr))
            }
            AddressingMode::AbsoluteY => {
                let addr = op.operand.wrapping_add(self.regs.y as u16);
                (addr, page_crossed(op.operand, addr))
            }
            AddressingMode::Indirect => {
                // The pointer's high byte is fetched without carrying into the next page
                let ptr = op.operand;
                let lo = self.read(ptr)?;
                let hi = self.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF))?;
                (u16::from_le_bytes([lo, hi]), false)
            }
            AddressingMode::IndirectX => {
                let ptr = zp.wrapping_add(self.regs.x);
                (self.read_zero_page_word(ptr)?, false)
            }
            AddressingMode::IndirectY => {
                let base = self.read_zero_page_word(zp)?;
                let addr = base.wrapping_add(self.regs.y as u16);
                (addr, page_crossed(base, addr))
            }
            AddressingMode::Relative => {
                let target = self.regs.pc.wrapping_add_signed(zp as i8 as i16);
                (target, page_crossed(self.regs.pc, target))
            }
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Immediate => {
                (op.address.wrapping_add(1), false)
            }
        };
        Ok(resolved)
    }

    /// Reads the operand of a read-type instruction, charging the
    /// page-crossing cycle where the mode has one.
    pub(crate) fn operand_value(&mut self, op: &Decoded) -> Result<u8, HookFault> {
        match op.mode() {
            AddressingMode::Immediate => Ok(op.operand_byte()),
            AddressingMode::Accumulator => Ok(self.regs.a),
            _ => {
                let (addr, crossed) = self.effective_address(op)?;
                if crossed && op.mode().has_page_penalty() {
                    self.cycles += 1;
                }
                self.read(addr)
            }
        }
    }

    /// Little-endian pointer stored in zero page; the high byte wraps to $00.
    fn read_zero_page_word(&mut self, ptr: u8) -> Result<u16, HookFault> {
        let lo = self.read(ptr as u16)?;
        let hi = self.read(ptr.wrapping_add(1) as u16)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}
