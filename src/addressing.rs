//! # Addressing Modes
//!
//! The 13 NMOS 6502 addressing modes. Each opcode table entry names one, and
//! both the CPU (effective-address resolution) and the disassembler (operand
//! rendering) dispatch on it.

/// 6502 addressing mode.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand. Example: CLC, RTS, NOP
    Implicit,

    /// Operates on the accumulator. Example: LSR A
    Accumulator,

    /// 8-bit constant. Example: LDA #$10
    Immediate,

    /// Address 0x0000-0x00FF. Example: LDA $80
    ZeroPage,

    /// Zero page base plus X, wrapping within page zero. Example: LDA $80,X
    ZeroPageX,

    /// Zero page base plus Y, wrapping within page zero. Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit displacement from the address after the branch.
    Relative,

    /// Full 16-bit address. Example: JMP $1234
    Absolute,

    /// 16-bit base plus X. Reads pay +1 cycle when the sum crosses a page.
    AbsoluteX,

    /// 16-bit base plus Y. Reads pay +1 cycle when the sum crosses a page.
    AbsoluteY,

    /// JMP through a 16-bit pointer. The pointer's high byte never carries
    /// into the next page: JMP ($10FF) reads $10FF and $1000.
    Indirect,

    /// (zp,X): add X to the zero page operand (wrapping), then dereference.
    IndirectX,

    /// (zp),Y: dereference the zero page pointer, then add Y. Reads pay +1
    /// cycle when adding Y crosses a page.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    /// Whether an index added in this mode can incur a page-crossing penalty.
    pub const fn has_page_penalty(self) -> bool {
        matches!(
            self,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectY
        )
    }
}
