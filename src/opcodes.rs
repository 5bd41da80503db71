//! # Opcode Metadata Table
//!
//! The complete 256-entry table that serves as the single source of truth for
//! 6502 instruction metadata. The CPU dispatches on [`Operation`] and the
//! disassembler renders from the same entries, so the two can never disagree
//! about an instruction's length or addressing mode.
//!
//! The table covers:
//! - **151 documented instructions** - official NMOS 6502 opcodes
//! - **105 undocumented opcodes** - mnemonic `"???"`, tagged
//!   [`Operation::Illegal`], sized by their known operand length and costed at
//!   one cycle. The CPU executes them as no-ops.

use crate::addressing::AddressingMode;

/// Semantic operation performed by an opcode.
///
/// One variant per documented mnemonic, plus [`Operation::Illegal`] for every
/// undocumented byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Undocumented opcode, executed as a no-op
    Illegal,
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use beeb6502::{lookup, AddressingMode, Operation};
///
/// let lda_imm = lookup(0xA9);
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert_eq!(lda_imm.operation, Operation::Lda);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic ("LDA", "STA", "???" for undocumented opcodes).
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost before page-crossing and branch penalties.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands), 1-3.
    pub size_bytes: u8,

    /// What the CPU does when it executes this opcode.
    pub operation: Operation,
}

impl OpcodeMetadata {
    /// True for undocumented opcodes.
    pub fn is_illegal(&self) -> bool {
        self.operation == Operation::Illegal
    }
}

const fn op(
    mnemonic: &'static str,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    size_bytes: u8,
    operation: Operation,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        size_bytes,
        operation,
    }
}

const fn illegal(size_bytes: u8) -> OpcodeMetadata {
    op("???", AddressingMode::Implicit, 1, size_bytes, Operation::Illegal)
}

use AddressingMode::*;

/// Complete 256-entry opcode table indexed by opcode byte.
pub static OPCODE_TABLE: [OpcodeMetadata; 256] = [
    op("BRK", Implicit, 7, 1, Operation::Brk), // 0x00
    op("ORA", IndirectX, 6, 2, Operation::Ora), // 0x01
    illegal(1), // 0x02
    illegal(2), // 0x03
    illegal(2), // 0x04
    op("ORA", ZeroPage, 3, 2, Operation::Ora), // 0x05
    op("ASL", ZeroPage, 5, 2, Operation::Asl), // 0x06
    illegal(2), // 0x07
    op("PHP", Implicit, 3, 1, Operation::Php), // 0x08
    op("ORA", Immediate, 2, 2, Operation::Ora), // 0x09
    op("ASL", Accumulator, 2, 1, Operation::Asl), // 0x0A
    illegal(2), // 0x0B
    illegal(3), // 0x0C
    op("ORA", Absolute, 4, 3, Operation::Ora), // 0x0D
    op("ASL", Absolute, 6, 3, Operation::Asl), // 0x0E
    illegal(3), // 0x0F
    op("BPL", Relative, 2, 2, Operation::Bpl), // 0x10
    op("ORA", IndirectY, 5, 2, Operation::Ora), // 0x11
    illegal(1), // 0x12
    illegal(2), // 0x13
    illegal(2), // 0x14
    op("ORA", ZeroPageX, 4, 2, Operation::Ora), // 0x15
    op("ASL", ZeroPageX, 6, 2, Operation::Asl), // 0x16
    illegal(2), // 0x17
    op("CLC", Implicit, 2, 1, Operation::Clc), // 0x18
    op("ORA", AbsoluteY, 4, 3, Operation::Ora), // 0x19
    illegal(1), // 0x1A
    illegal(3), // 0x1B
    illegal(3), // 0x1C
    op("ORA", AbsoluteX, 4, 3, Operation::Ora), // 0x1D
    op("ASL", AbsoluteX, 7, 3, Operation::Asl), // 0x1E
    illegal(3), // 0x1F
    op("JSR", Absolute, 6, 3, Operation::Jsr), // 0x20
    op("AND", IndirectX, 6, 2, Operation::And), // 0x21
    illegal(1), // 0x22
    illegal(2), // 0x23
    op("BIT", ZeroPage, 3, 2, Operation::Bit), // 0x24
    op("AND", ZeroPage, 3, 2, Operation::And), // 0x25
    op("ROL", ZeroPage, 5, 2, Operation::Rol), // 0x26
    illegal(2), // 0x27
    op("PLP", Implicit, 4, 1, Operation::Plp), // 0x28
    op("AND", Immediate, 2, 2, Operation::And), // 0x29
    op("ROL", Accumulator, 2, 1, Operation::Rol), // 0x2A
    illegal(2), // 0x2B
    op("BIT", Absolute, 4, 3, Operation::Bit), // 0x2C
    op("AND", Absolute, 4, 3, Operation::And), // 0x2D
    op("ROL", Absolute, 6, 3, Operation::Rol), // 0x2E
    illegal(3), // 0x2F
    op("BMI", Relative, 2, 2, Operation::Bmi), // 0x30
    op("AND", IndirectY, 5, 2, Operation::And), // 0x31
    illegal(1), // 0x32
    illegal(2), // 0x33
    illegal(2), // 0x34
    op("AND", ZeroPageX, 4, 2, Operation::And), // 0x35
    op("ROL", ZeroPageX, 6, 2, Operation::Rol), // 0x36
    illegal(2), // 0x37
    op("SEC", Implicit, 2, 1, Operation::Sec), // 0x38
    op("AND", AbsoluteY, 4, 3, Operation::And), // 0x39
    illegal(1), // 0x3A
    illegal(3), // 0x3B
    illegal(3), // 0x3C
    op("AND", AbsoluteX, 4, 3, Operation::And), // 0x3D
    op("ROL", AbsoluteX, 7, 3, Operation::Rol), // 0x3E
    illegal(3), // 0x3F
    op("RTI", Implicit, 6, 1, Operation::Rti), // 0x40
    op("EOR", IndirectX, 6, 2, Operation::Eor), // 0x41
    illegal(1), // 0x42
    illegal(2), // 0x43
    illegal(2), // 0x44
    op("EOR", ZeroPage, 3, 2, Operation::Eor), // 0x45
    op("LSR", ZeroPage, 5, 2, Operation::Lsr), // 0x46
    illegal(2), // 0x47
    op("PHA", Implicit, 3, 1, Operation::Pha), // 0x48
    op("EOR", Immediate, 2, 2, Operation::Eor), // 0x49
    op("LSR", Accumulator, 2, 1, Operation::Lsr), // 0x4A
    illegal(2), // 0x4B
    op("JMP", Absolute, 3, 3, Operation::Jmp), // 0x4C
    op("EOR", Absolute, 4, 3, Operation::Eor), // 0x4D
    op("LSR", Absolute, 6, 3, Operation::Lsr), // 0x4E
    illegal(3), // 0x4F
    op("BVC", Relative, 2, 2, Operation::Bvc), // 0x50
    op("EOR", IndirectY, 5, 2, Operation::Eor), // 0x51
    illegal(1), // 0x52
    illegal(2), // 0x53
    illegal(2), // 0x54
    op("EOR", ZeroPageX, 4, 2, Operation::Eor), // 0x55
    op("LSR", ZeroPageX, 6, 2, Operation::Lsr), // 0x56
    illegal(2), // 0x57
    op("CLI", Implicit, 2, 1, Operation::Cli), // 0x58
    op("EOR", AbsoluteY, 4, 3, Operation::Eor), // 0x59
    illegal(1), // 0x5A
    illegal(3), // 0x5B
    illegal(3), // 0x5C
    op("EOR", AbsoluteX, 4, 3, Operation::Eor), // 0x5D
    op("LSR", AbsoluteX, 7, 3, Operation::Lsr), // 0x5E
    illegal(3), // 0x5F
    op("RTS", Implicit, 6, 1, Operation::Rts), // 0x60
    op("ADC", IndirectX, 6, 2, Operation::Adc), // 0x61
    illegal(1), // 0x62
    illegal(2), // 0x63
    illegal(2), // 0x64
    op("ADC", ZeroPage, 3, 2, Operation::Adc), // 0x65
    op("ROR", ZeroPage, 5, 2, Operation::Ror), // 0x66
    illegal(2), // 0x67
    op("PLA", Implicit, 4, 1, Operation::Pla), // 0x68
    op("ADC", Immediate, 2, 2, Operation::Adc), // 0x69
    op("ROR", Accumulator, 2, 1, Operation::Ror), // 0x6A
    illegal(2), // 0x6B
    op("JMP", Indirect, 5, 3, Operation::Jmp), // 0x6C
    op("ADC", Absolute, 4, 3, Operation::Adc), // 0x6D
    op("ROR", Absolute, 6, 3, Operation::Ror), // 0x6E
    illegal(3), // 0x6F
    op("BVS", Relative, 2, 2, Operation::Bvs), // 0x70
    op("ADC", IndirectY, 5, 2, Operation::Adc), // 0x71
    illegal(1), // 0x72
    illegal(2), // 0x73
    illegal(2), // 0x74
    op("ADC", ZeroPageX, 4, 2, Operation::Adc), // 0x75
    op("ROR", ZeroPageX, 6, 2, Operation::Ror), // 0x76
    illegal(2), // 0x77
    op("SEI", Implicit, 2, 1, Operation::Sei), // 0x78
    op("ADC", AbsoluteY, 4, 3, Operation::Adc), // 0x79
    illegal(1), // 0x7A
    illegal(3), // 0x7B
    illegal(3), // 0x7C
    op("ADC", AbsoluteX, 4, 3, Operation::Adc), // 0x7D
    op("ROR", AbsoluteX, 7, 3, Operation::Ror), // 0x7E
    illegal(3), // 0x7F
    illegal(2), // 0x80
    op("STA", IndirectX, 6, 2, Operation::Sta), // 0x81
    illegal(2), // 0x82
    illegal(2), // 0x83
    op("STY", ZeroPage, 3, 2, Operation::Sty), // 0x84
    op("STA", ZeroPage, 3, 2, Operation::Sta), // 0x85
    op("STX", ZeroPage, 3, 2, Operation::Stx), // 0x86
    illegal(2), // 0x87
    op("DEY", Implicit, 2, 1, Operation::Dey), // 0x88
    illegal(2), // 0x89
    op("TXA", Implicit, 2, 1, Operation::Txa), // 0x8A
    illegal(2), // 0x8B
    op("STY", Absolute, 4, 3, Operation::Sty), // 0x8C
    op("STA", Absolute, 4, 3, Operation::Sta), // 0x8D
    op("STX", Absolute, 4, 3, Operation::Stx), // 0x8E
    illegal(3), // 0x8F
    op("BCC", Relative, 2, 2, Operation::Bcc), // 0x90
    op("STA", IndirectY, 6, 2, Operation::Sta), // 0x91
    illegal(1), // 0x92
    illegal(2), // 0x93
    op("STY", ZeroPageX, 4, 2, Operation::Sty), // 0x94
    op("STA", ZeroPageX, 4, 2, Operation::Sta), // 0x95
    op("STX", ZeroPageY, 4, 2, Operation::Stx), // 0x96
    illegal(2), // 0x97
    op("TYA", Implicit, 2, 1, Operation::Tya), // 0x98
    op("STA", AbsoluteY, 5, 3, Operation::Sta), // 0x99
    op("TXS", Implicit, 2, 1, Operation::Txs), // 0x9A
    illegal(3), // 0x9B
    illegal(3), // 0x9C
    op("STA", AbsoluteX, 5, 3, Operation::Sta), // 0x9D
    illegal(3), // 0x9E
    illegal(3), // 0x9F
    op("LDY", Immediate, 2, 2, Operation::Ldy), // 0xA0
    op("LDA", IndirectX, 6, 2, Operation::Lda), // 0xA1
    op("LDX", Immediate, 2, 2, Operation::Ldx), // 0xA2
    illegal(2), // 0xA3
    op("LDY", ZeroPage, 3, 2, Operation::Ldy), // 0xA4
    op("LDA", ZeroPage, 3, 2, Operation::Lda), // 0xA5
    op("LDX", ZeroPage, 3, 2, Operation::Ldx), // 0xA6
    illegal(2), // 0xA7
    op("TAY", Implicit, 2, 1, Operation::Tay), // 0xA8
    op("LDA", Immediate, 2, 2, Operation::Lda), // 0xA9
    op("TAX", Implicit, 2, 1, Operation::Tax), // 0xAA
    illegal(2), // 0xAB
    op("LDY", Absolute, 4, 3, Operation::Ldy), // 0xAC
    op("LDA", Absolute, 4, 3, Operation::Lda), // 0xAD
    op("LDX", Absolute, 4, 3, Operation::Ldx), // 0xAE
    illegal(3), // 0xAF
    op("BCS", Relative, 2, 2, Operation::Bcs), // 0xB0
    op("LDA", IndirectY, 5, 2, Operation::Lda), // 0xB1
    illegal(1), // 0xB2
    illegal(2), // 0xB3
    op("LDY", ZeroPageX, 4, 2, Operation::Ldy), // 0xB4
    op("LDA", ZeroPageX, 4, 2, Operation::Lda), // 0xB5
    op("LDX", ZeroPageY, 4, 2, Operation::Ldx), // 0xB6
    illegal(2), // 0xB7
    op("CLV", Implicit, 2, 1, Operation::Clv), // 0xB8
    op("LDA", AbsoluteY, 4, 3, Operation::Lda), // 0xB9
    op("TSX", Implicit, 2, 1, Operation::Tsx), // 0xBA
    illegal(3), // 0xBB
    op("LDY", AbsoluteX, 4, 3, Operation::Ldy), // 0xBC
    op("LDA", AbsoluteX, 4, 3, Operation::Lda), // 0xBD
    op("LDX", AbsoluteY, 4, 3, Operation::Ldx), // 0xBE
    illegal(3), // 0xBF
    op("CPY", Immediate, 2, 2, Operation::Cpy), // 0xC0
    op("CMP", IndirectX, 6, 2, Operation::Cmp), // 0xC1
    illegal(2), // 0xC2
    illegal(2), // 0xC3
    op("CPY", ZeroPage, 3, 2, Operation::Cpy), // 0xC4
    op("CMP", ZeroPage, 3, 2, Operation::Cmp), // 0xC5
    op("DEC", ZeroPage, 5, 2, Operation::Dec), // 0xC6
    illegal(2), // 0xC7
    op("INY", Implicit, 2, 1, Operation::Iny), // 0xC8
    op("CMP", Immediate, 2, 2, Operation::Cmp), // 0xC9
    op("DEX", Implicit, 2, 1, Operation::Dex), // 0xCA
    illegal(2), // 0xCB
    op("CPY", Absolute, 4, 3, Operation::Cpy), // 0xCC
    op("CMP", Absolute, 4, 3, Operation::Cmp), // 0xCD
    op("DEC", Absolute, 6, 3, Operation::Dec), // 0xCE
    illegal(3), // 0xCF
    op("BNE", Relative, 2, 2, Operation::Bne), // 0xD0
    op("CMP", IndirectY, 5, 2, Operation::Cmp), // 0xD1
    illegal(1), // 0xD2
    illegal(2), // 0xD3
    illegal(2), // 0xD4
    op("CMP", ZeroPageX, 4, 2, Operation::Cmp), // 0xD5
    op("DEC", ZeroPageX, 6, 2, Operation::Dec), // 0xD6
    illegal(2), // 0xD7
    op("CLD", Implicit, 2, 1, Operation::Cld), // 0xD8
    op("CMP", AbsoluteY, 4, 3, Operation::Cmp), // 0xD9
    illegal(1), // 0xDA
    illegal(3), // 0xDB
    illegal(3), // 0xDC
    op("CMP", AbsoluteX, 4, 3, Operation::Cmp), // 0xDD
    op("DEC", AbsoluteX, 7, 3, Operation::Dec), // 0xDE
    illegal(3), // 0xDF
    op("CPX", Immediate, 2, 2, Operation::Cpx), // 0xE0
    op("SBC", IndirectX, 6, 2, Operation::Sbc), // 0xE1
    illegal(2), // 0xE2
    illegal(2), // 0xE3
    op("CPX", ZeroPage, 3, 2, Operation::Cpx), // 0xE4
    op("SBC", ZeroPage, 3, 2, Operation::Sbc), // 0xE5
    op("INC", ZeroPage, 5, 2, Operation::Inc), // 0xE6
    illegal(2), // 0xE7
    op("INX", Implicit, 2, 1, Operation::Inx), // 0xE8
    op("SBC", Immediate, 2, 2, Operation::Sbc), // 0xE9
    op("NOP", Implicit, 2, 1, Operation::Nop), // 0xEA
    illegal(2), // 0xEB
    op("CPX", Absolute, 4, 3, Operation::Cpx), // 0xEC
    op("SBC", Absolute, 4, 3, Operation::Sbc), // 0xED
    op("INC", Absolute, 6, 3, Operation::Inc), // 0xEE
    illegal(3), // 0xEF
    op("BEQ", Relative, 2, 2, Operation::Beq), // 0xF0
    op("SBC", IndirectY, 5, 2, Operation::Sbc), // 0xF1
    illegal(1), // 0xF2
    illegal(2), // 0xF3
    illegal(2), // 0xF4
    op("SBC", ZeroPageX, 4, 2, Operation::Sbc), // 0xF5
    op("INC", ZeroPageX, 6, 2, Operation::Inc), // 0xF6
    illegal(2), // 0xF7
    op("SED", Implicit, 2, 1, Operation::Sed), // 0xF8
    op("SBC", AbsoluteY, 4, 3, Operation::Sbc), // 0xF9
    illegal(1), // 0xFA
    illegal(3), // 0xFB
    illegal(3), // 0xFC
    op("SBC", AbsoluteX, 4, 3, Operation::Sbc), // 0xFD
    op("INC", AbsoluteX, 7, 3, Operation::Inc), // 0xFE
    illegal(3), // 0xFF
];

/// Looks up the descriptor for an opcode byte. Every byte value has one.
pub fn lookup(opcode: u8) -> &'static OpcodeMetadata {
    &OPCODE_TABLE[opcode as usize]
}

/// Finds the documented opcode encoding `mnemonic` in `mode`, if any.
///
/// ```
/// use beeb6502::{find_opcode, AddressingMode};
///
/// assert_eq!(find_opcode("JSR", AddressingMode::Absolute), Some(0x20));
/// assert_eq!(find_opcode("STA", AddressingMode::Immediate), None);
/// ```
pub fn find_opcode(mnemonic: &str, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .position(|m| {
            !m.is_illegal() && m.addressing_mode == mode && m.mnemonic.eq_ignore_ascii_case(mnemonic)
        })
        .map(|i| i as u8)
}
