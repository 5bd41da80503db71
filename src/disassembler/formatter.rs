//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;

/// Hex prefix used for operands and annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexNotation {
    /// `$1234`
    #[default]
    Dollar,
    /// `&1234`, as BBC BASIC and the MOS write it
    Ampersand,
}

impl HexNotation {
    pub fn prefix(self) -> char {
        match self {
            HexNotation::Dollar => '$',
            HexNotation::Ampersand => '&',
        }
    }
}

/// Format a single instruction as assembly text using `$` hex.
///
/// ```
/// use beeb6502::{disassemble, format_instruction, DisassemblyOptions};
///
/// let instr = &disassemble(&[0x6C, 0xFE, 0x02], DisassemblyOptions::default())[0];
/// assert_eq!(format_instruction(instr), "JMP ($02FE)");
/// ```
pub fn format_instruction(instr: &Instruction) -> String {
    format_instruction_with(instr, HexNotation::Dollar)
}

/// Format a single instruction as assembly text.
pub fn format_instruction_with(instr: &Instruction, notation: HexNotation) -> String {
    let operand = format_operand(instr, notation.prefix());

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// `ADDR: MNEMONIC OPERAND`, plus ` -> ADDR` when an effective address is
/// supplied.
pub fn format_line(instr: &Instruction, notation: HexNotation, annotation: Option<u16>) -> String {
    let mut line = format!("{:04X}: {}", instr.address, format_instruction_with(instr, notation));
    if let Some(addr) = annotation {
        line.push_str(&format!(" -> {}{:04X}", notation.prefix(), addr));
    }
    line
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction, p: char) -> String {
    use AddressingMode::*;

    // .byte directive: the raw byte
    if instr.mnemonic == ".byte" {
        return format!("{}{:02X}", p, instr.opcode);
    }

    // Undocumented opcodes: every raw byte, opcode included
    if instr.illegal {
        return instr
            .bytes()
            .iter()
            .map(|b| format!("{}{:02X}", p, b))
            .collect::<Vec<_>>()
            .join(",");
    }

    let byte = instr.operand_value() as u8;
    let word = instr.operand_value();

    match instr.addressing_mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#{}{:02X}", p, byte),
        ZeroPage => format!("{}{:02X}", p, byte),
        ZeroPageX => format!("{}{:02X},X", p, byte),
        ZeroPageY => format!("{}{:02X},Y", p, byte),
        Relative => {
            // Offset is relative to the address after the 2-byte branch
            let target = instr.address.wrapping_add(2).wrapping_add_signed(byte as i8 as i16);
            format!("{}{:04X}", p, target)
        }
        Absolute => format!("{}{:04X}", p, word),
        AbsoluteX => format!("{}{:04X},X", p, word),
        AbsoluteY => format!("{}{:04X},Y", p, word),
        Indirect => format!("({}{:04X})", p, word),
        IndirectX => format!("({}{:02X},X)", p, byte),
        IndirectY => format!("({}{:02X}),Y", p, byte),
    }
}
