//! Instruction decoder for the 6502 disassembler

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::opcodes::OPCODE_TABLE;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// `None` if the slice is empty or too short for the whole instruction.
/// Undocumented opcodes decode to a `???` instruction of their known length.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];
    let operand_len = (metadata.size_bytes - 1) as usize;

    let operand_bytes = rest.get(..operand_len)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
        base_cycles: metadata.base_cycles,
        illegal: metadata.is_illegal(),
    })
}

/// A one-byte `.byte` entry for data that does not form a whole instruction.
pub fn byte_directive(value: u8, address: u16) -> Instruction {
    Instruction {
        address,
        opcode: value,
        mnemonic: ".byte",
        addressing_mode: AddressingMode::Implicit,
        operand_bytes: Vec::new(),
        size_bytes: 1,
        base_cycles: 0,
        illegal: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lda_immediate() {
        let bytes = &[0xA9, 0x42];
        let instr = decode_instruction(bytes, 0x8000).unwrap();

        assert_eq!(instr.address, 0x8000);
        assert_eq!(instr.opcode, 0xA9);
        assert_eq!(instr.mnemonic, "LDA");
        assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
        assert_eq!(instr.operand_bytes, vec![0x42]);
        assert_eq!(instr.size_bytes, 2);
    }

    #[test]
    fn test_decode_sta_absolute() {
        let bytes = &[0x8D, 0x00, 0x80];
        let instr = decode_instruction(bytes, 0x0000).unwrap();

        assert_eq!(instr.opcode, 0x8D);
        assert_eq!(instr.mnemonic, "STA");
        assert_eq!(instr.addressing_mode, AddressingMode::Absolute);
        assert_eq!(instr.operand_bytes, vec![0x00, 0x80]);
        assert_eq!(instr.size_bytes, 3);
    }

    #[test]
    fn test_decode_nop() {
        let instr = decode_instruction(&[0xEA], 0x1000).unwrap();

        assert_eq!(instr.address, 0x1000);
        assert_eq!(instr.mnemonic, "NOP");
        assert_eq!(instr.addressing_mode, AddressingMode::Implicit);
        assert!(instr.operand_bytes.is_empty());
        assert_eq!(instr.size_bytes, 1);
    }

    #[test]
    fn test_decode_illegal_uses_known_length() {
        let instr = decode_instruction(&[0x0C, 0x34, 0x12], 0x1000).unwrap();
        assert!(instr.illegal);
        assert_eq!(instr.mnemonic, "???");
        assert_eq!(instr.size_bytes, 3);
        assert_eq!(instr.operand_bytes, vec![0x34, 0x12]);
    }

    #[test]
    fn test_decode_short_slice() {
        assert!(decode_instruction(&[], 0).is_none());
        assert!(decode_instruction(&[0x8D, 0x00], 0).is_none());
    }
}
