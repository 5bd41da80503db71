//! Property-based round-trip tests for the opcode table and disassembler.
//!
//! These tests verify that:
//! - encoding any documented (mnemonic, mode) pair with `find_opcode` and
//!   disassembling the bytes gives back the same mnemonic and mode
//! - rendered operands carry the encoded operand value
//! - disassembling arbitrary bytes always accounts for every byte

use beeb6502::{
    disassemble, find_opcode, format_instruction, AddressingMode, DisassemblyOptions,
    OPCODE_TABLE,
};
use proptest::prelude::*;

/// Every documented opcode
fn documented_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.is_illegal())
        .map(|(i, _)| i as u8)
        .collect()
}

/// Encode `opcode` with `operand` in the width its mode requires
fn encode(opcode: u8, operand: u16) -> Vec<u8> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let mut bytes = vec![opcode];
    match metadata.size_bytes {
        2 => bytes.push(operand as u8),
        3 => bytes.extend_from_slice(&operand.to_le_bytes()),
        _ => {}
    }
    bytes
}

proptest! {
    /// Property: mnemonic and addressing mode survive encode then disassemble
    #[test]
    fn prop_encode_disassemble_round_trip(
        opcode in prop::sample::select(documented_opcodes()),
        operand: u16,
        address: u16,
    ) {
        let metadata = &OPCODE_TABLE[opcode as usize];
        let encoded = find_opcode(metadata.mnemonic, metadata.addressing_mode);
        prop_assert_eq!(encoded, Some(opcode));

        let bytes = encode(opcode, operand);
        let options = DisassemblyOptions { start_address: address, ..DisassemblyOptions::default() };
        let instrs = disassemble(&bytes, options);

        prop_assert_eq!(instrs.len(), 1);
        let instr = &instrs[0];
        prop_assert_eq!(instr.mnemonic, metadata.mnemonic);
        prop_assert_eq!(instr.addressing_mode, metadata.addressing_mode);
        prop_assert_eq!(instr.bytes(), bytes);
        prop_assert_eq!(instr.address, address);
    }

    /// Property: the rendered operand shows the encoded value
    #[test]
    fn prop_operand_text_contains_value(
        opcode in prop::sample::select(documented_opcodes()),
        operand: u16,
    ) {
        let metadata = &OPCODE_TABLE[opcode as usize];
        let bytes = encode(opcode, operand);
        let instr = &disassemble(&bytes, DisassemblyOptions::default())[0];
        let text = format_instruction(instr);

        let expected = match metadata.addressing_mode {
            AddressingMode::Implicit => String::new(),
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Relative => {
                let target = 2u16.wrapping_add_signed(operand as u8 as i8 as i16);
                format!("${:04X}", target)
            }
            mode if mode.operand_len() == 1 => format!("${:02X}", operand as u8),
            _ => format!("${:04X}", operand),
        };
        prop_assert!(
            text.starts_with(metadata.mnemonic) && text.contains(&expected),
            "{} does not contain {}",
            text,
            expected
        );
    }

    /// Property: slice disassembly consumes exactly the input
    #[test]
    fn prop_disassembly_covers_every_byte(
        bytes in prop::collection::vec(any::<u8>(), 0..128),
        start in 0u16..0x8000,
    ) {
        let options = DisassemblyOptions { start_address: start, ..DisassemblyOptions::default() };
        let instrs = disassemble(&bytes, options);

        let total: usize = instrs.iter().map(|i| i.size_bytes as usize).sum();
        prop_assert_eq!(total, bytes.len());

        let mut expected_address = start;
        for instr in &instrs {
            prop_assert_eq!(instr.address, expected_address);
            expected_address = instr.next_address();
        }

        let rejoined: Vec<u8> = instrs.iter().flat_map(|i| i.bytes()).collect();
        prop_assert_eq!(rejoined, bytes);
    }
}
