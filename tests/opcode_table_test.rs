//! Opcode table validation tests
//!
//! Verifies that the opcode metadata table is complete and accurate.

use beeb6502::{find_opcode, lookup, AddressingMode, Operation, OPCODE_TABLE};

#[test]
fn test_opcode_table_completeness() {
    assert_eq!(OPCODE_TABLE.len(), 256);

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        assert!(
            !metadata.mnemonic.is_empty(),
            "Opcode 0x{:02X} has empty mnemonic",
            opcode
        );
    }
}

#[test]
fn test_size_matches_addressing_mode() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        assert!(
            (1..=3).contains(&metadata.size_bytes),
            "Opcode 0x{:02X} has invalid size {}",
            opcode,
            metadata.size_bytes
        );
        if !metadata.is_illegal() {
            assert_eq!(
                metadata.size_bytes,
                1 + metadata.addressing_mode.operand_len(),
                "Opcode 0x{:02X} ({}) size disagrees with its addressing mode",
                opcode,
                metadata.mnemonic
            );
        }
    }
}

#[test]
fn test_documented_opcode_count() {
    let documented = OPCODE_TABLE.iter().filter(|m| !m.is_illegal()).count();
    assert_eq!(documented, 151);
}

#[test]
fn test_illegal_opcodes_cost_one_cycle() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.is_illegal() {
            assert_eq!(metadata.mnemonic, "???");
            assert_eq!(metadata.operation, Operation::Illegal);
            assert_eq!(
                metadata.base_cycles, 1,
                "Illegal opcode 0x{:02X} should cost 1 cycle",
                opcode
            );
        } else {
            assert!(metadata.base_cycles >= 2);
        }
    }
}

#[test]
fn test_known_entries() {
    let lda = lookup(0xA9);
    assert_eq!(lda.mnemonic, "LDA");
    assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
    assert_eq!(lda.base_cycles, 2);
    assert_eq!(lda.operation, Operation::Lda);

    let jmp = lookup(0x6C);
    assert_eq!(jmp.addressing_mode, AddressingMode::Indirect);
    assert_eq!(jmp.base_cycles, 5);

    let brk = lookup(0x00);
    assert_eq!(brk.operation, Operation::Brk);
    assert_eq!(brk.base_cycles, 7);

    assert_eq!(lookup(0x91).base_cycles, 6); // STA (zp),Y
    assert_eq!(lookup(0xFE).base_cycles, 7); // INC abs,X
}

#[test]
fn test_find_opcode_inverts_lookup() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.is_illegal() {
            continue;
        }
        assert_eq!(
            find_opcode(metadata.mnemonic, metadata.addressing_mode),
            Some(opcode as u8)
        );
    }
    assert_eq!(find_opcode("LDA", AddressingMode::Indirect), None);
    assert_eq!(find_opcode("???", AddressingMode::Implicit), None);
}
