//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the slice disassembler and
//! to the address-space disassembler to find edge cases and crashes in
//! instruction decoding and formatting.

#![no_main]

use arbitrary::Arbitrary;
use beeb6502::{
    disassemble, disassemble_line, AddressSpace, DisassemblyOptions, HexNotation, Registers,
};
use libfuzzer_sys::fuzz_target;

/// Disassembly options for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzOptions {
    start_address: u16,
    ampersand: bool,
    annotate: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    options: FuzzOptions,
    x: u8,
    y: u8,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.options.start_address,
        notation: if input.options.ampersand {
            HexNotation::Ampersand
        } else {
            HexNotation::Dollar
        },
        annotate: input.options.annotate,
    };

    let instructions = disassemble(&input.bytes, options);

    // Every byte is accounted for, in order
    let mut total_size: usize = 0;
    let mut expected_address = input.options.start_address;
    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!(instr.size_bytes >= 1 && instr.size_bytes <= 3);
        assert_eq!(instr.bytes().len(), instr.size_bytes as usize);
        total_size += instr.size_bytes as usize;
        expected_address = instr.next_address();
    }
    assert_eq!(total_size, input.bytes.len());

    // Rendering straight from memory never panics and never changes it
    let mut memory = AddressSpace::new();
    let len = input.bytes.len().min(0x1_0000 - input.options.start_address as usize);
    memory
        .load(input.options.start_address, &input.bytes[..len])
        .unwrap();
    let regs = Registers {
        x: input.x,
        y: input.y,
        ..Registers::default()
    };
    let snapshot = memory.as_slice().to_vec();
    for instr in instructions.iter().take(64) {
        let line = disassemble_line(&mut memory, instr.address, &options, Some(&regs));
        assert!(line.starts_with(&format!("{:04X}: ", instr.address)));
    }
    assert_eq!(memory.as_slice(), snapshot.as_slice());
});
