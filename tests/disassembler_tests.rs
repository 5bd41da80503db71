//! Integration tests for the disassembler.

use beeb6502::{
    disassemble, disassemble_line, disassemble_memory, disassemble_one, Access, AddressSpace,
    AddressingMode, DisassemblyOptions, ExecuteAction, ExecuteContext, HexNotation, Hook,
    HookResult, Registers, RomDevice, TraceHook, Trigger, CPU,
};
use std::cell::RefCell;
use std::rc::Rc;

fn lines(bytes: &[u8], start_address: u16) -> Vec<String> {
    let options = DisassemblyOptions {
        start_address,
        ..DisassemblyOptions::default()
    };
    disassemble(bytes, options)
        .iter()
        .map(|i| i.to_string())
        .collect()
}

#[test]
fn test_disassemble_program() {
    let program = [
        0xA2, 0x00, // LDX #$00
        0xBD, 0x10, 0x20, // LDA $2010,X
        0xF0, 0x06, // BEQ $200D
        0x20, 0xEE, 0xFF, // JSR $FFEE
        0xE8, // INX
        0xD0, 0xF5, // BNE $2002
        0x60, // RTS
    ];

    assert_eq!(
        lines(&program, 0x2000),
        [
            "2000: LDX #$00",
            "2002: LDA $2010,X",
            "2005: BEQ $200D",
            "2007: JSR $FFEE",
            "200A: INX",
            "200B: BNE $2002",
            "200D: RTS",
        ]
    );
}

#[test]
fn test_every_addressing_mode_renders() {
    let cases: [(&[u8], &str); 13] = [
        (&[0xEA], "NOP"),
        (&[0x4A], "LSR A"),
        (&[0x69, 0x7F], "ADC #$7F"),
        (&[0x65, 0x10], "ADC $10"),
        (&[0x75, 0x10], "ADC $10,X"),
        (&[0xB6, 0x10], "LDX $10,Y"),
        (&[0x6D, 0x00, 0x30], "ADC $3000"),
        (&[0x7D, 0x00, 0x30], "ADC $3000,X"),
        (&[0x79, 0x00, 0x30], "ADC $3000,Y"),
        (&[0x6C, 0x00, 0x30], "JMP ($3000)"),
        (&[0x61, 0x10], "ADC ($10,X)"),
        (&[0x71, 0x10], "ADC ($10),Y"),
        (&[0x10, 0x00], "BPL $1002"),
    ];

    for (bytes, expected) in cases {
        let instr = &disassemble(bytes, DisassemblyOptions {
            start_address: 0x1000,
            ..DisassemblyOptions::default()
        })[0];
        assert_eq!(beeb6502::format_instruction(instr), expected);
    }
}

#[test]
fn test_illegal_opcodes_render_placeholder() {
    assert_eq!(
        lines(&[0x02, 0x0C, 0x34, 0x12, 0xEA], 0x3000),
        ["3000: ??? $02", "3001: ??? $0C,$34,$12", "3004: NOP"]
    );
}

#[test]
fn test_disassemble_memory_follows_instruction_lengths() {
    let mut memory = AddressSpace::new();
    memory
        .load(0x1900, &[0xA9, 0x41, 0x8D, 0x00, 0x70, 0x60])
        .unwrap();

    let instrs = disassemble_memory(&mut memory, 0x1900, 3);

    let addresses: Vec<u16> = instrs.iter().map(|i| i.address).collect();
    assert_eq!(addresses, [0x1900, 0x1902, 0x1905]);
    assert_eq!(instrs[1].addressing_mode, AddressingMode::Absolute);
    assert_eq!(instrs[1].bytes(), vec![0x8D, 0x00, 0x70]);
    assert_eq!(instrs[2].mnemonic, "RTS");
}

#[test]
fn test_disassembly_leaves_machine_untouched() {
    let mut memory = AddressSpace::new();
    memory.load(0x2000, &[0xAD, 0x00, 0xFE]).unwrap();
    memory.register_hook(
        Trigger::Any,
        Hook::pre_execute(
            |_: &mut AddressSpace, _: &mut ExecuteContext| -> HookResult<ExecuteAction> {
                panic!("disassembly must not fire execute hooks");
            },
        ),
    );
    memory.register_hook(
        Trigger::Any,
        Hook::post_write(|_: &mut AddressSpace, _: &Access| -> HookResult<()> {
            panic!("disassembly must not fire write hooks");
        }),
    );
    let before = memory.as_slice().to_vec();

    let instr = disassemble_one(&mut memory, 0x2000);

    assert_eq!(instr.to_string(), "2000: LDA $FE00");
    assert_eq!(memory.as_slice(), before.as_slice());
}

#[test]
fn test_listing_matches_code_served_by_read_hook() {
    let mut memory = AddressSpace::new();
    memory.load(0xFFFC, &[0x00, 0x30]).unwrap();
    memory.register_hook(
        Trigger::range(0x3000, 0x3100).unwrap(),
        Hook::pre_read(|_: &mut AddressSpace, _: &Access| Ok(Some(0xEA))),
    );
    let mut cpu = CPU::new(memory);

    let listed = disassemble_one(cpu.memory_mut(), 0x3000);
    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x3000), 0x00);
    assert_eq!(listed.to_string(), "3000: NOP");
    assert_eq!(cycles, 2);
    assert_eq!(cpu.pc(), 0x3001);
}

#[test]
fn test_listing_matches_earliest_overlapping_rom() {
    let mut memory = AddressSpace::new();
    memory.load(0xFFFC, &[0x00, 0x20]).unwrap();
    memory
        .map_device(0x2000, Box::new(RomDevice::new(vec![0xEA; 0x100])))
        .unwrap();
    memory
        .map_device(0x2000, Box::new(RomDevice::new(vec![0xE8; 0x100])))
        .unwrap();
    let mut cpu = CPU::new(memory);

    let listed = disassemble_one(cpu.memory_mut(), 0x2000);
    cpu.step().unwrap();

    assert_eq!(listed.to_string(), "2000: NOP");
    assert_eq!(cpu.memory().peek(0x2000), 0xEA);
    assert_eq!(cpu.x(), 0x00);
}

#[test]
fn test_annotation_follows_hooked_pointer() {
    let mut memory = AddressSpace::new();
    memory.load(0x0070, &[0x00, 0x31]).unwrap();
    memory.load(0x1900, &[0xB1, 0x70]).unwrap(); // LDA ($70),Y
    memory.register_hook(
        Trigger::Address(0x0071),
        Hook::pre_read(|_: &mut AddressSpace, _: &Access| Ok(Some(0x40))),
    );
    let regs = Registers::default();
    let options = DisassemblyOptions {
        annotate: true,
        ..DisassemblyOptions::default()
    };

    assert_eq!(
        disassemble_line(&mut memory, 0x1900, &options, Some(&regs)),
        "1900: LDA ($70),Y -> $4000"
    );
}

#[test]
fn test_annotated_line_with_registers() {
    let mut memory = AddressSpace::new();
    memory.load(0x0070, &[0x00, 0x31]).unwrap();
    memory.load(0x1900, &[0x91, 0x70, 0xA9, 0x00]).unwrap(); // STA ($70),Y / LDA #0
    let regs = Registers {
        y: 0x04,
        ..Registers::default()
    };
    let options = DisassemblyOptions {
        notation: HexNotation::Ampersand,
        annotate: true,
        ..DisassemblyOptions::default()
    };

    assert_eq!(
        disassemble_line(&mut memory, 0x1900, &options, Some(&regs)),
        "1900: STA (&70),Y -> &3104"
    );
    // Nothing to annotate for immediate operands
    assert_eq!(
        disassemble_line(&mut memory, 0x1902, &options, Some(&regs)),
        "1902: LDA #&00"
    );
    // No registers, no annotation
    assert_eq!(
        disassemble_line(&mut memory, 0x1900, &options, None),
        "1900: STA (&70),Y"
    );
}

#[test]
fn test_trace_hook_records_executed_instructions() {
    let mut memory = AddressSpace::new();
    memory.load(0xFFFC, &[0x00, 0x20]).unwrap();
    memory
        .load(0x2000, &[0xA2, 0x02, 0xCA, 0xD0, 0xFD, 0x60])
        .unwrap();
    let trace = Rc::new(RefCell::new(TraceHook::new(3)));
    memory.register_hook(Trigger::Any, Hook::PreExecute(trace.clone()));
    let mut cpu = CPU::new(memory);

    cpu.run_until(0x2005, None).unwrap();

    let trace = trace.borrow();
    assert_eq!(trace.count(), 5);
    assert_eq!(
        trace.lines().collect::<Vec<_>>(),
        [
            "2003: D0 FD    : BNE $2002",
            "2002: CA       : DEX",
            "2003: D0 FD    : BNE $2002",
        ]
    );
}
