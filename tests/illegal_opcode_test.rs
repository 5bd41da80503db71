//! Tests for illegal opcode handling: a logged no-op, never a failure.

use beeb6502::{AddressSpace, CpuOptions, IllegalOpcode, OPCODE_TABLE, CPU};
use std::cell::RefCell;
use std::rc::Rc;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU {
    let mut memory = AddressSpace::new();
    memory.poke(0xFFFC, 0x00);
    memory.poke(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_illegal_opcode_is_a_one_byte_no_op() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().poke(0x8000, 0x02);
    cpu.set_a(0x12);
    cpu.set_x(0x34);
    cpu.set_y(0x56);
    let before = cpu.register_snapshot();

    let cycles = cpu.step().unwrap();

    let after = cpu.register_snapshot();
    assert_eq!(cycles, 1);
    assert_eq!(after.pc, 0x8001);
    assert_eq!(after.a, before.a);
    assert_eq!(after.x, before.x);
    assert_eq!(after.y, before.y);
    assert_eq!(after.sp, before.sp);
    assert_eq!(after.p, before.p);
}

#[test]
fn test_illegal_opcode_skips_known_operand_bytes() {
    let mut cpu = setup_cpu();
    // $0C is a three byte NOP on NMOS parts, $04 a two byte one
    cpu.memory_mut()
        .load(0x8000, &[0x0C, 0x00, 0x20, 0x04, 0x10, 0xEA])
        .unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8003);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8005);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_illegal_opcode_callback_receives_record() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEA, 0xFF, 0x00, 0x00]).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    cpu.on_illegal_opcode(move |record: &IllegalOpcode| log.borrow_mut().push(*record));

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![IllegalOpcode {
            pc: 0x8001,
            opcode: 0xFF,
            size_bytes: OPCODE_TABLE[0xFF].size_bytes,
        }]
    );
}

#[test]
fn test_run_continues_through_illegal_opcodes() {
    let mut memory = AddressSpace::new();
    memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
    // KIL-class bytes would lock real silicon; here they are skipped
    memory.load(0x8000, &[0x02, 0x12, 0x22, 0xA9, 0x41]).unwrap();
    let options = CpuOptions {
        log_illegal_opcodes: false,
        ..CpuOptions::default()
    };
    let mut cpu = CPU::with_options(memory, options);

    let outcome = cpu.run_until(0x8005, Some(10)).unwrap();

    assert_eq!(outcome.instructions, 4);
    assert_eq!(cpu.a(), 0x41);
    assert!(!cpu.options().log_illegal_opcodes);
}
