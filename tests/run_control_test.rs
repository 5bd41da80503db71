//! Tests for the run loops, host subroutine calls and determinism.

use beeb6502::{
    AddressSpace, CallArgs, ExecuteAction, ExecuteContext, ExecutionFault, Hook, HookResult,
    Register, StopReason, Trigger, CPU, RETURN_SENTINEL,
};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU {
    let mut memory = AddressSpace::new();
    memory.poke(0xFFFC, 0x00);
    memory.poke(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== run_for_cycles ==========

#[test]
fn test_run_for_cycles_overshoots_by_partial_instruction() {
    let mut cpu = setup_cpu();
    // LDA $1234 (4 cycles) repeated
    for i in 0..4u16 {
        cpu.memory_mut()
            .load(0x8000 + i * 3, &[0xAD, 0x34, 0x12])
            .unwrap();
    }

    let consumed = cpu.run_for_cycles(10).unwrap();

    assert_eq!(consumed, 12);
    assert_eq!(cpu.pc(), 0x8009);
}

#[test]
fn test_run_for_zero_cycles_does_nothing() {
    let mut cpu = setup_cpu();
    assert_eq!(cpu.run_for_cycles(0).unwrap(), 0);
    assert_eq!(cpu.pc(), 0x8000);
}

// ========== run_until ==========

#[test]
fn test_run_until_reaches_address() {
    let mut cpu = setup_cpu();
    // LDX #$03 / loop: DEX / BNE loop / BRK
    cpu.memory_mut()
        .load(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x00])
        .unwrap();

    let outcome = cpu.run_until(0x8005, None).unwrap();

    assert_eq!(outcome.reason, StopReason::ReachedAddress);
    assert_eq!(outcome.instructions, 1 + 3 * 2);
    assert_eq!(outcome.cycles, 2 + 3 * 2 + 2 * 3 + 2);
    assert_eq!(cpu.x(), 0);
}

#[test]
fn test_run_until_instruction_limit() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x4C, 0x00, 0x80]).unwrap(); // JMP *

    let outcome = cpu.run_until(0x9000, Some(5)).unwrap();

    assert_eq!(outcome.reason, StopReason::InstructionLimit);
    assert_eq!(outcome.instructions, 5);
    assert_eq!(outcome.cycles, 15);
}

#[test]
fn test_run_until_already_there() {
    let mut cpu = setup_cpu();
    let outcome = cpu.run_until(0x8000, Some(5)).unwrap();
    assert_eq!(outcome.instructions, 0);
    assert_eq!(outcome.reason, StopReason::ReachedAddress);
}

#[test]
fn test_stop_handle_from_hook() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x4C, 0x00, 0x80]).unwrap();
    let stop = cpu.stop_handle();
    let mut remaining = 3;
    cpu.memory_mut().register_hook(
        Trigger::Any,
        Hook::pre_execute(
            move |_: &mut AddressSpace, _: &mut ExecuteContext| -> HookResult<ExecuteAction> {
                remaining -= 1;
                if remaining == 0 {
                    stop.request();
                }
                Ok(ExecuteAction::Continue)
            },
        ),
    );

    let outcome = cpu.run_until(0x9000, None).unwrap();

    assert_eq!(outcome.reason, StopReason::Stopped);
    assert_eq!(outcome.instructions, 3);
    // The request is consumed by the loop that honoured it
    assert!(!cpu.stop_handle().is_requested());
}

#[test]
fn test_request_stop_before_run() {
    let mut cpu = setup_cpu();
    cpu.request_stop();
    let outcome = cpu.run_until(0x9000, None).unwrap();
    assert_eq!(outcome.reason, StopReason::Stopped);
    assert_eq!(outcome.instructions, 0);
}

// ========== call_subroutine ==========

#[test]
fn test_call_subroutine_returns_registers() {
    let mut cpu = setup_cpu();
    // $9000: TAX / INX / TXA / RTS
    cpu.memory_mut().load(0x9000, &[0xAA, 0xE8, 0x8A, 0x60]).unwrap();

    let result = cpu
        .call_subroutine(
            0x9000,
            CallArgs {
                a: Some(0x41),
                ..CallArgs::default()
            },
        )
        .unwrap();

    assert_eq!(result.a, 0x42);
    assert_eq!(result.x, 0x42);
    assert_eq!(result.pc, RETURN_SENTINEL);
    // Caller's PC and stack are back in place
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn test_call_subroutine_preserve_restores_registers() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x9000, &[0xA0, 0x07, 0x38, 0x60]).unwrap(); // LDY #7 / SEC / RTS
    cpu.set_y(0x01);

    let result = cpu
        .call_subroutine(
            0x9000,
            CallArgs {
                preserve: true,
                ..CallArgs::default()
            },
        )
        .unwrap();

    assert_eq!(result.y, 0x07);
    assert!(result.carry());
    assert_eq!(cpu.y(), 0x01);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_call_subroutine_aborted_by_stop() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x9000, &[0xEA, 0xEA, 0x60]).unwrap();
    cpu.memory_mut().register_hook(
        Trigger::Address(0x9001),
        Hook::pre_execute(
            |_: &mut AddressSpace, _: &mut ExecuteContext| -> HookResult<ExecuteAction> {
                Ok(ExecuteAction::Stop)
            },
        ),
    );

    let err = cpu.call_subroutine(0x9000, CallArgs::default()).unwrap_err();

    assert!(matches!(
        err,
        ExecutionFault::CallAborted {
            address: 0x9000,
            pc: 0x9001
        }
    ));
}

// ========== Snapshots and determinism ==========

#[test]
fn test_snapshot_round_trip() {
    let mut cpu = setup_cpu();
    let mut regs = cpu.register_snapshot();
    regs.a = 0x10;
    regs.x = 0x20;
    regs.pc = 0x1234;
    regs.set_carry(true);

    cpu.apply_snapshot(regs);

    assert_eq!(cpu.register_snapshot(), regs);
    assert_eq!(cpu.register(Register::PC), 0x1234);
    cpu.set_register(Register::A, 0x1FF);
    assert_eq!(cpu.a(), 0xFF);
}

fn trace_pcs(steps: usize) -> Vec<u16> {
    let mut cpu = setup_cpu();
    // A small loop that mixes memory, stack and subroutine traffic
    cpu.memory_mut()
        .load(
            0x8000,
            &[
                0xA2, 0x10, // LDX #$10
                0x8A, // TXA
                0x48, // PHA
                0x20, 0x20, 0x80, // JSR $8020
                0x68, // PLA
                0xCA, // DEX
                0xD0, 0xF7, // BNE $8002
                0x4C, 0x00, 0x80, // JMP $8000
            ],
        )
        .unwrap();
    cpu.memory_mut()
        .load(0x8020, &[0x95, 0x40, 0x69, 0x03, 0x60])
        .unwrap(); // STA $40,X / ADC #3 / RTS
    cpu.reset().unwrap();

    (0..steps)
        .map(|_| {
            cpu.step().unwrap();
            cpu.pc()
        })
        .collect()
}

#[test]
fn test_execution_is_deterministic() {
    let first = trace_pcs(500);
    let second = trace_pcs(500);
    assert_eq!(first, second);
    assert!(first.contains(&0x8020));
}
