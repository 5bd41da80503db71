//! Host OS call example
//!
//! Runs a small 6502 program that prints through OSWRCH ($FFEE) and reads a
//! byte through OSBYTE ($FFF4), with both entry points answered by Rust
//! closures registered as pre-execute hooks. A trace hook records every
//! instruction the CPU runs, and the disassembler lists the program.
//!
//! Run with: `cargo run --example host_call`

use beeb6502::{
    disassemble_memory, AddressSpace, CallArgs, ExecuteAction, ExecuteContext, Hook,
    HookResult, Registers, TraceHook, Trigger, CPU,
};
use std::cell::RefCell;
use std::rc::Rc;

const OSWRCH: u16 = 0xFFEE;
const OSBYTE: u16 = 0xFFF4;

/// Returns from an OS routine the way RTS would.
fn return_from_call(memory: &mut AddressSpace, regs: &mut Registers) -> HookResult<()> {
    let lo = memory.read(0x0100 | regs.sp.wrapping_add(1) as u16)?;
    let hi = memory.read(0x0100 | regs.sp.wrapping_add(2) as u16)?;
    regs.sp = regs.sp.wrapping_add(2);
    regs.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
    Ok(())
}

fn main() {
    println!("=== beeb6502 host call example ===\n");

    // Program at $1900:
    //   LDX #$00
    // loop:
    //   LDA msg,X
    //   BEQ done
    //   JSR OSWRCH
    //   INX
    //   BNE loop
    // done:
    //   LDA #$00       ; OSBYTE 0: machine type into X
    //   JSR OSBYTE
    //   RTS
    // msg: "HELLO", 13, 10, 0
    let mut program = vec![
        0xA2, 0x00, 0xBD, 0x16, 0x19, 0xF0, 0x06, 0x20, 0xEE, 0xFF, 0xE8, 0xD0, 0xF5, 0xA9,
        0x00, 0x20, 0xF4, 0xFF, 0x60, 0xEA, 0xEA, 0xEA,
    ];
    program.extend_from_slice(b"HELLO\r\n\0");

    let mut memory = AddressSpace::new();
    memory.load(0xFFFC, &[0x00, 0x19]).expect("vector fits");
    memory.load(0x1900, &program).expect("program fits");

    let output = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&output);
    memory.register_hook(
        Trigger::Address(OSWRCH),
        Hook::pre_execute(
            move |mem: &mut AddressSpace, ctx: &mut ExecuteContext| -> HookResult<ExecuteAction> {
                sink.borrow_mut().push(ctx.registers.a as char);
                return_from_call(mem, &mut ctx.registers)?;
                Ok(ExecuteAction::Continue)
            },
        ),
    );
    memory.register_hook(
        Trigger::Address(OSBYTE),
        Hook::pre_execute(
            |mem: &mut AddressSpace, ctx: &mut ExecuteContext| -> HookResult<ExecuteAction> {
                if ctx.registers.a == 0x00 {
                    ctx.registers.x = 0x01; // BBC Micro, OS 1.20
                }
                return_from_call(mem, &mut ctx.registers)?;
                Ok(ExecuteAction::Continue)
            },
        ),
    );

    let trace = Rc::new(RefCell::new(TraceHook::new(8)));
    memory.register_hook(Trigger::Any, Hook::PreExecute(trace.clone()));

    println!("Program listing:");
    for instr in disassemble_memory(&mut memory, 0x1900, 11) {
        println!("  {}", instr);
    }
    println!();

    let mut cpu = CPU::new(memory);
    match cpu.call_subroutine(0x1900, CallArgs::default()) {
        Ok(regs) => {
            println!("Output: {:?}", output.borrow());
            println!("OSBYTE 0 returned X={:#04X}", regs.x);
            println!("Registers after call: {}", regs);
        }
        Err(e) => {
            eprintln!("Execution failed: {}", e);
            return;
        }
    }

    println!("\nLast instructions executed ({} total):", trace.borrow().count());
    for line in trace.borrow().lines() {
        println!("  {}", line);
    }

    println!("\nCycles used: {}", cpu.cycles());
}
