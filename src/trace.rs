//! Instruction tracing.
//!
//! [`TraceHook`] is a pre-execute hook that renders every instruction the
//! CPU is about to run, logs it at `trace` level and keeps the most recent
//! lines for post-mortem dumps. It only observes; it never moves the PC.
//! Bytes are read the way the CPU will fetch them, so code served by
//! pre-read hooks is traced as it runs.
//!
//! ```
//! use beeb6502::{AddressSpace, Hook, TraceHook, Trigger, CPU};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut memory = AddressSpace::new();
//! memory.load(0xFFFC, &[0x00, 0x20]).unwrap();
//! memory.load(0x2000, &[0xA9, 0x41, 0xEA]).unwrap();
//!
//! let trace = Rc::new(RefCell::new(TraceHook::new(16)));
//! memory.register_hook(Trigger::Any, Hook::PreExecute(trace.clone()));
//!
//! let mut cpu = CPU::new(memory);
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! let trace = trace.borrow();
//! assert_eq!(trace.lines().collect::<Vec<_>>(), ["2000: A9 41    : LDA #$41", "2002: EA       : NOP"]);
//! ```

use crate::disassembler::{disassemble_one, format_instruction_with, HexNotation};
use crate::hooks::{ExecuteAction, ExecuteContext, ExecuteHook, HookResult};
use crate::memory::AddressSpace;
use std::collections::VecDeque;

/// Pre-execute hook that records `ADDR: BYTES : MNEMONIC OPERAND` lines.
#[derive(Debug, Clone)]
pub struct TraceHook {
    capacity: usize,
    lines: VecDeque<String>,
    notation: HexNotation,
    count: u64,
}

impl TraceHook {
    /// Keeps at most `capacity` lines (0 keeps none but still logs).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
            notation: HexNotation::Dollar,
            count: 0,
        }
    }

    pub fn with_notation(mut self, notation: HexNotation) -> Self {
        self.notation = notation;
        self
    }

    /// Retained lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Instructions seen since creation (not limited by capacity).
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn render(&self, memory: &mut AddressSpace, address: u16) -> String {
        let instr = disassemble_one(memory, address);
        let bytes = instr
            .bytes()
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{:04X}: {:<8} : {}",
            address,
            bytes,
            format_instruction_with(&instr, self.notation)
        )
    }
}

impl ExecuteHook for TraceHook {
    fn pre_execute(
        &mut self,
        memory: &mut AddressSpace,
        context: &mut ExecuteContext,
    ) -> HookResult<ExecuteAction> {
        let line = self.render(memory, context.address);
        log::trace!("{} | {}", line, context.registers);
        self.count += 1;
        if self.capacity > 0 {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line);
        }
        Ok(ExecuteAction::Continue)
    }
}
