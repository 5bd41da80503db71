//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, SP, PC and the status flags, held as a [`Registers`] value
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Interrupt lines**: level-sensitive IRQ and edge-triggered NMI
//! - **Address space**: the CPU owns its [`AddressSpace`]; every access goes through its hooks
//!
//! ## Execution Model
//!
//! Each `step()`:
//! 1. Runs pre-execute hooks for the current PC. A hook that moves the PC
//!    replaces the instruction and the step continues at 4; one that returns
//!    [`ExecuteAction::Stop`] ends the step there.
//! 2. Fetches the opcode and its operand bytes through hooked reads and
//!    advances PC past them.
//! 3. Executes the operation (see `instructions`), adding base cycles plus any
//!    page-crossing or branch penalty.
//! 4. Services a pending NMI, or an IRQ if interrupts are enabled.
//!
//! A step either completes or fails with an [`ExecutionFault`]; on failure the
//! register file and cycle counter are restored to their pre-step values.
//! Memory writes committed before the failure are not undone.
//!
//! Run loops (`run_for_cycles`, `run_until`, `call_subroutine`) are built on
//! `step()` and honour stop requests from hooks.

use crate::error::{ExecutionFault, HookFault, IllegalOpcode};
use crate::hooks::ExecuteAction;
use crate::instructions::{self, Decoded};
use crate::memory::AddressSpace;
use crate::opcodes::lookup;
use crate::registers::{Register, Registers, Status};
use std::cell::Cell;
use std::rc::Rc;

/// NMI vector
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Address `call_subroutine` returns to. Its RTS target is pushed as
/// `RETURN_SENTINEL - 1`.
pub const RETURN_SENTINEL: u16 = 0xFFFF;

/// Cycles taken to service an IRQ or NMI.
pub const INTERRUPT_CYCLES: u64 = 7;

/// Knobs for CPU behaviour that is not fixed by the instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuOptions {
    /// Emit a `log::warn!` line for every illegal opcode executed
    pub log_illegal_opcodes: bool,
    /// Stack pointer value after power-on and `reset()`
    pub reset_stack_pointer: u8,
}

impl Default for CpuOptions {
    fn default() -> Self {
        Self {
            log_illegal_opcodes: true,
            reset_stack_pointer: 0xFD,
        }
    }
}

/// Why a run loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// PC reached the requested address
    ReachedAddress,
    /// The instruction limit was used up
    InstructionLimit,
    /// A hook or host code requested a stop
    Stopped,
}

/// Summary of a `run_until` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Steps executed (including steps a pre-execute hook took over)
    pub instructions: u64,
    /// Cycles consumed
    pub cycles: u64,
    pub reason: StopReason,
}

/// Arguments for [`CPU::call_subroutine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallArgs {
    /// Accumulator on entry; `None` leaves it as it is
    pub a: Option<u8>,
    pub x: Option<u8>,
    pub y: Option<u8>,
    /// Restore every register (including PC and SP) once the call returns
    pub preserve: bool,
}

/// Shared stop flag. Clone it into a hook to halt a run loop from inside.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    /// Asks the current (or next) run loop to return.
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }

    fn take(&self) -> bool {
        self.0.replace(false)
    }
}

type IllegalOpcodeHandler = Box<dyn FnMut(&IllegalOpcode)>;

/// 6502 CPU state and execution context.
///
/// # Examples
///
/// ```
/// use beeb6502::{AddressSpace, CPU};
///
/// // Create memory and set reset vector
/// let mut memory = AddressSpace::new();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap(); // PC = 0x8000
///
/// // Initialize CPU - loads PC from reset vector
/// let mut cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i()); // Interrupt disable set on reset
/// assert_eq!(cpu.cycles(), 0);
///
/// // LDA #$41
/// cpu.memory_mut().load(0x8000, &[0xA9, 0x41]).unwrap();
/// assert_eq!(cpu.step().unwrap(), 2);
/// assert_eq!(cpu.a(), 0x41);
/// ```
pub struct CPU {
    pub(crate) regs: Registers,
    /// Total CPU cycles executed
    pub(crate) cycles: u64,
    pub(crate) memory: AddressSpace,
    irq_line: bool,
    nmi_pending: bool,
    options: CpuOptions,
    stop: StopHandle,
    illegal_handler: Option<IllegalOpcodeHandler>,
}

impl CPU {
    /// Creates a CPU in the power-on state.
    ///
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (raw storage, no hooks)
    /// - SP is 0xFD
    /// - Interrupt Disable is set, every other flag clear
    /// - A, X, Y are zero and the cycle counter is 0
    pub fn new(memory: AddressSpace) -> Self {
        Self::with_options(memory, CpuOptions::default())
    }

    /// Like [`CPU::new`], with explicit options.
    pub fn with_options(memory: AddressSpace, options: CpuOptions) -> Self {
        let regs = Registers {
            pc: memory.peek_word(RESET_VECTOR),
            sp: options.reset_stack_pointer,
            p: Status::INTERRUPT_DISABLE,
            ..Registers::default()
        };
        let mut cpu = Self {
            regs,
            cycles: 0,
            memory,
            irq_line: false,
            nmi_pending: false,
            options,
            stop: StopHandle::default(),
            illegal_handler: None,
        };
        cpu.memory.set_context(cpu.regs);
        cpu
    }

    /// Resets the CPU: power-on register state, PC from the reset vector.
    ///
    /// The vector is read through the hook layer, so a ROM overlay or a
    /// host hook can supply it. Pending interrupts are dropped. The cycle
    /// counter is left alone.
    pub fn reset(&mut self) -> Result<(), ExecutionFault> {
        let pc = self
            .read_word(RESET_VECTOR)
            .map_err(|fault| self.fault_at(RESET_VECTOR, fault))?;
        self.regs = Registers {
            pc,
            sp: self.options.reset_stack_pointer,
            p: Status::INTERRUPT_DISABLE,
            ..Registers::default()
        };
        self.irq_line = false;
        self.nmi_pending = false;
        self.memory.set_context(self.regs);
        log::debug!("reset: PC=${:04X}", pc);
        Ok(())
    }

    /// Executes one instruction and returns the cycles it consumed.
    ///
    /// A pre-execute hook that moves the PC takes over the instruction: it
    /// costs no cycles, and a pending NMI or an unmasked IRQ is then serviced
    /// exactly as after an executed instruction. A hook that returns
    /// [`ExecuteAction::Stop`] freezes the CPU at the fetch address with
    /// interrupts left pending; the step returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// [`ExecutionFault::Hook`] if any hook fails during the step. Registers,
    /// cycle counter and interrupt state are then exactly as before the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use beeb6502::{AddressSpace, CPU};
    ///
    /// let mut mem = AddressSpace::new();
    /// mem.load(0xFFFC, &[0x00, 0x80]).unwrap();
    /// mem.poke(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.step().unwrap(), 2);
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> Result<u64, ExecutionFault> {
        let start_regs = self.regs;
        let start_cycles = self.cycles;
        let start_nmi = self.nmi_pending;

        match self.execute_one() {
            Ok(()) => {
                self.memory.set_context(self.regs);
                Ok(self.cycles - start_cycles)
            }
            Err(fault) => {
                self.regs = start_regs;
                self.cycles = start_cycles;
                self.nmi_pending = start_nmi;
                self.memory.set_context(start_regs);
                Err(self.fault_at(start_regs.pc, fault))
            }
        }
    }

    fn execute_one(&mut self) -> Result<(), HookFault> {
        let address = self.regs.pc;
        self.memory.set_context(self.regs);

        let mut regs = self.regs;
        let action = self.memory.fire_execute(&mut regs)?;
        self.regs = regs;
        if action == ExecuteAction::Stop {
            self.stop.request();
            return Ok(());
        }
        if self.regs.pc != address {
            return self.service_interrupts();
        }

        let opcode = self.read(address)?;
        let metadata = lookup(opcode);
        let mut operand = 0u16;
        for i in 1..metadata.size_bytes {
            let byte = self.read(address.wrapping_add(i as u16))?;
            operand |= (byte as u16) << (8 * (i - 1));
        }
        self.regs.pc = address.wrapping_add(metadata.size_bytes as u16);
        self.cycles += metadata.base_cycles as u64;

        let decoded = Decoded {
            address,
            opcode,
            metadata,
            operand,
        };
        if metadata.is_illegal() {
            self.report_illegal(&decoded);
        } else {
            instructions::execute(self, &decoded)?;
        }

        self.service_interrupts()
    }

    fn report_illegal(&mut self, decoded: &Decoded) {
        let record = IllegalOpcode {
            pc: decoded.address,
            opcode: decoded.opcode,
            size_bytes: decoded.metadata.size_bytes,
        };
        if self.options.log_illegal_opcodes {
            log::warn!(
                "illegal opcode ${:02X} at ${:04X}, skipping {} byte(s)",
                record.opcode,
                record.pc,
                record.size_bytes
            );
        }
        if let Some(handler) = self.illegal_handler.as_mut() {
            handler(&record);
        }
    }

    fn service_interrupts(&mut self) -> Result<(), HookFault> {
        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(NMI_VECTOR)
        } else if self.irq_line && !self.regs.interrupt_disable() {
            self.interrupt(IRQ_VECTOR)
        } else {
            Ok(())
        }
    }

    /// Hardware interrupt entry: B is clear in the pushed status.
    fn interrupt(&mut self, vector: u16) -> Result<(), HookFault> {
        let return_pc = self.regs.pc;
        self.push_word(return_pc)?;
        let status = self.regs.status_byte() & !Status::BREAK.bits();
        self.push_byte(status)?;
        self.regs.set_interrupt_disable(true);
        self.regs.pc = self.read_word(vector)?;
        self.cycles += INTERRUPT_CYCLES;
        log::debug!(
            "interrupt via ${:04X}: ${:04X} -> ${:04X}",
            vector,
            return_pc,
            self.regs.pc
        );
        Ok(())
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted, a stop is
    /// requested or an error occurs. Returns the cycles actually consumed
    /// (may overshoot the budget by part of an instruction).
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionFault> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            if self.stop.take() {
                break;
            }
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Runs until PC equals `until`, `max_instructions` steps have run, or a
    /// stop is requested, whichever comes first.
    ///
    /// PC is checked before each step, so a run that starts at `until`
    /// returns immediately.
    pub fn run_until(
        &mut self,
        until: u16,
        max_instructions: Option<u64>,
    ) -> Result<RunOutcome, ExecutionFault> {
        let start_cycles = self.cycles;
        let mut instructions = 0u64;

        let reason = loop {
            if self.stop.take() {
                break StopReason::Stopped;
            }
            if self.regs.pc == until {
                break StopReason::ReachedAddress;
            }
            if max_instructions.is_some_and(|max| instructions >= max) {
                break StopReason::InstructionLimit;
            }
            self.step()?;
            instructions += 1;
        };

        Ok(RunOutcome {
            instructions,
            cycles: self.cycles - start_cycles,
            reason,
        })
    }

    /// Calls a 6502 subroutine from host code and runs it to completion.
    ///
    /// Pushes the current PC, then a return address that makes the routine's
    /// final RTS land on [`RETURN_SENTINEL`], and runs until it does. The
    /// saved PC is then pulled back. Returns the registers as the routine
    /// left them (PC reads as the sentinel).
    ///
    /// # Errors
    ///
    /// [`ExecutionFault::CallAborted`] if a stop was requested before the
    /// routine returned; any fault raised while executing it.
    pub fn call_subroutine(
        &mut self,
        address: u16,
        args: CallArgs,
    ) -> Result<Registers, ExecutionFault> {
        let saved = self.regs;
        let caller_pc = saved.pc;

        if let Some(a) = args.a {
            self.regs.a = a;
        }
        if let Some(x) = args.x {
            self.regs.x = x;
        }
        if let Some(y) = args.y {
            self.regs.y = y;
        }
        let pushed = match self.push_word(caller_pc) {
            Ok(()) => self.push_word(RETURN_SENTINEL.wrapping_sub(1)),
            Err(fault) => Err(fault),
        };
        if let Err(fault) = pushed {
            self.regs = saved;
            return Err(self.fault_at(caller_pc, fault));
        }
        self.regs.pc = address;
        log::debug!("host call to ${:04X}", address);

        let outcome = self.run_until(RETURN_SENTINEL, None)?;
        if outcome.reason != StopReason::ReachedAddress {
            return Err(ExecutionFault::CallAborted {
                address,
                pc: self.regs.pc,
            });
        }

        let result = self.regs;
        self.regs.pc = self
            .pull_word()
            .map_err(|fault| self.fault_at(RETURN_SENTINEL, fault))?;
        if args.preserve {
            self.regs = saved;
        }
        self.memory.set_context(self.regs);
        Ok(result)
    }

    /// Asks the running (or next) run loop to return with
    /// [`StopReason::Stopped`].
    pub fn request_stop(&self) {
        self.stop.request();
    }

    /// A handle hooks can capture to request a stop.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Drives the level-sensitive IRQ line.
    pub fn set_irq_line(&mut self, active: bool) {
        self.irq_line = active;
    }

    pub fn irq_line(&self) -> bool {
        self.irq_line
    }

    /// Latches an NMI edge; it is serviced after the next instruction.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Installs a callback told about every illegal opcode executed.
    pub fn on_illegal_opcode<F>(&mut self, handler: F)
    where
        F: FnMut(&IllegalOpcode) + 'static,
    {
        self.illegal_handler = Some(Box::new(handler));
    }

    pub fn options(&self) -> &CpuOptions {
        &self.options
    }

    // ========== Stack ==========

    /// Pushes a byte onto the page 1 stack (hooked write).
    pub fn push_byte(&mut self, value: u8) -> Result<(), HookFault> {
        self.write(self.regs.stack_address(), value)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        Ok(())
    }

    /// Pulls a byte from the page 1 stack (hooked read).
    pub fn pull_byte(&mut self) -> Result<u8, HookFault> {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.read(self.regs.stack_address())
    }

    /// Pushes a word, high byte first.
    pub fn push_word(&mut self, value: u16) -> Result<(), HookFault> {
        let [lo, hi] = value.to_le_bytes();
        self.push_byte(hi)?;
        self.push_byte(lo)
    }

    /// Pulls a word, low byte first.
    pub fn pull_word(&mut self) -> Result<u16, HookFault> {
        let lo = self.pull_byte()?;
        let hi = self.pull_byte()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    // ========== Memory access used by instructions ==========

    /// Hooked read with the live register file as hook context.
    pub(crate) fn read(&mut self, address: u16) -> Result<u8, HookFault> {
        self.memory.read_with(address, &self.regs)
    }

    pub(crate) fn write(&mut self, address: u16, value: u8) -> Result<(), HookFault> {
        self.memory.write_with(address, value, &self.regs)
    }

    pub(crate) fn read_word(&mut self, address: u16) -> Result<u16, HookFault> {
        let lo = self.read(address)?;
        let hi = self.read(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn fault_at(&self, pc: u16, fault: HookFault) -> ExecutionFault {
        ExecutionFault::Hook {
            pc,
            opcode: self.memory.peek(pc),
            fault,
        }
    }

    // ========== Memory ==========

    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    /// Mutable access to the address space (loading images, registering hooks).
    pub fn memory_mut(&mut self) -> &mut AddressSpace {
        &mut self.memory
    }

    /// Consumes the CPU, handing back its address space.
    pub fn into_memory(self) -> AddressSpace {
        self.memory
    }

    // ========== Register Snapshots ==========

    /// Copy of the complete register file.
    pub fn register_snapshot(&self) -> Registers {
        self.regs
    }

    /// Replaces the complete register file.
    pub fn apply_snapshot(&mut self, registers: Registers) {
        self.regs = registers;
        self.memory.set_context(registers);
    }

    /// Reads a register by id.
    pub fn register(&self, register: Register) -> u16 {
        self.regs.get(register)
    }

    /// Writes a register by id, masked to the register's width.
    pub fn set_register(&mut self, register: Register, value: u16) {
        self.regs.set(register, value);
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC, bit 5 always 1).
    pub fn status(&self) -> u8 {
        self.regs.status_byte()
    }

    /// Returns the total number of CPU cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.regs.negative()
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.regs.overflow()
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.regs.brk()
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.regs.decimal()
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.regs.interrupt_disable()
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.regs.zero()
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.regs.carry()
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    /// Sets every flag from a packed status byte.
    pub fn set_status(&mut self, value: u8) {
        self.regs.set_status_byte(value);
    }

    pub fn set_cycles(&mut self, cycles: u64) {
        self.cycles = cycles;
    }

    pub fn set_flag_n(&mut self, on: bool) {
        self.regs.set_negative(on);
    }

    pub fn set_flag_v(&mut self, on: bool) {
        self.regs.set_overflow(on);
    }

    pub fn set_flag_b(&mut self, on: bool) {
        self.regs.set_brk(on);
    }

    pub fn set_flag_d(&mut self, on: bool) {
        self.regs.set_decimal(on);
    }

    pub fn set_flag_i(&mut self, on: bool) {
        self.regs.set_interrupt_disable(on);
    }

    pub fn set_flag_z(&mut self, on: bool) {
        self.regs.set_zero(on);
    }

    pub fn set_flag_c(&mut self, on: bool) {
        self.regs.set_carry(on);
    }
}

impl std::fmt::Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("regs", &self.regs)
            .field("cycles", &self.cycles)
            .field("irq_line", &self.irq_line)
            .field("nmi_pending", &self.nmi_pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with_reset(pc: u16) -> AddressSpace {
        let mut mem = AddressSpace::new();
        mem.load(RESET_VECTOR, &pc.to_le_bytes()).unwrap();
        mem
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = CPU::new(memory_with_reset(0x8000));

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);

        assert!(cpu.flag_i());
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_v());
        assert!(!cpu.flag_b());
        assert!(!cpu.flag_d());
        assert!(!cpu.flag_z());
        assert!(!cpu.flag_c());
    }

    #[test]
    fn test_status_register_packing() {
        let cpu = CPU::new(memory_with_reset(0x8000));
        let status = cpu.status();

        assert_eq!(status & 0b0010_0000, 0b0010_0000); // Bit 5
        assert_eq!(status & 0b0000_0100, 0b0000_0100); // I flag
    }

    #[test]
    fn test_reset_restores_power_on_state() {
        let mut cpu = CPU::with_options(
            memory_with_reset(0xC000),
            CpuOptions {
                reset_stack_pointer: 0xFF,
                ..CpuOptions::default()
            },
        );
        cpu.set_a(0x12);
        cpu.set_flag_d(true);
        cpu.set_flag_i(false);
        cpu.set_pc(0x1234);
        cpu.trigger_nmi();

        cpu.reset().unwrap();

        assert_eq!(cpu.pc(), 0xC000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.flag_i());
        assert!(!cpu.flag_d());
    }

    #[test]
    fn test_stack_push_pull_word() {
        let mut cpu = CPU::new(memory_with_reset(0x8000));
        cpu.push_word(0xBEEF).unwrap();
        assert_eq!(cpu.sp(), 0xFB);
        assert_eq!(cpu.memory().peek(0x01FD), 0xBE);
        assert_eq!(cpu.memory().peek(0x01FC), 0xEF);
        assert_eq!(cpu.pull_word().unwrap(), 0xBEEF);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn test_stack_pointer_wraps_within_page_one() {
        let mut cpu = CPU::new(memory_with_reset(0x8000));
        cpu.set_sp(0x00);
        cpu.push_byte(0x42).unwrap();
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().peek(0x0100), 0x42);
        assert_eq!(cpu.pull_byte().unwrap(), 0x42);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_run_for_cycles() {
        let mut mem = memory_with_reset(0x8000);
        mem.load(0x8000, &[0xEA; 0x20]).unwrap();

        let mut cpu = CPU::new(mem);
        assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
        assert_eq!(cpu.pc(), 0x8005);
    }

    #[test]
    fn test_request_stop_before_run() {
        let mut mem = memory_with_reset(0x8000);
        mem.load(0x8000, &[0xEA; 0x20]).unwrap();

        let mut cpu = CPU::new(mem);
        cpu.request_stop();
        let outcome = cpu.run_until(0x9000, None).unwrap();
        assert_eq!(outcome.reason, StopReason::Stopped);
        assert_eq!(outcome.instructions, 0);
        assert!(!cpu.stop_handle().is_requested());
    }
}
