//! WASM API for the 6502 core.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! memory access and disassembly.

use crate::{disassemble_memory, format_instruction, AddressSpace, ExecutionFault, CPU};
use wasm_bindgen::prelude::*;

/// Where `Emulator6502::new` points the reset vector.
const DEFAULT_PROGRAM_START: u16 = 0x1900;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ExecutionFault> for JsError {
    fn from(fault: ExecutionFault) -> Self {
        JsError::new(&fault.to_string())
    }
}

/// Result of disassembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    mnemonic: String,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mnemonic(&self) -> String {
        self.mnemonic.clone()
    }

    /// Full assembly text, e.g. `LDA #$41`
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
///
/// A flat 64KB address space with no hooks installed; the host loads a
/// program, steps it and inspects the result.
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU,
    program_start: u16,
    program_end: u16,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create an emulator whose reset vector points at $1900
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let mut memory = AddressSpace::new();
        let [lo, hi] = DEFAULT_PROGRAM_START.to_le_bytes();
        memory.poke(0xFFFC, lo);
        memory.poke(0xFFFD, hi);

        Emulator6502 {
            cpu: CPU::new(memory),
            program_start: DEFAULT_PROGRAM_START,
            program_end: DEFAULT_PROGRAM_START,
        }
    }

    /// Execute a single instruction, returning its cycle cost
    pub fn step(&mut self) -> Result<u32, JsError> {
        Ok(self.cpu.step()? as u32)
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        Ok(self.cpu.run_for_cycles(cycles as u64)? as u32)
    }

    /// Reset the CPU; memory contents are kept
    pub fn reset(&mut self) -> Result<(), JsError> {
        Ok(self.cpu.reset()?)
    }

    // Register getters

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    /// Cycle count as f64 (JavaScript numbers are f64)
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    pub fn set_irq_line(&mut self, active: bool) {
        self.cpu.set_irq_line(active);
    }

    pub fn trigger_nmi(&mut self) {
        self.cpu.trigger_nmi();
    }

    // Memory access methods; raw storage, no hooks

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().poke(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> js_sys::Uint8Array {
        let start = (page as usize) << 8;
        js_sys::Uint8Array::from(&self.cpu.memory().as_slice()[start..start + 256])
    }

    /// Load a program into memory and set PC
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) -> Result<(), JsError> {
        self.cpu
            .memory_mut()
            .load(start_addr, program)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.cpu.set_pc(start_addr);
        self.program_start = start_addr;
        self.program_end = start_addr.wrapping_add(program.len() as u16);
        Ok(())
    }

    /// Disassemble memory starting at an address
    pub fn disassemble(&mut self, start_addr: u16, num_instructions: u32) -> Vec<JsValue> {
        disassemble_memory(self.cpu.memory_mut(), start_addr, num_instructions as usize)
            .iter()
            .map(|instr| {
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes: instr.bytes(),
                    mnemonic: instr.mnemonic.to_string(),
                    text: format_instruction(instr),
                })
            })
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u16 {
        self.program_start
    }

    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u16 {
        self.program_end
    }
}

impl Default for Emulator6502 {
    fn default() -> Self {
        Self::new()
    }
}
