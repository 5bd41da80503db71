//! 6502 Disassembler Module
//!
//! Converts machine code into assembly text, either from a byte slice or
//! straight from an [`AddressSpace`].
//!
//! Bytes are taken with [`AddressSpace::observe`]: pre-read hooks are
//! resolved, so a ROM served by hooks is listed as the CPU fetches it, but
//! write and execute hooks never fire and a failing hook cannot abort a
//! listing.
//!
//! Lines render as `ADDR: MNEMONIC OPERAND`, e.g. `2000: LDA #$41`.
//! Undocumented opcodes render as `???` followed by their raw bytes and
//! consume their known length.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::memory::AddressSpace;
use crate::registers::Registers;
use std::fmt;

pub use formatter::{format_instruction, format_instruction_with, format_line, HexNotation};

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", "JMP"; "???" if undocumented)
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (excluding page-crossing penalties)
    pub base_cycles: u8,

    /// True for undocumented opcodes
    pub illegal: bool,
}

impl Instruction {
    /// Opcode followed by operand bytes.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size_bytes as usize);
        bytes.push(self.opcode);
        bytes.extend_from_slice(&self.operand_bytes);
        bytes
    }

    /// 16-bit operand value (the low byte alone for one-byte operands).
    pub fn operand_value(&self) -> u16 {
        match self.operand_bytes.as_slice() {
            [lo] => *lo as u16,
            [lo, hi] => u16::from_le_bytes([*lo, *hi]),
            _ => 0,
        }
    }

    /// Address of the next instruction in sequence.
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.size_bytes as u16)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04X}: {}", self.address, format_instruction(self))
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisassemblyOptions {
    /// Address of the first byte when disassembling a slice
    pub start_address: u16,

    /// `$` (6502 convention) or `&` (BBC Micro convention) hex prefix
    pub notation: HexNotation,

    /// Append `-> $XXXX` with the effective address where one can be
    /// computed from the registers
    pub annotate: bool,
}

impl Default for DisassemblyOptions {
    fn default() -> Self {
        Self {
            start_address: 0x0000,
            notation: HexNotation::Dollar,
            annotate: false,
        }
    }
}

/// Disassemble a byte slice into a vector of instructions
///
/// An instruction cut short by the end of the slice becomes a one-byte
/// `.byte` entry.
///
/// ```
/// use beeb6502::{disassemble, DisassemblyOptions};
///
/// let options = DisassemblyOptions { start_address: 0x2000, ..Default::default() };
/// let lines: Vec<String> = disassemble(&[0xA9, 0x41, 0x60], options)
///     .iter()
///     .map(|i| i.to_string())
///     .collect();
/// assert_eq!(lines, ["2000: LDA #$41", "2002: RTS"]);
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = options.start_address;

    while pc < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[pc..], address)
            .unwrap_or_else(|| decoder::byte_directive(bytes[pc], address));
        pc += instr.size_bytes as usize;
        address = instr.next_address();
        instructions.push(instr);
    }

    instructions
}

/// Decodes the instruction stored at `address`.
///
/// Operand bytes wrap from $FFFF to $0000. Never fails: every opcode byte
/// has a table entry. Only the bytes the instruction occupies are read.
pub fn disassemble_one(memory: &mut AddressSpace, address: u16) -> Instruction {
    let opcode = memory.observe(address);
    let mut window = [opcode, 0, 0];
    let size = crate::opcodes::lookup(opcode).size_bytes as usize;
    for (offset, byte) in window.iter_mut().enumerate().take(size).skip(1) {
        *byte = memory.observe(address.wrapping_add(offset as u16));
    }
    decoder::decode_instruction(&window[..size], address)
        .unwrap_or_else(|| decoder::byte_directive(opcode, address))
}

/// Decodes `count` consecutive instructions starting at `address`.
pub fn disassemble_memory(
    memory: &mut AddressSpace,
    address: u16,
    count: usize,
) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(count);
    let mut address = address;
    for _ in 0..count {
        let instr = disassemble_one(memory, address);
        address = instr.next_address();
        out.push(instr);
    }
    out
}

/// Effective address `instr` would access with `registers`, for the modes
/// where it is not evident from the operand text.
///
/// Pointers are read with [`AddressSpace::observe`]. Zero page indexing and
/// pointer fetches wrap within page zero; `JMP ($xxFF)` reproduces the NMOS
/// page-wrap.
pub fn effective_address(
    memory: &mut AddressSpace,
    instr: &Instruction,
    registers: &Registers,
) -> Option<u16> {
    if instr.illegal || instr.operand_bytes.len() < instr.addressing_mode.operand_len() as usize {
        return None;
    }
    let operand = instr.operand_value();
    let zp = operand as u8;

    match instr.addressing_mode {
        AddressingMode::ZeroPageX => Some(zp.wrapping_add(registers.x) as u16),
        AddressingMode::ZeroPageY => Some(zp.wrapping_add(registers.y) as u16),
        AddressingMode::AbsoluteX => Some(operand.wrapping_add(registers.x as u16)),
        AddressingMode::AbsoluteY => Some(operand.wrapping_add(registers.y as u16)),
        AddressingMode::Indirect => {
            let hi_addr = (operand & 0xFF00) | (operand.wrapping_add(1) & 0x00FF);
            Some(u16::from_le_bytes([memory.observe(operand), memory.observe(hi_addr)]))
        }
        AddressingMode::IndirectX => Some(zero_page_word(memory, zp.wrapping_add(registers.x))),
        AddressingMode::IndirectY => {
            Some(zero_page_word(memory, zp).wrapping_add(registers.y as u16))
        }
        _ => None,
    }
}

/// Pointer at `ptr`, with the high byte wrapping within page zero.
fn zero_page_word(memory: &mut AddressSpace, ptr: u8) -> u16 {
    u16::from_le_bytes([
        memory.observe(ptr as u16),
        memory.observe(ptr.wrapping_add(1) as u16),
    ])
}

/// Renders the instruction at `address` as one line, honouring `options`.
///
/// With `options.annotate` and a register snapshot, indexed and indirect
/// operands get a `-> $XXXX` effective-address suffix.
///
/// ```
/// use beeb6502::{disassemble_line, AddressSpace, DisassemblyOptions, HexNotation, Registers};
///
/// let mut memory = AddressSpace::new();
/// memory.load(0x1900, &[0xBD, 0x00, 0x30]).unwrap(); // LDA $3000,X
/// let regs = Registers { x: 0x05, ..Registers::default() };
/// let options = DisassemblyOptions {
///     notation: HexNotation::Ampersand,
///     annotate: true,
///     ..Default::default()
/// };
/// assert_eq!(
///     disassemble_line(&mut memory, 0x1900, &options, Some(&regs)),
///     "1900: LDA &3000,X -> &3005"
/// );
/// ```
pub fn disassemble_line(
    memory: &mut AddressSpace,
    address: u16,
    options: &DisassemblyOptions,
    registers: Option<&Registers>,
) -> String {
    let instr = disassemble_one(memory, address);
    let annotation = match registers {
        Some(regs) if options.annotate => effective_address(memory, &instr, regs),
        _ => None,
    };
    format_line(&instr, options.notation, annotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_empty() {
        let bytes = &[];
        let instructions = disassemble(bytes, DisassemblyOptions::default());
        assert_eq!(instructions.len(), 0);
    }

    #[test]
    fn test_truncated_instruction_becomes_byte_directive() {
        let instructions = disassemble(&[0xEA, 0xAD, 0x00], DisassemblyOptions::default());
        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[1].mnemonic, ".byte");
        assert_eq!(instructions[1].to_string(), "0001: .byte $AD");
    }

    #[test]
    fn test_disassemble_one_wraps_operands() {
        let mut memory = AddressSpace::new();
        memory.poke(0xFFFF, 0x4C); // JMP $1234 with operands at $0000-$0001
        memory.poke(0x0000, 0x34);
        memory.poke(0x0001, 0x12);
        let instr = disassemble_one(&mut memory, 0xFFFF);
        assert_eq!(instr.to_string(), "FFFF: JMP $1234");
        assert_eq!(instr.next_address(), 0x0002);
    }

    #[test]
    fn test_effective_address_zero_page_wrap() {
        let mut memory = AddressSpace::new();
        memory.load(0x2000, &[0xB5, 0xFF]).unwrap(); // LDA $FF,X
        let regs = Registers {
            x: 0x01,
            ..Registers::default()
        };
        let instr = disassemble_one(&mut memory, 0x2000);
        assert_eq!(effective_address(&mut memory, &instr, &regs), Some(0x0000));
    }

    #[test]
    fn test_effective_address_indirect_modes() {
        let mut memory = AddressSpace::new();
        memory.load(0x0080, &[0x00, 0x40]).unwrap();
        memory.load(0x0000, &[0x78]).unwrap();
        memory.poke(0x00FF, 0x56);
        let regs = Registers {
            x: 0x02,
            y: 0x10,
            ..Registers::default()
        };

        memory.load(0x2000, &[0xB1, 0x80]).unwrap(); // LDA ($80),Y
        let instr = disassemble_one(&mut memory, 0x2000);
        assert_eq!(effective_address(&mut memory, &instr, &regs), Some(0x4010));

        memory.load(0x2000, &[0xA1, 0x7E]).unwrap(); // LDA ($7E,X)
        let instr = disassemble_one(&mut memory, 0x2000);
        assert_eq!(effective_address(&mut memory, &instr, &regs), Some(0x4000));

        memory.load(0x2000, &[0xB1, 0xFF]).unwrap(); // pointer straddles $FF/$00
        let instr = disassemble_one(&mut memory, 0x2000);
        assert_eq!(effective_address(&mut memory, &instr, &regs), Some(0x7866));
    }

    #[test]
    fn test_disassemble_lists_hooked_bytes() {
        use crate::hooks::{Access, Hook, Trigger};

        let mut memory = AddressSpace::new();
        memory.register_hook(
            Trigger::range(0x3000, 0x3100).unwrap(),
            Hook::pre_read(|_: &mut AddressSpace, _: &Access| Ok(Some(0xEA))),
        );

        assert_eq!(memory.peek(0x3000), 0x00);
        assert_eq!(disassemble_one(&mut memory, 0x3000).to_string(), "3000: NOP");
    }

    #[test]
    fn test_disassemble_fires_no_execute_or_write_hooks() {
        use crate::hooks::{Access, ExecuteAction, ExecuteContext, Hook, Trigger};
        use std::cell::Cell;
        use std::rc::Rc;

        let fired = Rc::new(Cell::new(0));
        let on_execute = Rc::clone(&fired);
        let on_write = Rc::clone(&fired);
        let mut memory = AddressSpace::new();
        memory.register_hook(
            Trigger::Any,
            Hook::pre_execute(move |_: &mut AddressSpace, _: &mut ExecuteContext| {
                on_execute.set(on_execute.get() + 1);
                Ok(ExecuteAction::Continue)
            }),
        );
        memory.register_hook(
            Trigger::Any,
            Hook::post_write(move |_: &mut AddressSpace, _: &Access| {
                on_write.set(on_write.get() + 1);
                Ok(())
            }),
        );
        memory.load(0x3000, &[0xA9, 0x41]).unwrap();

        let instr = disassemble_one(&mut memory, 0x3000);
        assert_eq!(instr.mnemonic, "LDA");
        assert_eq!(fired.get(), 0);
    }
}
