//! # Register File
//!
//! The 6502 register file as a plain `Copy` value. The CPU owns one, hooks
//! receive copies of it, and `register_snapshot()`/`apply_snapshot()` move it
//! in and out of the CPU wholesale.
//!
//! All 8-bit registers are `u8` and the program counter is `u16`, so the
//! wraparound rules (modulo 256 / modulo 65536) fall out of the types as long
//! as arithmetic uses the `wrapping_*` operations.

use bitflags::bitflags;

bitflags! {
    /// Processor status register (NV-BDIZC).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry
        const CARRY = 0b0000_0001;
        /// Zero
        const ZERO = 0b0000_0010;
        /// Interrupt disable
        const INTERRUPT_DISABLE = 0b0000_0100;
        /// Decimal (BCD) mode
        const DECIMAL = 0b0000_1000;
        /// Break
        const BREAK = 0b0001_0000;
        /// Unused, always reads as 1
        const UNUSED = 0b0010_0000;
        /// Overflow
        const OVERFLOW = 0b0100_0000;
        /// Negative
        const NEGATIVE = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::empty()
    }
}

/// Identifies a single register for id-based access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Program counter (16-bit)
    PC,
    /// Stack pointer
    SP,
    /// Accumulator
    A,
    /// X index
    X,
    /// Y index
    Y,
    /// Processor status
    PS,
}

/// Snapshot of the complete register file.
///
/// # Examples
///
/// ```
/// use beeb6502::{Registers, Status};
///
/// let mut regs = Registers::default();
/// regs.set_zn(0x80);
/// assert!(regs.negative());
/// assert!(!regs.zero());
/// assert_eq!(regs.status_byte() & Status::UNUSED.bits(), Status::UNUSED.bits());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Stack pointer (offset into page 1)
    pub sp: u8,
    /// Program counter
    pub pc: u16,
    /// Status flags
    pub p: Status,
}

impl Registers {
    /// Packed status byte as pushed by PHP. Bit 5 always reads as 1.
    pub fn status_byte(&self) -> u8 {
        (self.p | Status::UNUSED).bits()
    }

    /// Replaces every flag from a packed status byte. Bit 5 is not stored.
    pub fn set_status_byte(&mut self, value: u8) {
        self.p = Status::from_bits_retain(value).difference(Status::UNUSED);
    }

    /// Applies the Zero/Negative rule for `value`.
    pub fn set_zn(&mut self, value: u8) {
        self.p.set(Status::ZERO, value == 0);
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Full stack address the stack pointer refers to.
    pub fn stack_address(&self) -> u16 {
        0x0100 | self.sp as u16
    }

    /// Reads a register by id. 8-bit registers are zero-extended.
    pub fn get(&self, register: Register) -> u16 {
        match register {
            Register::PC => self.pc,
            Register::SP => self.sp as u16,
            Register::A => self.a as u16,
            Register::X => self.x as u16,
            Register::Y => self.y as u16,
            Register::PS => self.status_byte() as u16,
        }
    }

    /// Writes a register by id, masking the value to the register's width.
    pub fn set(&mut self, register: Register, value: u16) {
        let byte = (value & 0xFF) as u8;
        match register {
            Register::PC => self.pc = value,
            Register::SP => self.sp = byte,
            Register::A => self.a = byte,
            Register::X => self.x = byte,
            Register::Y => self.y = byte,
            Register::PS => self.set_status_byte(byte),
        }
    }

    pub fn carry(&self) -> bool {
        self.p.contains(Status::CARRY)
    }

    pub fn zero(&self) -> bool {
        self.p.contains(Status::ZERO)
    }

    pub fn interrupt_disable(&self) -> bool {
        self.p.contains(Status::INTERRUPT_DISABLE)
    }

    pub fn decimal(&self) -> bool {
        self.p.contains(Status::DECIMAL)
    }

    pub fn brk(&self) -> bool {
        self.p.contains(Status::BREAK)
    }

    pub fn overflow(&self) -> bool {
        self.p.contains(Status::OVERFLOW)
    }

    pub fn negative(&self) -> bool {
        self.p.contains(Status::NEGATIVE)
    }

    pub fn set_carry(&mut self, on: bool) {
        self.p.set(Status::CARRY, on);
    }

    pub fn set_zero(&mut self, on: bool) {
        self.p.set(Status::ZERO, on);
    }

    pub fn set_interrupt_disable(&mut self, on: bool) {
        self.p.set(Status::INTERRUPT_DISABLE, on);
    }

    pub fn set_decimal(&mut self, on: bool) {
        self.p.set(Status::DECIMAL, on);
    }

    pub fn set_brk(&mut self, on: bool) {
        self.p.set(Status::BREAK, on);
    }

    pub fn set_overflow(&mut self, on: bool) {
        self.p.set(Status::OVERFLOW, on);
    }

    pub fn set_negative(&mut self, on: bool) {
        self.p.set(Status::NEGATIVE, on);
    }

    /// `NV-BDIZC` rendering, with `-` for clear flags.
    pub fn flags_string(&self) -> String {
        [
            (Status::NEGATIVE, 'N'),
            (Status::OVERFLOW, 'V'),
            (Status::UNUSED, '-'),
            (Status::BREAK, 'B'),
            (Status::DECIMAL, 'D'),
            (Status::INTERRUPT_DISABLE, 'I'),
            (Status::ZERO, 'Z'),
            (Status::CARRY, 'C'),
        ]
        .iter()
        .map(|&(flag, c)| if self.p.contains(flag) && flag != Status::UNUSED { c } else { '-' })
        .collect()
    }
}

impl std::fmt::Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "PC=${:04X} A=${:02X} X=${:02X} Y=${:02X} SP=${:02X} {}",
            self.pc,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.flags_string()
        )
    }
}
