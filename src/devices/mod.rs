//! Memory-mapped device support.
//!
//! A device occupies a window of the address space and sees offset-based
//! accesses (0 to size-1). It is attached with
//! [`AddressSpace::map_device`](crate::AddressSpace::map_device), which
//! expresses the mapping as an ordinary pre-read/post-write hook pair; there
//! is no separate device bus. Overlapping windows follow hook ordering: the
//! earliest mapped device supplies the value of a read.
//!
//! # Example
//!
//! ```rust
//! use beeb6502::{AddressSpace, CPU, RomDevice};
//!
//! let mut rom_data = vec![0xEA; 0x4000]; // 16KB of NOPs
//! rom_data[0x3FFC] = 0x00; // reset vector low byte
//! rom_data[0x3FFD] = 0xC0; // reset vector high byte
//!
//! let mut memory = AddressSpace::new();
//! memory.map_device(0xC000, Box::new(RomDevice::new(rom_data))).unwrap();
//!
//! let cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0xC000);
//! ```

use crate::hooks::HookHandle;

pub mod rom;

pub use rom::RomDevice;

/// Memory-mapped hardware.
///
/// # Examples
///
/// ```rust
/// use beeb6502::Device;
///
/// /// A latch that reads back the last value written, inverted.
/// struct Inverter {
///     latch: u8,
/// }
///
/// impl Device for Inverter {
///     fn read(&self, _offset: u16) -> u8 {
///         !self.latch
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.latch = value;
///     }
///
///     fn size(&self) -> u16 {
///         1
///     }
/// }
/// ```
pub trait Device {
    /// Byte at `offset` within the device window.
    fn read(&self, offset: u16) -> u8;

    /// Receives a write at `offset` within the device window.
    fn write(&mut self, offset: u16, value: u8);

    /// Window size in bytes.
    fn size(&self) -> u16;

    /// Read-only devices have writes to their window undone in storage.
    fn read_only(&self) -> bool {
        false
    }
}

/// Hook registrations created by `map_device`.
///
/// Remove both with [`AddressSpace::remove_hook`](crate::AddressSpace::remove_hook)
/// to unmap the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandles {
    pub read: HookHandle,
    pub write: HookHandle,
}
