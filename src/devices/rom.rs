//! ROM overlay device.

use super::Device;

/// Read-only memory overlay.
///
/// Reads are served from the image. Writes into the window are committed by
/// the address space and then undone, so storage keeps showing the image.
///
/// # Examples
///
/// ```rust
/// use beeb6502::{RomDevice, Device};
///
/// let rom_data = vec![0xEA, 0xEA, 0xEA]; // Three NOP instructions
/// let mut rom = RomDevice::new(rom_data);
///
/// assert_eq!(rom.read(0), 0xEA);
///
/// rom.write(0, 0xFF);
/// assert_eq!(rom.read(0), 0xEA);
/// assert!(rom.read_only());
/// ```
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    /// Creates a ROM holding `data`. Images longer than 0xFFFF bytes are
    /// truncated to fit a device window.
    pub fn new(mut data: Vec<u8>) -> Self {
        data.truncate(u16::MAX as usize);
        Self { data }
    }

    /// The ROM image.
    pub fn image(&self) -> &[u8] {
        &self.data
    }
}

impl Device for RomDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0xFF)
    }

    fn write(&mut self, _offset: u16, _value: u8) {}

    fn size(&self) -> u16 {
        self.data.len() as u16
    }

    fn read_only(&self) -> bool {
        true
    }
}
