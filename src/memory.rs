//! # Address Space
//!
//! The full 64KB of canonical storage plus the hook layer every CPU access
//! goes through.
//!
//! ## Access paths
//!
//! - **Hooked** (`read`, `write`, `read_bytes`, `write_bytes`, `read_word`):
//!   what the CPU uses. Pre-read hooks may replace the value a read yields;
//!   post-write hooks run after the byte is committed.
//! - **Observed** (`observe`): what a data read would yield, resolving
//!   pre-read hooks but never failing and never firing write or execute
//!   hooks. The disassembler and tracer list code through it, so ROMs served
//!   by hooks are shown as the CPU will fetch them.
//! - **Raw** (`peek`, `poke`, `load`): storage only, no hooks. Used for image
//!   loading.
//!
//! Every address 0x0000-0xFFFF is backed by storage; memory-mapped hardware
//! is expressed only as hooks layered on top (see [`AddressSpace::map_device`]).
//!
//! ## Re-entrancy
//!
//! Hooks receive `&mut AddressSpace` and may read and write through it. A
//! hook that is already running is skipped for any access it triggers itself,
//! so no hook runs twice for one access and self-triggering cannot recurse.

use crate::devices::{Device, DeviceHandles};
use crate::error::{AddressError, HookFault, MemoryError};
use crate::hooks::{
    Access, ExecuteAction, ExecuteContext, Hook, HookHandle, HookKind, HookRegistry, Trigger,
};
use crate::registers::Registers;
use std::cell::RefCell;
use std::rc::Rc;

/// Size of the address space in bytes.
pub const ADDRESS_SPACE_SIZE: usize = 0x1_0000;

/// 64KB storage with read, write and execute interception.
///
/// # Examples
///
/// ```
/// use beeb6502::{Access, AddressSpace, Hook, Trigger};
///
/// let mut memory = AddressSpace::new();
/// memory.poke(0xFE40, 0x12);
///
/// // A "hardware register" that always reads as 0xFF
/// memory.register_hook(
///     Trigger::Address(0xFE40),
///     Hook::pre_read(|_: &mut AddressSpace, _: &Access| Ok(Some(0xFF))),
/// );
///
/// assert_eq!(memory.read(0xFE40).unwrap(), 0xFF);
/// assert_eq!(memory.peek(0xFE40), 0x12); // storage untouched
/// ```
pub struct AddressSpace {
    data: Box<[u8; ADDRESS_SPACE_SIZE]>,
    hooks: HookRegistry,
    /// Registers passed to hooks fired through `read`/`write`
    context: Registers,
}

impl AddressSpace {
    /// Creates zero-filled memory with no hooks.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; ADDRESS_SPACE_SIZE]),
            hooks: HookRegistry::new(),
            context: Registers::default(),
        }
    }

    /// Reads storage directly, bypassing hooks.
    #[inline]
    pub fn peek(&self, address: u16) -> u8 {
        self.data[address as usize]
    }

    /// Writes storage directly, bypassing hooks.
    #[inline]
    pub fn poke(&mut self, address: u16, value: u8) {
        self.data[address as usize] = value;
    }

    /// Reads a little-endian word directly, bypassing hooks.
    pub fn peek_word(&self, address: u16) -> u16 {
        u16::from_le_bytes([self.peek(address), self.peek(address.wrapping_add(1))])
    }

    /// Copies an image into storage at `base` without firing hooks.
    ///
    /// Fails if the image would run past 0xFFFF; nothing is written then.
    ///
    /// ```
    /// use beeb6502::AddressSpace;
    ///
    /// let mut memory = AddressSpace::new();
    /// memory.load(0xFFFC, &[0x00, 0x80, 0x00, 0x00]).unwrap();
    /// assert_eq!(memory.peek_word(0xFFFC), 0x8000);
    /// assert!(memory.load(0xFFFE, &[1, 2, 3]).is_err());
    /// ```
    pub fn load(&mut self, base: u16, bytes: &[u8]) -> Result<(), AddressError> {
        let range = Self::span(base, bytes.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Raw view of all 64KB of storage.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }

    /// Hooked read using the latched register context.
    pub fn read(&mut self, address: u16) -> Result<u8, HookFault> {
        let registers = self.context;
        self.read_with(address, &registers)
    }

    /// Hooked write using the latched register context.
    pub fn write(&mut self, address: u16, value: u8) -> Result<(), HookFault> {
        let registers = self.context;
        self.write_with(address, value, &registers)
    }

    /// Range-checked hooked read for addresses computed outside 16-bit
    /// arithmetic.
    pub fn read_checked(&mut self, address: u32) -> Result<u8, MemoryError> {
        let address = AddressError::check(address)?;
        Ok(self.read(address)?)
    }

    /// Range-checked hooked write.
    pub fn write_checked(&mut self, address: u32, value: u8) -> Result<(), MemoryError> {
        let address = AddressError::check(address)?;
        Ok(self.write(address, value)?)
    }

    /// Hooked little-endian word read. The high byte address wraps at 0xFFFF.
    pub fn read_word(&mut self, address: u16) -> Result<u16, HookFault> {
        let lo = self.read(address)?;
        let hi = self.read(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Hooked read of `len` bytes in ascending address order.
    pub fn read_bytes(&mut self, base: u16, len: usize) -> Result<Vec<u8>, MemoryError> {
        Self::span(base, len)?;
        let mut out = Vec::with_capacity(len);
        for offset in 0..len {
            out.push(self.read(base.wrapping_add(offset as u16))?);
        }
        Ok(out)
    }

    /// Hooked write of `bytes` in ascending address order.
    pub fn write_bytes(&mut self, base: u16, bytes: &[u8]) -> Result<(), MemoryError> {
        Self::span(base, bytes.len())?;
        for (offset, &value) in bytes.iter().enumerate() {
            self.write(base.wrapping_add(offset as u16), value)?;
        }
        Ok(())
    }

    /// Hooked read reporting `registers` to any hook that fires.
    ///
    /// Pre-read hooks covering `address` run in registration order; the first
    /// to return `Some(byte)` decides the result and the rest are skipped.
    /// Otherwise the stored byte is returned (re-read, so a hook that wrote
    /// storage is observed).
    pub fn read_with(&mut self, address: u16, registers: &Registers) -> Result<u8, HookFault> {
        match self.resolve_read(address, registers)? {
            Some(byte) => Ok(byte),
            None => Ok(self.peek(address)),
        }
    }

    /// The byte a data read at `address` would yield, for listings.
    ///
    /// Pre-read hooks are resolved exactly as for [`read`](Self::read);
    /// post-write and pre-execute hooks never fire. A failing hook is logged
    /// and the stored byte is used instead.
    ///
    /// ```
    /// use beeb6502::{Access, AddressSpace, Hook, Trigger};
    ///
    /// let mut memory = AddressSpace::new();
    /// memory.register_hook(
    ///     Trigger::range(0x8000, 0xC000).unwrap(),
    ///     Hook::pre_read(|_: &mut AddressSpace, _: &Access| Ok(Some(0xEA))),
    /// );
    /// assert_eq!(memory.observe(0x8000), 0xEA);
    /// assert_eq!(memory.peek(0x8000), 0x00);
    /// ```
    pub fn observe(&mut self, address: u16) -> u8 {
        let registers = self.context;
        match self.resolve_read(address, &registers) {
            Ok(Some(byte)) => byte,
            Ok(None) => self.peek(address),
            Err(fault) => {
                log::debug!("observe ${:04X}: {}", address, fault);
                self.peek(address)
            }
        }
    }

    /// Little-endian word through [`observe`](Self::observe). The high byte
    /// address wraps at 0xFFFF.
    pub fn observe_word(&mut self, address: u16) -> u16 {
        let lo = self.observe(address);
        let hi = self.observe(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Pre-read dispatch: the first override, if any hook supplies one.
    fn resolve_read(
        &mut self,
        address: u16,
        registers: &Registers,
    ) -> Result<Option<u8>, HookFault> {
        if !self.hooks.may_match(HookKind::PreRead, address) {
            return Ok(None);
        }
        let value = self.peek(address);
        let access = Access {
            address,
            value,
            previous: value,
            registers: *registers,
        };
        let mut cursor = self.hooks.cursor();
        while let Some(hook) = self.hooks.next_matching(HookKind::PreRead, address, &mut cursor) {
            let Hook::PreRead(cell) = hook else { continue };
            let Ok(mut callback) = cell.try_borrow_mut() else {
                continue;
            };
            let replacement = callback
                .pre_read(self, &access)
                .map_err(|source| HookFault {
                    address,
                    kind: HookKind::PreRead,
                    source,
                })?;
            if let Some(byte) = replacement {
                log::trace!("pre-read ${:04X} overridden with ${:02X}", address, byte);
                return Ok(Some(byte));
            }
        }
        Ok(None)
    }

    /// Hooked write reporting `registers` to any hook that fires.
    ///
    /// The byte is committed first; post-write hooks then run in registration
    /// order and see both the new and previous value.
    pub fn write_with(
        &mut self,
        address: u16,
        value: u8,
        registers: &Registers,
    ) -> Result<(), HookFault> {
        let previous = std::mem::replace(&mut self.data[address as usize], value);
        if self.hooks.may_match(HookKind::PostWrite, address) {
            let access = Access {
                address,
                value,
                previous,
                registers: *registers,
            };
            let mut cursor = self.hooks.cursor();
            while let Some(hook) =
                self.hooks.next_matching(HookKind::PostWrite, address, &mut cursor)
            {
                let Hook::PostWrite(cell) = hook else { continue };
                let Ok(mut callback) = cell.try_borrow_mut() else {
                    continue;
                };
                callback
                    .post_write(self, &access)
                    .map_err(|source| HookFault {
                        address,
                        kind: HookKind::PostWrite,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Runs pre-execute hooks for an opcode fetch at `registers.pc`.
    ///
    /// Register changes made by each hook are written back to `registers`. As
    /// soon as a hook moves the program counter or asks to stop, the remaining
    /// hooks are skipped. On failure `registers` keeps the changes of the
    /// hooks that completed; the CPU discards them.
    pub fn fire_execute(&mut self, registers: &mut Registers) -> Result<ExecuteAction, HookFault> {
        let address = registers.pc;
        if !self.hooks.may_match(HookKind::PreExecute, address) {
            return Ok(ExecuteAction::Continue);
        }
        let mut cursor = self.hooks.cursor();
        while let Some(hook) = self.hooks.next_matching(HookKind::PreExecute, address, &mut cursor)
        {
            let Hook::PreExecute(cell) = hook else { continue };
            let Ok(mut callback) = cell.try_borrow_mut() else {
                continue;
            };
            self.context = *registers;
            let mut context = ExecuteContext {
                address,
                opcode: self.peek(address),
                registers: *registers,
            };
            let action = callback
                .pre_execute(self, &mut context)
                .map_err(|source| HookFault {
                    address,
                    kind: HookKind::PreExecute,
                    source,
                })?;
            *registers = context.registers;
            if action == ExecuteAction::Stop || registers.pc != address {
                return Ok(action);
            }
        }
        Ok(ExecuteAction::Continue)
    }

    /// Registers a hook after all existing ones.
    pub fn register_hook(&mut self, trigger: Trigger, hook: Hook) -> HookHandle {
        let kind = hook.kind();
        let handle = self.hooks.register(trigger, hook);
        log::debug!("registered {} hook {:?} for {:?}", kind, handle, trigger);
        handle
    }

    /// Unregisters a hook, handing back the registry's reference to it.
    pub fn remove_hook(&mut self, handle: HookHandle) -> Option<Hook> {
        self.hooks.remove(handle)
    }

    /// Number of registered hooks.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Sets the registers reported to hooks fired through `read`/`write`.
    ///
    /// The CPU keeps this current; host code rarely needs it.
    pub fn set_context(&mut self, registers: Registers) {
        self.context = registers;
    }

    pub fn context(&self) -> &Registers {
        &self.context
    }

    /// Maps a device over `[base, base + size)` as a pre-read/post-write
    /// hook pair.
    ///
    /// Storage in the window is primed with the device's contents, except at
    /// addresses an earlier pre-read hook already serves, so `peek` agrees
    /// with `read` wherever this device is the one answering. Reads are then
    /// served by the device; writes are committed and forwarded to it, and
    /// undone again if the device is read-only.
    ///
    /// ```
    /// use beeb6502::{AddressSpace, RomDevice};
    ///
    /// let mut memory = AddressSpace::new();
    /// memory.map_device(0x8000, Box::new(RomDevice::new(vec![0xEA; 0x100]))).unwrap();
    ///
    /// memory.write(0x8010, 0x00).unwrap();
    /// assert_eq!(memory.read(0x8010).unwrap(), 0xEA);
    /// assert_eq!(memory.peek(0x8010), 0xEA);
    /// ```
    pub fn map_device(
        &mut self,
        base: u16,
        device: Box<dyn Device>,
    ) -> Result<DeviceHandles, AddressError> {
        let size = device.size();
        let trigger = Trigger::range(base as u32, base as u32 + size as u32)?;
        log::debug!("mapping {} byte device at ${:04X}", size, base);
        for offset in 0..size {
            let address = base + offset;
            if !self.hooks.covers(HookKind::PreRead, address) {
                self.data[address as usize] = device.read(offset);
            }
        }

        let device = Rc::new(RefCell::new(device));
        let reader = Rc::clone(&device);
        let read = self.register_hook(
            trigger,
            Hook::pre_read(move |_: &mut AddressSpace, access: &Access| {
                Ok(Some(reader.borrow().read(access.address - base)))
            }),
        );
        let write = self.register_hook(
            trigger,
            Hook::post_write(move |memory: &mut AddressSpace, access: &Access| {
                let mut device = device.borrow_mut();
                device.write(access.address - base, access.value);
                if device.read_only() {
                    memory.poke(access.address, access.previous);
                }
                Ok(())
            }),
        );
        Ok(DeviceHandles { read, write })
    }

    /// Storage index range for `len` bytes at `base`.
    fn span(base: u16, len: usize) -> Result<std::ops::Range<usize>, AddressError> {
        let start = base as usize;
        if start + len > ADDRESS_SPACE_SIZE {
            return Err(AddressError::RangeOverflow { start: base, len });
        }
        Ok(start..start + len)
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AddressSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AddressSpace")
            .field("hooks", &self.hooks.len())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
