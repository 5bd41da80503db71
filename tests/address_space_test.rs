//! Tests for the address space: range checks, bulk access and device
//! mapping as seen by a running CPU.

use beeb6502::{
    Access, AddressError, AddressSpace, Device, Hook, HookResult, MemoryError, RomDevice, Trigger,
    CPU,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_every_address_is_readable_and_writable() {
    let mut memory = AddressSpace::new();
    for address in [0x0000u16, 0x00FF, 0x0100, 0x7FFF, 0xFFFF] {
        memory.write(address, 0xA5).unwrap();
        assert_eq!(memory.read(address).unwrap(), 0xA5);
    }
}

#[test]
fn test_out_of_range_addresses_fail_fast() {
    let mut memory = AddressSpace::new();

    assert!(matches!(
        memory.read_checked(0x1_0000),
        Err(MemoryError::Address(AddressError::OutOfRange { address: 0x1_0000 }))
    ));
    assert!(memory.write_checked(0x2_0000, 0x00).is_err());
    assert_eq!(memory.read_checked(0xFFFF).unwrap(), 0x00);
}

#[test]
fn test_load_past_end_is_rejected() {
    let mut memory = AddressSpace::new();
    assert_eq!(
        memory.load(0xFFFF, &[0x01, 0x02]),
        Err(AddressError::RangeOverflow {
            start: 0xFFFF,
            len: 2
        })
    );
    // Nothing was written
    assert_eq!(memory.peek(0xFFFF), 0x00);
    assert!(memory.load(0xFFFE, &[0x01, 0x02]).is_ok());
}

#[test]
fn test_bulk_access_fires_hooks_in_address_order() {
    let mut memory = AddressSpace::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&order);
    memory.register_hook(
        Trigger::range(0x7000, 0x7004).unwrap(),
        Hook::post_write(move |_: &mut AddressSpace, access: &Access| -> HookResult<()> {
            log.borrow_mut().push(access.address);
            Ok(())
        }),
    );

    memory.write_bytes(0x6FFF, &[1, 2, 3, 4, 5, 6]).unwrap();

    assert_eq!(*order.borrow(), vec![0x7000, 0x7001, 0x7002, 0x7003]);
    assert_eq!(memory.read_bytes(0x6FFF, 6).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    assert!(memory.read_bytes(0xFFF0, 0x20).is_err());
}

#[test]
fn test_empty_trigger_range_rejected() {
    assert_eq!(
        Trigger::range(0x2000, 0x2000),
        Err(AddressError::EmptyRange {
            start: 0x2000,
            end: 0x2000
        })
    );
    assert!(Trigger::range(0xFF00, 0x1_0000).is_ok());
    assert!(Trigger::range(0xFF00, 0x1_0001).is_err());
}

#[test]
fn test_rom_overlay_boots_cpu() {
    // Language ROM at $8000 whose entry point loads its own first data byte
    let mut rom = vec![0x00; 0x4000];
    rom[..5].copy_from_slice(&[0xAD, 0x10, 0x80, 0x8D, 0x00]); // LDA $8010 / STA $80xx
    rom[5] = 0x80;
    rom[0x10] = 0x77;

    let mut memory = AddressSpace::new();
    memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
    memory.map_device(0x8000, Box::new(RomDevice::new(rom))).unwrap();
    let mut cpu = CPU::new(memory);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x77);

    // The store into ROM is undone
    cpu.step().unwrap();
    assert_eq!(cpu.memory().peek(0x8000), 0xAD);
    assert_eq!(cpu.memory_mut().read(0x8000).unwrap(), 0xAD);
}

/// A counter register that increments on every write.
struct WriteCounter {
    writes: u8,
}

impl Device for WriteCounter {
    fn read(&self, _offset: u16) -> u8 {
        self.writes
    }

    fn write(&mut self, _offset: u16, _value: u8) {
        self.writes = self.writes.wrapping_add(1);
    }

    fn size(&self) -> u16 {
        1
    }
}

#[test]
fn test_device_window_through_cpu() {
    let mut memory = AddressSpace::new();
    memory.load(0xFFFC, &[0x00, 0x20]).unwrap();
    // STA $FE60 / STA $FE60 / LDA $FE60
    memory
        .load(0x2000, &[0x8D, 0x60, 0xFE, 0x8D, 0x60, 0xFE, 0xAD, 0x60, 0xFE])
        .unwrap();
    let handles = memory
        .map_device(0xFE60, Box::new(WriteCounter { writes: 0 }))
        .unwrap();
    let mut cpu = CPU::new(memory);
    cpu.set_a(0xFF);

    cpu.run_until(0x2009, Some(3)).unwrap();
    assert_eq!(cpu.a(), 2);

    cpu.memory_mut().remove_hook(handles.read);
    cpu.memory_mut().remove_hook(handles.write);
    assert_eq!(cpu.memory_mut().read(0xFE60).unwrap(), 0xFF);
}
