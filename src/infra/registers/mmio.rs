//! Volatile implementation of the register traits over the memory-mapped
//! DCAN register block.
//!
//! The IFxNO/IFxSTAT/IFxCMD fields share one 32-bit word and are accessed
//! byte-wide: writing the message number byte is what triggers a transfer,
//! so it must never be merged with the command byte in a word write. Their
//! byte addresses depend on the target endianness. Data slots are addressed
//! byte by byte in memory order; the logical byte order is handled by
//! [`ByteOrderMap`](crate::infra::codec::byte_order::ByteOrderMap).
use core::ptr::{read_volatile, write_volatile};

use super::{InterfaceRegisters, NewDataRegisters};
use crate::core::{MAX_DLC, NEW_DATA_WORDS};

/// NWDAT1 offset from the controller base.
const NWDAT_OFFSET: usize = 0x9C;
/// IF1 register set offset from the controller base.
const IF1_OFFSET: usize = 0x100;
/// IF2 register set offset from the controller base.
const IF2_OFFSET: usize = 0x120;

// Offsets inside one interface register set.
const MSK_OFFSET: usize = 0x04;
const ARB_OFFSET: usize = 0x08;
const MCTL_OFFSET: usize = 0x0C;
const DATA_OFFSET: usize = 0x10;

#[cfg(target_endian = "little")]
const NO_OFFSET: usize = 0;
#[cfg(target_endian = "little")]
const STAT_OFFSET: usize = 1;
#[cfg(target_endian = "little")]
const CMD_OFFSET: usize = 2;

#[cfg(target_endian = "big")]
const CMD_OFFSET: usize = 1;
#[cfg(target_endian = "big")]
const STAT_OFFSET: usize = 2;
#[cfg(target_endian = "big")]
const NO_OFFSET: usize = 3;

/// Selects one of the two interface register sets of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceSet {
    If1,
    If2,
}

impl InterfaceSet {
    const fn offset(self) -> usize {
        match self {
            InterfaceSet::If1 => IF1_OFFSET,
            InterfaceSet::If2 => IF2_OFFSET,
        }
    }
}

//==================================================================================INTERFACE
/// Memory-mapped interface register set.
#[derive(Debug)]
pub struct MmioInterface {
    base: *mut u8,
}

// The pointer targets device registers, not thread-local memory.
unsafe impl Send for MmioInterface {}

impl MmioInterface {
    /// # Safety
    /// `controller_base` must point to a DCAN register block that stays mapped
    /// for the lifetime of the value, and no other code may access the selected
    /// interface register set while this value exists.
    pub unsafe fn new(controller_base: *mut u8, set: InterfaceSet) -> Self {
        Self {
            base: controller_base.add(set.offset()),
        }
    }

    #[inline]
    fn read_u8(&self, offset: usize) -> u8 {
        // SAFETY: offsets stay inside the interface register set (see `new`).
        unsafe { read_volatile(self.base.add(offset)) }
    }

    #[inline]
    fn write_u8(&mut self, offset: usize, value: u8) {
        // SAFETY: see `read_u8`.
        unsafe { write_volatile(self.base.add(offset), value) }
    }

    #[inline]
    fn read_u32(&self, offset: usize) -> u32 {
        // SAFETY: see `read_u8`; word offsets are 4-byte aligned.
        unsafe { read_volatile(self.base.add(offset) as *const u32) }
    }

    #[inline]
    fn write_u32(&mut self, offset: usize, value: u32) {
        // SAFETY: see `read_u32`.
        unsafe { write_volatile(self.base.add(offset) as *mut u32, value) }
    }
}

impl InterfaceRegisters for MmioInterface {
    fn status(&self) -> u8 {
        self.read_u8(STAT_OFFSET)
    }

    fn write_command(&mut self, command: u8) {
        self.write_u8(CMD_OFFSET, command);
    }

    fn write_message_number(&mut self, number: u8) {
        self.write_u8(NO_OFFSET, number);
    }

    fn write_mask(&mut self, value: u32) {
        self.write_u32(MSK_OFFSET, value);
    }

    fn write_arbitration(&mut self, value: u32) {
        self.write_u32(ARB_OFFSET, value);
    }

    fn read_arbitration(&self) -> u32 {
        self.read_u32(ARB_OFFSET)
    }

    fn write_control(&mut self, value: u32) {
        self.write_u32(MCTL_OFFSET, value);
    }

    fn read_control(&self) -> u32 {
        self.read_u32(MCTL_OFFSET)
    }

    fn write_data(&mut self, slot: usize, byte: u8) {
        debug_assert!(slot < MAX_DLC);
        self.write_u8(DATA_OFFSET + (slot % MAX_DLC), byte);
    }

    fn read_data(&self, slot: usize) -> u8 {
        debug_assert!(slot < MAX_DLC);
        self.read_u8(DATA_OFFSET + (slot % MAX_DLC))
    }
}

//==================================================================================NEW_DATA
/// Memory-mapped new-data bitmap.
#[derive(Debug)]
pub struct MmioNewData {
    base: *const u32,
}

unsafe impl Send for MmioNewData {}

impl MmioNewData {
    /// # Safety
    /// `controller_base` must point to a DCAN register block that stays mapped
    /// for the lifetime of the value.
    pub unsafe fn new(controller_base: *mut u8) -> Self {
        Self {
            base: controller_base.add(NWDAT_OFFSET) as *const u32,
        }
    }
}

impl NewDataRegisters for MmioNewData {
    fn new_data(&self, word: usize) -> u32 {
        debug_assert!(word < NEW_DATA_WORDS);
        // SAFETY: NWDAT1..NWDAT4 are contiguous words after the base.
        unsafe { read_volatile(self.base.add(word % NEW_DATA_WORDS)) }
    }
}
