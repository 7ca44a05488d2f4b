//! Memory-mapped GPIO registers
//!
//! Word offsets come from the `#[repr(C)]` layout below so the bank
//! positions cannot drift from the datasheet map. Every access is a single
//! volatile 32-bit read or write.

use core::mem::{offset_of, size_of};
use core::ptr::NonNull;

use ledchar_hal::{Bank, MapError, RegisterBlock, RegisterMapper, FSEL_WORDS, LEVEL_WORDS};

/// Peripheral base address as seen by the ARM core (BCM2836/BCM2837)
pub const PERIPH_BASE: usize = 0x3F00_0000;

/// GPIO controller base address
pub const GPIO_BASE: usize = PERIPH_BASE + 0x20_0000;

/// GPIO register layout up to the last clear word
#[allow(dead_code)]
#[repr(C)]
struct GpioLayout {
    /// GPFSEL0-5
    function_select: [u32; FSEL_WORDS],
    _reserved0: u32,
    /// GPSET0-1
    set: [u32; LEVEL_WORDS],
    _reserved1: u32,
    /// GPCLR0-1
    clear: [u32; LEVEL_WORDS],
}

/// Bytes covered by the mapping
pub const BLOCK_SIZE: usize = size_of::<GpioLayout>();

const WORD: usize = size_of::<u32>();
const FSEL_OFFSET: usize = offset_of!(GpioLayout, function_select) / WORD;
const SET_OFFSET: usize = offset_of!(GpioLayout, set) / WORD;
const CLEAR_OFFSET: usize = offset_of!(GpioLayout, clear) / WORD;

const _: () = assert!(offset_of!(GpioLayout, set) == 0x1C);
const _: () = assert!(offset_of!(GpioLayout, clear) == 0x28);
const _: () = assert!(BLOCK_SIZE == 0x30);

/// Handle to the mapped GPIO block
#[derive(Debug)]
pub struct MmioRegisters {
    base: NonNull<u32>,
}

// SAFETY: the handle is the only owner of the block (see `new`), so moving
// it to another thread cannot create aliased access.
unsafe impl Send for MmioRegisters {}

impl MmioRegisters {
    /// Wrap the GPIO block at `base`
    ///
    /// # Safety
    ///
    /// `base` must be the address of the GPIO registers in the current
    /// address space, valid for volatile access to [`BLOCK_SIZE`] bytes for
    /// as long as the returned value lives, and no other handle to the same
    /// block may exist at the same time.
    pub unsafe fn new(base: usize) -> Result<Self, MapError> {
        if base % WORD != 0 {
            return Err(MapError::Misaligned);
        }
        let base = NonNull::new(base as *mut u32).ok_or(MapError::Unavailable)?;
        Ok(Self { base })
    }

    /// Base address of the block
    pub fn base(&self) -> usize {
        self.base.as_ptr() as usize
    }

    /// Pointer to a register word, `None` past the end of the bank
    fn word_ptr(&self, bank: Bank, index: usize) -> Option<*mut u32> {
        debug_assert!(index < bank.len(), "{:?} word {} out of range", bank, index);
        if index >= bank.len() {
            return None;
        }
        let offset = match bank {
            Bank::FunctionSelect => FSEL_OFFSET,
            Bank::Set => SET_OFFSET,
            Bank::Clear => CLEAR_OFFSET,
        } + index;
        // SAFETY: offset is inside the BLOCK_SIZE bytes guaranteed by `new`
        Some(unsafe { self.base.as_ptr().add(offset) })
    }
}

impl RegisterBlock for MmioRegisters {
    fn read_word(&self, bank: Bank, index: usize) -> u32 {
        match self.word_ptr(bank, index) {
            // SAFETY: pointer is valid and aligned per `new`
            Some(ptr) => unsafe { ptr.read_volatile() },
            None => 0,
        }
    }

    fn write_word(&mut self, bank: Bank, index: usize, value: u32) {
        if let Some(ptr) = self.word_ptr(bank, index) {
            // SAFETY: pointer is valid and aligned per `new`; `&mut self`
            // keeps the read-modify-write of the caller exclusive
            unsafe { ptr.write_volatile(value) }
        }
    }
}

/// Mapper for systems where the GPIO block is identity mapped
///
/// Bare-metal kernels and boot stages typically run with physical
/// addresses; the mapping is then just a pointer cast.
#[derive(Debug)]
pub struct IdentityMapper {
    base: usize,
    mapped: bool,
}

impl IdentityMapper {
    /// Create a mapper for the block at `base`
    ///
    /// # Safety
    ///
    /// `base` must satisfy the requirements of [`MmioRegisters::new`], and
    /// this mapper must be the only way the block is accessed.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base, mapped: false }
    }

    /// Create a mapper for the default GPIO block
    ///
    /// # Safety
    ///
    /// See [`IdentityMapper::new`].
    pub const unsafe fn bcm2837() -> Self {
        Self::new(GPIO_BASE)
    }
}

impl RegisterMapper for IdentityMapper {
    type Block = MmioRegisters;

    fn map(&mut self) -> Result<MmioRegisters, MapError> {
        if self.mapped {
            return Err(MapError::AlreadyMapped);
        }
        // SAFETY: guaranteed by the contract of `IdentityMapper::new`; the
        // `mapped` flag keeps at most one handle alive
        let block = unsafe { MmioRegisters::new(self.base)? };
        self.mapped = true;
        Ok(block)
    }

    fn unmap(&mut self, block: MmioRegisters) {
        drop(block);
        self.mapped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledchar_hal::{Function, Pin, RegisterController};

    const WORDS: usize = BLOCK_SIZE / WORD;

    #[test]
    fn test_bank_offsets() {
        assert_eq!(GPIO_BASE, 0x3F20_0000);
        assert_eq!(FSEL_OFFSET, 0);
        assert_eq!(SET_OFFSET, 7);
        assert_eq!(CLEAR_OFFSET, 10);
    }

    #[test]
    fn test_writes_land_in_layout() {
        let mut memory = [0u32; WORDS];
        let regs = unsafe { MmioRegisters::new(memory.as_mut_ptr() as usize) }.unwrap();
        let mut ctl = RegisterController::new(regs);
        let led = Pin::new(18).unwrap();

        ctl.set_pin_function(led, Function::Output);
        ctl.set_pin_output(led, true);
        ctl.set_pin_output(led, false);
        assert_eq!(ctl.pin_function(led), Function::Output);
        drop(ctl);

        assert_eq!(memory[1], 0b001 << 24);
        assert_eq!(memory[SET_OFFSET], 1 << 18);
        assert_eq!(memory[CLEAR_OFFSET], 1 << 18);
        assert_eq!(memory[6], 0);
        assert_eq!(memory[9], 0);
    }

    #[test]
    fn test_second_bank_word() {
        let mut memory = [0u32; WORDS];
        let regs = unsafe { MmioRegisters::new(memory.as_mut_ptr() as usize) }.unwrap();
        let mut ctl = RegisterController::new(regs);

        ctl.set_pin_output(Pin::new(40).unwrap(), false);
        drop(ctl);

        assert_eq!(memory[CLEAR_OFFSET + 1], 1 << 8);
        assert_eq!(memory[CLEAR_OFFSET], 0);
    }

    #[test]
    fn test_every_pin_stays_in_block() {
        // One guard word past the block
        let mut memory = [0u32; WORDS + 1];
        let regs = unsafe { MmioRegisters::new(memory.as_mut_ptr() as usize) }.unwrap();
        let mut ctl = RegisterController::new(regs);

        for pin in Pin::all() {
            ctl.set_pin_function(pin, Function::Alt3);
            ctl.set_pin_output(pin, true);
            ctl.set_pin_output(pin, false);
            assert_eq!(ctl.pin_function(pin), Function::Alt3);
        }
        drop(ctl);

        assert_eq!(memory[WORDS], 0);
        assert_eq!(memory[6], 0);
        assert_eq!(memory[9], 0);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_out_of_range_word_ignored() {
        let mut memory = [0u32; WORDS + 1];
        let mut regs = unsafe { MmioRegisters::new(memory.as_mut_ptr() as usize) }.unwrap();

        regs.write_word(Bank::Clear, 2, u32::MAX);
        assert_eq!(regs.read_word(Bank::Clear, 2), 0);
        drop(regs);

        assert_eq!(memory, [0u32; WORDS + 1]);
    }

    #[test]
    fn test_bad_base() {
        assert_eq!(unsafe { MmioRegisters::new(0) }.unwrap_err(), MapError::Unavailable);
        assert_eq!(
            unsafe { MmioRegisters::new(GPIO_BASE + 1) }.unwrap_err(),
            MapError::Misaligned
        );
    }

    #[test]
    fn test_identity_mapper_single_handle() {
        let mut memory = [0u32; WORDS];
        let mut mapper = unsafe { IdentityMapper::new(memory.as_mut_ptr() as usize) };

        let block = mapper.map().unwrap();
        assert_eq!(mapper.map().unwrap_err(), MapError::AlreadyMapped);
        mapper.unmap(block);
        assert!(mapper.map().is_ok());
    }
}
