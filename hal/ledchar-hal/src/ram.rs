//! Memory-backed register block
//!
//! Behaves like the hardware bank semantics: set and clear words are
//! write-only and act on a tracked output level per pin. Used on the host
//! where no GPIO peripheral exists.

use crate::pin::{Function, Pin};
use crate::registers::{Bank, MapError, RegisterBlock, RegisterMapper, FSEL_WORDS, LEVEL_WORDS};

/// Register block stored in plain memory
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RamRegisters {
    function_select: [u32; FSEL_WORDS],
    /// Last value written to each set word
    set: [u32; LEVEL_WORDS],
    /// Last value written to each clear word
    clear: [u32; LEVEL_WORDS],
    /// Output latch produced by set/clear writes
    levels: [u32; LEVEL_WORDS],
    writes: usize,
}

impl RamRegisters {
    /// Create a block with every pin an input driven low
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block with preloaded function-select words
    pub fn with_function_words(words: [u32; FSEL_WORDS]) -> Self {
        Self {
            function_select: words,
            ..Self::default()
        }
    }

    /// Preload the output latch
    pub fn with_levels(mut self, levels: [u32; LEVEL_WORDS]) -> Self {
        self.levels = levels;
        self
    }

    /// Raw function-select word
    pub fn function_word(&self, index: usize) -> u32 {
        self.function_select[index]
    }

    /// All function-select words
    pub fn function_words(&self) -> [u32; FSEL_WORDS] {
        self.function_select
    }

    /// Mode currently selected for a pin
    pub fn function(&self, pin: Pin) -> Function {
        let slot = pin.function_slot();
        Function::from_code(self.function_select[slot.word] >> slot.shift)
    }

    /// Last value written to a set word
    pub fn last_set_word(&self, index: usize) -> u32 {
        self.set[index]
    }

    /// Last value written to a clear word
    pub fn last_clear_word(&self, index: usize) -> u32 {
        self.clear[index]
    }

    /// Output latch words
    pub fn levels(&self) -> [u32; LEVEL_WORDS] {
        self.levels
    }

    /// Level a pin is being driven to
    pub fn level(&self, pin: Pin) -> bool {
        let addr = pin.level_addr();
        self.levels[addr.word] & addr.mask() != 0
    }

    /// Total number of word writes performed
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl RegisterBlock for RamRegisters {
    fn read_word(&self, bank: Bank, index: usize) -> u32 {
        match bank {
            Bank::FunctionSelect => self.function_select[index],
            Bank::Set | Bank::Clear => 0,
        }
    }

    fn write_word(&mut self, bank: Bank, index: usize, value: u32) {
        self.writes += 1;
        match bank {
            Bank::FunctionSelect => self.function_select[index] = value,
            Bank::Set => {
                self.set[index] = value;
                self.levels[index] |= value;
            }
            Bank::Clear => {
                self.clear[index] = value;
                self.levels[index] &= !value;
            }
        }
    }
}

/// Mapper handing out [`RamRegisters`]
///
/// Keeps the last unmapped block so tests can inspect the state the driver
/// left behind.
#[derive(Debug, Default)]
pub struct RamMapper {
    initial: RamRegisters,
    fail_with: Option<MapError>,
    mapped: bool,
    unmapped: Option<RamRegisters>,
}

impl RamMapper {
    /// Create a mapper that hands out a fresh block
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper that hands out a copy of `initial`
    pub fn with_block(initial: RamRegisters) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }

    /// Create a mapper whose mapping always fails
    pub fn failing(error: MapError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    /// Check if a block is currently handed out
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// Take the block returned by the last unmap
    pub fn take_unmapped(&mut self) -> Option<RamRegisters> {
        self.unmapped.take()
    }
}

impl RegisterMapper for RamMapper {
    type Block = RamRegisters;

    fn map(&mut self) -> Result<RamRegisters, MapError> {
        if let Some(error) = self.fail_with {
            return Err(error);
        }
        if self.mapped {
            return Err(MapError::AlreadyMapped);
        }
        self.mapped = true;
        Ok(self.initial.clone())
    }

    fn unmap(&mut self, block: RamRegisters) {
        self.mapped = false;
        self.unmapped = Some(block);
    }
}
