//! Register block abstraction
//!
//! The GPIO control words are grouped into banks. Implementations only
//! move whole 32-bit words; all bit manipulation happens in the
//! controller.

/// Number of function-select words (10 pins per word)
pub const FSEL_WORDS: usize = 6;

/// Number of set words and of clear words (32 pins per word)
pub const LEVEL_WORDS: usize = 2;

/// A group of control words within the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    /// Pin mode words, 3 bits per pin
    FunctionSelect,
    /// Writing a 1 bit drives the pin high
    Set,
    /// Writing a 1 bit drives the pin low
    Clear,
}

impl Bank {
    /// Number of words in this bank
    pub const fn len(self) -> usize {
        match self {
            Bank::FunctionSelect => FSEL_WORDS,
            Bank::Set | Bank::Clear => LEVEL_WORDS,
        }
    }
}

/// Word-addressed access to the GPIO control words
///
/// Callers guarantee `index < bank.len()`.
pub trait RegisterBlock {
    /// Read one whole word
    ///
    /// Set and clear words are write-only on hardware and read as zero.
    fn read_word(&self, bank: Bank, index: usize) -> u32;

    /// Write one whole word
    fn write_word(&mut self, bank: Bank, index: usize, value: u32);
}

/// Errors from mapping the register block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapError {
    /// The address range could not be mapped
    Unavailable,
    /// The base address is not word aligned
    Misaligned,
    /// The block is already mapped by this mapper
    AlreadyMapped,
}

impl core::fmt::Display for MapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MapError::Unavailable => "register block could not be mapped",
            MapError::Misaligned => "register base address is not word aligned",
            MapError::AlreadyMapped => "register block is already mapped",
        };
        f.write_str(msg)
    }
}

/// Provider of the memory backing the register block
///
/// Maps the block once at driver start and takes it back at stop.
pub trait RegisterMapper {
    /// The mapped block type
    type Block: RegisterBlock;

    /// Map the register block
    fn map(&mut self) -> Result<Self::Block, MapError>;

    /// Release a block obtained from [`RegisterMapper::map`]
    fn unmap(&mut self, block: Self::Block);
}
