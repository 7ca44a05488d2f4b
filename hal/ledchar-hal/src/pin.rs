//! Pin numbers and function codes
//!
//! A [`Pin`] can only be built through [`Pin::new`], so every pin that
//! reaches the controller addresses a word that exists in the register
//! block.

/// Number of GPIO lines on the BCM2835/BCM2837
pub const PIN_COUNT: u8 = 54;

/// Pins sharing one function-select word
const PINS_PER_FSEL_WORD: u8 = 10;

/// Width of one function-select field in bits
const FSEL_FIELD_BITS: u32 = 3;

/// Pins sharing one set/clear word (the register word width)
const PINS_PER_LEVEL_WORD: u8 = u32::BITS as u8;

/// Errors from pin construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number is not below [`PIN_COUNT`]
    OutOfRange(u8),
}

impl core::fmt::Display for PinError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PinError::OutOfRange(n) => write!(f, "gpio{} is out of range (0-{})", n, PIN_COUNT - 1),
        }
    }
}

/// Pin operating mode, encoded as the 3-bit function-select code
///
/// The alternate function codes are not sequential on this chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

impl Function {
    /// Field mask for a function code before shifting
    pub const MASK: u32 = 0b111;

    /// Get the raw 3-bit code
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Decode a 3-bit field; bits above the field are ignored
    pub const fn from_code(code: u32) -> Self {
        match code & Self::MASK {
            0b000 => Function::Input,
            0b001 => Function::Output,
            0b100 => Function::Alt0,
            0b101 => Function::Alt1,
            0b110 => Function::Alt2,
            0b111 => Function::Alt3,
            0b011 => Function::Alt4,
            _ => Function::Alt5,
        }
    }
}

/// Location of a pin's field inside the function-select bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionSlot {
    /// Word index within the bank
    pub word: usize,
    /// Bit offset of the field within the word
    pub shift: u32,
}

impl FunctionSlot {
    /// Mask covering exactly this pin's 3 bits
    pub const fn mask(self) -> u32 {
        Function::MASK << self.shift
    }
}

/// Location of a pin's bit inside the set and clear banks
///
/// Both banks share one layout, so one address serves both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitAddr {
    /// Word index within the bank
    pub word: usize,
    /// Bit offset within the word
    pub bit: u32,
}

impl BitAddr {
    /// Single-bit value to write
    pub const fn mask(self) -> u32 {
        1 << self.bit
    }
}

/// A validated GPIO pin number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Pin(u8);

impl Pin {
    /// Create a pin, rejecting numbers the chip does not have
    pub const fn new(number: u8) -> Result<Self, PinError> {
        if number < PIN_COUNT {
            Ok(Self(number))
        } else {
            Err(PinError::OutOfRange(number))
        }
    }

    /// Get the pin number
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Where this pin's function field lives
    pub const fn function_slot(self) -> FunctionSlot {
        FunctionSlot {
            word: (self.0 / PINS_PER_FSEL_WORD) as usize,
            shift: (self.0 % PINS_PER_FSEL_WORD) as u32 * FSEL_FIELD_BITS,
        }
    }

    /// Where this pin's bit lives in the set and clear banks
    pub const fn level_addr(self) -> BitAddr {
        BitAddr {
            word: (self.0 / PINS_PER_LEVEL_WORD) as usize,
            bit: (self.0 % PINS_PER_LEVEL_WORD) as u32,
        }
    }

    /// Iterate over every pin on the chip
    pub fn all() -> impl Iterator<Item = Pin> {
        (0..PIN_COUNT).map(Pin)
    }
}

impl TryFrom<u8> for Pin {
    type Error = PinError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Pin::new(number)
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> u8 {
        pin.0
    }
}
