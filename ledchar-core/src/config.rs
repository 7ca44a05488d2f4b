//! Device configuration
//!
//! Fixed at startup. Board crates build a [`DeviceConfig`] (or take the
//! default) and hand it to [`crate::LedDriver::start`].

use heapless::String;
use ledchar_hal::{Pin, PinError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity of the internal command buffer in bytes
pub const MAX_PAYLOAD: usize = 256;

/// Maximum device name length
pub const MAX_NAME_LEN: usize = 16;

/// GPIO the LED is wired to unless configured otherwise
pub const DEFAULT_LED_PIN: Pin = match Pin::new(18) {
    Ok(pin) => pin,
    Err(_) => panic!("default LED pin out of range"),
};

/// Name of the device node
pub const DEFAULT_NAME: &str = "led";

const _: () = assert!(DEFAULT_NAME.len() <= MAX_NAME_LEN);

/// Startup configuration for the LED device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Device node name (e.g., "led" for /dev/led), used by whatever
    /// registers the node with the host system
    pub name: String<MAX_NAME_LEN>,
    /// GPIO pin driving the LED
    pub led_pin: Pin,
    /// Largest write accepted, clamped to [`MAX_PAYLOAD`]
    pub max_payload: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LED_PIN)
    }
}

impl DeviceConfig {
    /// Create a config for an LED on `led_pin` with default limits
    pub fn new(led_pin: Pin) -> Self {
        Self {
            // Fits per the length assertion above
            name: String::try_from(DEFAULT_NAME).unwrap_or_default(),
            led_pin,
            max_payload: MAX_PAYLOAD,
        }
    }

    /// Create a config from a raw GPIO number
    pub fn from_gpio(number: u8) -> Result<Self, PinError> {
        Ok(Self::new(Pin::new(number)?))
    }

    /// Set the device node name; `None` if it is longer than [`MAX_NAME_LEN`]
    pub fn with_name(mut self, name: &str) -> Option<Self> {
        self.name = String::try_from(name).ok()?;
        Some(self)
    }

    /// Set the largest accepted write
    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }

    /// Effective write limit
    pub fn payload_limit(&self) -> usize {
        self.max_payload.min(MAX_PAYLOAD)
    }
}
