//! BCM2835/BCM2837-specific HAL for the LED driver
//!
//! This crate provides:
//! - The GPIO register layout and volatile word access
//! - An identity mapper for bare-metal use of the physical address
//! - Pin string parsing for board configuration

#![no_std]

pub mod mmio;
pub mod pins;

pub use mmio::{IdentityMapper, MmioRegisters, BLOCK_SIZE, GPIO_BASE, PERIPH_BASE};
pub use pins::{parse_pin_string, LED_GPIO};
