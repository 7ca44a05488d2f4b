//! Board-agnostic logic for the LED character device
//!
//! This crate contains everything above the register level:
//!
//! - Command parsing for write payloads
//! - LED and open/close state machines
//! - Picture rendering for reads
//! - The lock-protected device and its sessions
//! - Driver start/stop around the register mapping
//! - Configuration types

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod device;
pub mod driver;
pub mod picture;
pub mod state;

pub use command::Command;
pub use config::{DeviceConfig, MAX_PAYLOAD};
pub use device::{DeviceError, Diagnostics, LedDevice, Session, SharedLedDevice};
pub use driver::{LedDriver, StartError};
pub use state::{DeviceState, LedState};
