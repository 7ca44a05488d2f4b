//! Ledchar Hardware Abstraction Layer
//!
//! This crate owns everything that touches the GPIO control words. Chip
//! crates supply the actual memory behind a [`RegisterBlock`]; the
//! [`RegisterController`] turns pin operations into masked word updates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledchar-core (device state machine)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledchar-hal (this crate - controller)  │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ ledchar-hal-  │       │ RamRegisters  │
//! │   bcm2837     │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`pin::Pin`], [`pin::Function`] - Pin numbers and function codes
//! - [`registers::RegisterBlock`], [`registers::RegisterMapper`] - Word access and mapping
//! - [`controller::RegisterController`] - Function select and set/clear writes
//! - [`ram::RamRegisters`], [`ram::RamMapper`] - Memory-backed block for host use

#![no_std]
#![deny(unsafe_code)]

pub mod controller;
pub mod pin;
pub mod ram;
pub mod registers;

// Re-export key types at crate root for convenience
pub use controller::RegisterController;
pub use pin::{BitAddr, FunctionSlot, Function, Pin, PinError, PIN_COUNT};
pub use ram::{RamMapper, RamRegisters};
pub use registers::{Bank, MapError, RegisterBlock, RegisterMapper, FSEL_WORDS, LEVEL_WORDS};
