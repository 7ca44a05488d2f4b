//! Device state
//!
//! Two small machines: the logical LED state, driven only by recognized
//! commands, and the open/close bookkeeping of the device node.

use crate::command::Command;

/// Logical LED state as recorded by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// LED dark, pin driven low (also the state before any write)
    #[default]
    Off,
    /// LED lit, pin driven high
    On,
}

impl LedState {
    /// Check if the LED is lit
    pub fn is_on(self) -> bool {
        self == LedState::On
    }

    /// Process a command and return the next state
    ///
    /// Unrecognized commands keep the current state.
    pub fn transition(self, command: Command) -> Self {
        command.target().unwrap_or(self)
    }
}

/// Open state of the device node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// No session is open
    #[default]
    Closed,
    /// At least one session is open
    Open,
}

/// Open/close bookkeeping
///
/// Access is shared: any number of sessions may be open at once. The
/// counters are diagnostics only and never gate an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sessions {
    /// Opens since the driver started
    opened: u32,
    /// Sessions currently open
    active: u32,
}

impl Sessions {
    /// Record an open; returns the lifetime open count
    pub fn open(&mut self) -> u32 {
        self.opened = self.opened.saturating_add(1);
        self.active = self.active.saturating_add(1);
        self.opened
    }

    /// Record a close; returns the resulting state
    pub fn close(&mut self) -> DeviceState {
        self.active = self.active.saturating_sub(1);
        self.state()
    }

    /// Current open state
    pub fn state(&self) -> DeviceState {
        if self.active > 0 {
            DeviceState::Open
        } else {
            DeviceState::Closed
        }
    }

    /// Opens since the driver started
    pub fn opened(&self) -> u32 {
        self.opened
    }

    /// Sessions currently open
    pub fn active(&self) -> u32 {
        self.active
    }
}
