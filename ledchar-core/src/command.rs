//! Write payload parsing

use crate::state::LedState;

/// Interpretation of a write payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// "on\n"
    On,
    /// "off\n"
    Off,
    /// Anything else; accepted but changes nothing
    Unrecognized,
}

impl Command {
    /// Classify a raw payload
    ///
    /// Matching is exact and case-sensitive, newline included, which is
    /// what `echo on > /dev/led` sends.
    pub fn parse(payload: &[u8]) -> Self {
        match payload {
            b"on\n" => Command::On,
            b"off\n" => Command::Off,
            _ => Command::Unrecognized,
        }
    }

    /// LED state requested by this command, if any
    pub fn target(self) -> Option<LedState> {
        match self {
            Command::On => Some(LedState::On),
            Command::Off => Some(LedState::Off),
            Command::Unrecognized => None,
        }
    }
}
