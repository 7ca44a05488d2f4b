//! LED character device
//!
//! [`LedDevice`] implements the byte-stream contract of the device node:
//!
//! - `write` takes `"on\n"` or `"off\n"` and drives the LED pin; any other
//!   payload is stored as the last command and changes nothing else.
//! - `read` returns a picture of the LED computed from the logical state.
//!
//! The logical state, the last command and the register block sit behind
//! one lock. Each read and each write holds it for its whole duration, so
//! the function-select and level writes of one command are never
//! interleaved with another caller.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use ledchar_hal::{Function, Pin, RegisterBlock, RegisterController};

use crate::command::Command;
use crate::config::{DeviceConfig, MAX_PAYLOAD};
use crate::picture;
use crate::state::{DeviceState, LedState, Sessions};

/// Errors returned to device callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Write payload longer than the configured limit
    PayloadTooLarge,
    /// Negative read offset
    InvalidOffset,
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            DeviceError::PayloadTooLarge => "payload too large",
            DeviceError::InvalidOffset => "invalid offset",
        };
        f.write_str(msg)
    }
}

/// Point-in-time view of the device, taken under the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Open state of the node
    pub state: DeviceState,
    /// Opens since start
    pub opened: u32,
    /// Sessions currently open
    pub active: u32,
    /// Logical LED state
    pub led: LedState,
    /// Classification of the last write, `None` before the first write
    pub last_command: Option<Command>,
    /// Length of the last write in bytes
    pub last_command_len: usize,
}

struct Inner<B> {
    controller: RegisterController<B>,
    led: LedState,
    last_command: Vec<u8, MAX_PAYLOAD>,
    last_parsed: Option<Command>,
    sessions: Sessions,
}

/// Device shared between threads or interrupt contexts
pub type SharedLedDevice<B> = LedDevice<CriticalSectionRawMutex, B>;

/// The LED device node
pub struct LedDevice<M: RawMutex, B: RegisterBlock> {
    pin: Pin,
    max_payload: usize,
    inner: Mutex<M, RefCell<Inner<B>>>,
}

impl<M: RawMutex, B: RegisterBlock> LedDevice<M, B> {
    /// Create a device driving the LED on `pin`
    ///
    /// The pin is left untouched until the first recognized write.
    pub fn new(block: B, pin: Pin) -> Self {
        Self {
            pin,
            max_payload: MAX_PAYLOAD,
            inner: Mutex::new(RefCell::new(Inner {
                controller: RegisterController::new(block),
                led: LedState::Off,
                last_command: Vec::new(),
                last_parsed: None,
                sessions: Sessions::default(),
            })),
        }
    }

    /// Create a device from a startup config
    pub fn from_config(block: B, config: &DeviceConfig) -> Self {
        Self::new(block, config.led_pin).with_max_payload(config.payload_limit())
    }

    /// Limit the accepted write size; values above [`MAX_PAYLOAD`] are clamped
    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload.min(MAX_PAYLOAD);
        self
    }

    /// Pin the LED is on
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Largest accepted write
    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Open a session on the device
    ///
    /// Any number of sessions may be open; the session closes on drop.
    pub fn open(&self) -> Session<'_, M, B> {
        let opened = self.inner.lock(|inner| inner.borrow_mut().sessions.open());
        info!("LED: device has been opened {} time(s)", opened);
        Session {
            device: self,
            position: 0,
        }
    }

    fn release(&self) {
        let state = self.inner.lock(|inner| inner.borrow_mut().sessions.close());
        info!("LED: device closed ({})", state);
    }

    /// Read the picture starting at `offset`
    ///
    /// Copies at most `buf.len()` bytes and returns the count; returns 0
    /// once `offset` reaches the end of the picture.
    pub fn read_at(&self, buf: &mut [u8], offset: i64) -> Result<usize, DeviceError> {
        let offset = usize::try_from(offset).map_err(|_| DeviceError::InvalidOffset)?;
        let len = self.inner.lock(|inner| {
            let inner = inner.borrow();
            picture::copy_window(picture::render(inner.led), offset, buf)
        });
        trace!("LED: read {} bytes at offset {}", len, offset);
        Ok(len)
    }

    /// Write a command
    ///
    /// Returns the number of bytes accepted, which is always the full
    /// payload on success.
    pub fn write(&self, payload: &[u8]) -> Result<usize, DeviceError> {
        debug!("LED: received {} characters", payload.len());
        if payload.len() > self.max_payload {
            warn!(
                "LED: rejected {} byte write (limit {})",
                payload.len(),
                self.max_payload
            );
            return Err(DeviceError::PayloadTooLarge);
        }
        let buffer: Vec<u8, MAX_PAYLOAD> =
            Vec::from_slice(payload).map_err(|_| DeviceError::PayloadTooLarge)?;
        let command = Command::parse(&buffer);

        self.inner.lock(|inner| {
            let mut guard = inner.borrow_mut();
            let inner = &mut *guard;
            inner.last_command = buffer;
            inner.last_parsed = Some(command);

            match command {
                Command::On | Command::Off => {
                    inner.led = inner.led.transition(command);
                    inner.controller.set_pin_function(self.pin, Function::Output);
                    inner.controller.set_pin_output(self.pin, inner.led.is_on());
                    info!("LED: switched {}", inner.led);
                }
                Command::Unrecognized => info!("LED: unrecognized command, state unchanged"),
            }
        });

        Ok(payload.len())
    }

    /// Current logical LED state
    pub fn led_state(&self) -> LedState {
        self.inner.lock(|inner| inner.borrow().led)
    }

    /// Snapshot of the device bookkeeping
    pub fn diagnostics(&self) -> Diagnostics {
        self.inner.lock(|inner| {
            let inner = inner.borrow();
            Diagnostics {
                state: inner.sessions.state(),
                opened: inner.sessions.opened(),
                active: inner.sessions.active(),
                led: inner.led,
                last_command: inner.last_parsed,
                last_command_len: inner.last_command.len(),
            }
        })
    }

    /// Copy the last written payload into `out`, returning its full length
    pub fn last_command(&self, out: &mut [u8]) -> usize {
        self.inner.lock(|inner| {
            let inner = inner.borrow();
            let len = inner.last_command.len().min(out.len());
            out[..len].copy_from_slice(&inner.last_command[..len]);
            inner.last_command.len()
        })
    }

    /// Run `f` on the logical state and register block under the lock
    ///
    /// `f` must not open, close or write to this device: those need the
    /// state mutably while `inspect` holds it, and would panic.
    pub fn inspect<R>(&self, f: impl FnOnce(LedState, &B) -> R) -> R {
        self.inner.lock(|inner| {
            let inner = inner.borrow();
            f(inner.led, inner.controller.block())
        })
    }

    /// Tear the device down and hand back the register controller
    pub fn into_controller(self) -> RegisterController<B> {
        self.inner.into_inner().into_inner().controller
    }
}

/// An open handle on the device with its own read position
///
/// Reads continue where the previous read stopped, so reading until a
/// zero count returns the picture exactly once.
pub struct Session<'a, M: RawMutex, B: RegisterBlock> {
    device: &'a LedDevice<M, B>,
    position: i64,
}

impl<M: RawMutex, B: RegisterBlock> Session<'_, M, B> {
    /// Read from the current position and advance it
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let len = self.device.read_at(buf, self.position)?;
        self.position = self.position.saturating_add(len as i64);
        Ok(len)
    }

    /// Write a command; the read position is not affected
    pub fn write(&mut self, payload: &[u8]) -> Result<usize, DeviceError> {
        self.device.write(payload)
    }

    /// Current read position
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Move the read position
    pub fn seek(&mut self, position: i64) {
        self.position = position;
    }

    /// Close the session
    pub fn close(self) {}
}

impl<M: RawMutex, B: RegisterBlock> Drop for Session<'_, M, B> {
    fn drop(&mut self) {
        self.device.release();
    }
}
