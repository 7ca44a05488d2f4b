//! Driver lifecycle
//!
//! [`LedDriver::start`] maps the register block and builds the device;
//! [`LedDriver::stop`] parks the LED pin as an input and unmaps the block.
//! `stop` consumes the driver, so it cannot run while any session or
//! borrowed device reference is still alive.

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;
use ledchar_hal::{Function, MapError, RegisterBlock, RegisterMapper};

use crate::config::{DeviceConfig, MAX_NAME_LEN};
use crate::device::LedDevice;

/// Errors that prevent the device from becoming available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError {
    /// The register block could not be mapped
    HardwareMapFailure(MapError),
}

impl core::fmt::Display for StartError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StartError::HardwareMapFailure(e) => write!(f, "hardware map failure: {}", e),
        }
    }
}

impl From<MapError> for StartError {
    fn from(e: MapError) -> Self {
        StartError::HardwareMapFailure(e)
    }
}

/// A started LED driver
pub struct LedDriver<M: RawMutex, B: RegisterBlock> {
    name: String<MAX_NAME_LEN>,
    device: LedDevice<M, B>,
}

impl<M: RawMutex, B: RegisterBlock> LedDriver<M, B> {
    /// Map the registers and bring up the device
    pub fn start<P>(mapper: &mut P, config: &DeviceConfig) -> Result<Self, StartError>
    where
        P: RegisterMapper<Block = B>,
    {
        info!("LED: driver starting");
        let block = mapper.map().map_err(|e| {
            warn!("LED: failed to map GPIO registers: {}", e);
            StartError::HardwareMapFailure(e)
        })?;

        let device = LedDevice::from_config(block, config);
        info!(
            "LED: /dev/{} ready on gpio{}",
            config.name.as_str(),
            config.led_pin.number()
        );
        Ok(Self {
            name: config.name.clone(),
            device,
        })
    }

    /// Name to register the device node under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The device node
    pub fn device(&self) -> &LedDevice<M, B> {
        &self.device
    }

    /// Restore the LED pin to input and release the register block
    pub fn stop<P>(self, mapper: &mut P)
    where
        P: RegisterMapper<Block = B>,
    {
        let pin = self.device.pin();
        let mut controller = self.device.into_controller();
        controller.set_pin_function(pin, Function::Input);
        mapper.unmap(controller.into_inner());
        info!("LED: driver stopped");
    }
}
