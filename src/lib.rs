//! Platform-agnostic ADXL345 accelerometer driver.
//! Provides register access, bit-field configuration and a smoothed sample
//! pipeline, and implements the [`RawAccelerometer`] and [`Accelerometer`]
//! traits from the `accelerometer` crate.
//!
//! [`RawAccelerometer`]: accelerometer::RawAccelerometer
//! [`Accelerometer`]: accelerometer::Accelerometer

#![no_std]
#![deny(missing_docs)]

pub mod codec;
mod device;
pub mod registers;
mod sample;

pub use accelerometer::vector::{F32x3, I16x3};
pub use codec::{DataRate, InvalidValue, Range, WakeFrequency};
pub use device::{Adxl345, Config, DeviceState};
pub use registers::{Adxl345Registers, DEVICE_ID, Register};
pub use sample::{Axis, FilterState, GRAVITY, Sample, SCALE_G_PER_LSB, smooth, to_physical};

use device_driver::RegisterInterface;
use embedded_hal as hal;

/// I²C bus interface for ADXL345.
pub struct DeviceInterface<I2C> {
    /// Underlying I²C bus
    pub i2c: I2C,
    /// I²C slave address
    pub address: u8,
}

impl<I2C> RegisterInterface for DeviceInterface<I2C>
where
    I2C: hal::i2c::I2c,
{
    type Error = I2C::Error;
    type AddressType = u8;

    /// Sends `[address, data...]` in one write.
    ///
    /// # Panics
    /// If `data` is longer than 8 bytes; every register block on the device
    /// is shorter.
    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut buf = [0u8; 1 + 8];
        buf[0] = address;
        buf[1..1 + data.len()].copy_from_slice(data);
        self.i2c.write(self.address, &buf[..1 + data.len()])
    }

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], data)
    }
}

/// Possible I²C slave addresses for the ADXL345.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaveAddr {
    /// ALT ADDRESS pin low -> `0x53`
    Default,
    /// ALT ADDRESS pin high -> `0x1D`
    Alternative,
}

impl SlaveAddr {
    /// 7-bit bus address.
    #[must_use]
    pub const fn addr(self) -> u8 {
        match self {
            SlaveAddr::Default => 0x53,
            SlaveAddr::Alternative => 0x1D,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus transaction failed; never retried by the driver.
    Bus(E),
    /// `DEVID` did not read back as [`DEVICE_ID`] (contains the byte read).
    IdentityMismatch(u8),
    /// A setting outside its enumerated domain. Nothing was written.
    InvalidConfigurationValue,
    /// The operation needs the controller to have reached `required` first.
    InvalidState {
        /// Lowest state the operation accepts
        required: DeviceState,
        /// State the controller is in
        actual: DeviceState,
    },
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

impl<E: core::fmt::Debug> Error<E> {
    /// Collapse into the `accelerometer` crate's error type.
    pub(crate) fn into_accelerometer(self) -> accelerometer::Error<E> {
        match self {
            Error::Bus(cause) => accelerometer::Error::from(cause),
            _ => accelerometer::Error::new(accelerometer::ErrorKind::Device),
        }
    }
}
