//! Axis readout, unit conversion and exponential smoothing.

use core::fmt::Debug;

use accelerometer::vector::{F32x3, I16x3};
use accelerometer::{Accelerometer, RawAccelerometer};
use device_driver::RegisterInterface;

use crate::{Adxl345, DataRate, DeviceState, Error, Register};

/// Acceleration per LSB in g (3.90625 mg). Exact in full-resolution mode and
/// in 10-bit mode at ±2 g.
pub const SCALE_G_PER_LSB: f32 = 0.003_906_25;

/// Standard gravity in m/s².
pub const GRAVITY: f32 = 9.806_65;

/// Convert a raw sample to m/s².
#[must_use]
pub fn to_physical(raw: i16) -> f32 {
    lsb_to_ms2(f32::from(raw))
}

fn lsb_to_ms2(lsb: f32) -> f32 {
    lsb * SCALE_G_PER_LSB * GRAVITY
}

/// Single-pole exponential smoothing step.
///
/// `weight` is saturated into `[0, 1]`. A weight of 1 passes `new` through
/// unchanged; a weight of 0 holds `previous` forever. A NaN weight counts
/// as 1, so the filter never holds a NaN it did not read.
#[must_use]
pub fn smooth(new: f32, previous: f32, weight: f32) -> f32 {
    let weight = if weight.is_nan() {
        1.0
    } else {
        weight.clamp(0.0, 1.0)
    };
    new * weight + previous * (1.0 - weight)
}

/// Accelerometer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Low byte register of the axis.
    #[must_use]
    pub const fn register(self) -> Register {
        match self {
            Axis::X => Register::DataX0,
            Axis::Y => Register::DataY0,
            Axis::Z => Register::DataZ0,
        }
    }
}

/// Per-axis smoothing state in raw LSB units.
///
/// Owned by the caller and threaded through [`Adxl345::sample`]; independent
/// sampling sessions need independent states. `Default` is the zeroed state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct FilterState {
    /// Filtered X
    pub x: f32,
    /// Filtered Y
    pub y: f32,
    /// Filtered Z
    pub z: f32,
}

impl FilterState {
    /// Seed from explicit values.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Seed from a raw reading so the first smoothing step starts on it.
    #[must_use]
    pub fn seeded(raw: I16x3) -> Self {
        Self {
            x: f32::from(raw.x),
            y: f32::from(raw.y),
            z: f32::from(raw.z),
        }
    }

    /// Fold a new raw reading in.
    #[must_use]
    pub fn update(self, raw: I16x3, weight: f32) -> Self {
        Self {
            x: smooth(f32::from(raw.x), self.x, weight),
            y: smooth(f32::from(raw.y), self.y, weight),
            z: smooth(f32::from(raw.z), self.z, weight),
        }
    }

    /// Filtered values in m/s².
    #[must_use]
    pub fn physical(&self) -> F32x3 {
        F32x3::new(lsb_to_ms2(self.x), lsb_to_ms2(self.y), lsb_to_ms2(self.z))
    }
}

/// One pass through the sample pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Raw axis values
    pub raw: I16x3,
    /// Unfiltered acceleration in m/s²
    pub acceleration: F32x3,
    /// Smoothed acceleration in m/s²
    pub filtered: F32x3,
}

// The axis fields are plain 16-bit words holding two's complement samples.
fn as_signed(word: u16) -> i16 {
    i16::from_le_bytes(word.to_le_bytes())
}

fn physical(raw: I16x3) -> F32x3 {
    F32x3::new(to_physical(raw.x), to_physical(raw.y), to_physical(raw.z))
}

impl<I> Adxl345<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Read a single axis.
    ///
    /// # Errors
    /// [`Error::InvalidState`] unless measuring, [`Error::Bus`] on transport
    /// failure.
    pub fn read_axis(&mut self, axis: Axis) -> Result<i16, Error<I::Error>> {
        self.require(DeviceState::Measuring)?;
        let device = self.device();
        let value = match axis {
            Axis::X => device.data_x().read()?.value(),
            Axis::Y => device.data_y().read()?.value(),
            Axis::Z => device.data_z().read()?.value(),
        };
        Ok(as_signed(value))
    }

    /// Read all three axes, one word transaction each. Any failure fails the
    /// whole reading.
    ///
    /// # Errors
    /// [`Error::InvalidState`] unless measuring, [`Error::Bus`] on transport
    /// failure.
    pub fn read_axes(&mut self) -> Result<I16x3, Error<I::Error>> {
        self.require(DeviceState::Measuring)?;
        let device = self.device();
        let x = device.data_x().read()?.value();
        let y = device.data_y().read()?.value();
        let z = device.data_z().read()?.value();
        Ok(I16x3::new(as_signed(x), as_signed(y), as_signed(z)))
    }

    /// Raw axes together with their value in m/s².
    ///
    /// # Errors
    /// See [`Adxl345::read_axes`].
    pub fn read_acceleration(&mut self) -> Result<(I16x3, F32x3), Error<I::Error>> {
        let raw = self.read_axes()?;
        Ok((raw, physical(raw)))
    }

    /// Read, convert and smooth one reading.
    ///
    /// Returns the sample and the filter state to pass to the next call. On
    /// error the caller's state is left as it was.
    ///
    /// # Errors
    /// See [`Adxl345::read_axes`].
    pub fn sample(
        &mut self,
        state: FilterState,
        weight: f32,
    ) -> Result<(Sample, FilterState), Error<I::Error>> {
        let raw = self.read_axes()?;
        let state = state.update(raw, weight);
        let sample = Sample {
            raw,
            acceleration: physical(raw),
            filtered: state.physical(),
        };
        Ok((sample, state))
    }
}

impl<I> RawAccelerometer<I16x3> for Adxl345<I>
where
    I: RegisterInterface<AddressType = u8>,
    I::Error: Debug,
{
    type Error = I::Error;

    fn accel_raw(&mut self) -> Result<I16x3, accelerometer::Error<I::Error>> {
        self.read_axes().map_err(Error::into_accelerometer)
    }
}

impl<I> Accelerometer for Adxl345<I>
where
    I: RegisterInterface<AddressType = u8>,
    I::Error: Debug,
{
    type Error = I::Error;

    /// Acceleration in g.
    fn accel_norm(&mut self) -> Result<F32x3, accelerometer::Error<I::Error>> {
        let raw = self.read_axes().map_err(Error::into_accelerometer)?;
        Ok(F32x3::new(
            f32::from(raw.x) * SCALE_G_PER_LSB,
            f32::from(raw.y) * SCALE_G_PER_LSB,
            f32::from(raw.z) * SCALE_G_PER_LSB,
        ))
    }

    fn sample_rate(&mut self) -> Result<f32, accelerometer::Error<I::Error>> {
        self.datarate()
            .map(DataRate::hz)
            .map_err(Error::into_accelerometer)
    }
}
