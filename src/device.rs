//! Register access and the device state controller.

use device_driver::RegisterInterface;
use embedded_hal::i2c::I2c;

use crate::codec::{self, DataRate, Range, WakeFrequency};
use crate::registers::{Adxl345Registers, DEVICE_ID, Register};
use crate::{DeviceInterface, Error, SlaveAddr};

/// Coarse controller state. Later states compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum DeviceState {
    /// Nothing verified yet
    Uninitialized,
    /// `DEVID` matched
    Identified,
    /// Power control and data format applied
    Configured,
    /// `MEASURE` set, axis data valid
    Measuring,
}

/// Power-control and data-format settings applied by [`Adxl345::configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Config {
    /// Enter auto-sleep on inactivity. `false` clears `POWER_CTL` entirely.
    pub auto_sleep: bool,
    /// Read frequency while asleep
    pub wake_frequency: WakeFrequency,
    /// Constant 3.9 mg/LSB regardless of range
    pub full_resolution: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_sleep: true,
            wake_frequency: WakeFrequency::Hz1,
            full_resolution: true,
        }
    }
}

/// High-level ADXL345 driver.
///
/// Generic over any [`RegisterInterface`] with byte addresses; use
/// [`Adxl345::new`] for the I²C flavour.
pub struct Adxl345<I> {
    device: Adxl345Registers<I>,
    state: DeviceState,
}

impl<I2C> Adxl345<DeviceInterface<I2C>>
where
    I2C: I2c,
{
    /// Create a new driver from an I²C bus instance and selected address.
    ///
    /// No bus traffic happens here; call [`Adxl345::identify`] or
    /// [`Adxl345::init`] next.
    pub fn new(i2c: I2C, addr: SlaveAddr) -> Self {
        Self::from_interface(DeviceInterface {
            i2c,
            address: addr.addr(),
        })
    }

    /// Consume the driver and return the inner I²C bus.
    pub fn destroy(self) -> I2C {
        self.device.interface.i2c
    }
}

impl<I> Adxl345<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Wrap an already constructed register interface.
    pub fn from_interface(interface: I) -> Self {
        Self {
            device: Adxl345Registers::new(interface),
            state: DeviceState::Uninitialized,
        }
    }

    /// Consume the driver and return the register interface.
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Access the register interface directly.
    pub fn interface(&mut self) -> &mut I {
        &mut self.device.interface
    }

    /// Get the generated register block. Writes made through it bypass the
    /// controller state.
    pub fn device(&mut self) -> &mut Adxl345Registers<I> {
        &mut self.device
    }

    /// Current controller state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub(crate) fn require(&self, required: DeviceState) -> Result<(), Error<I::Error>> {
        if self.state < required {
            return Err(Error::InvalidState {
                required,
                actual: self.state,
            });
        }
        Ok(())
    }

    // Register access

    /// Read one register.
    ///
    /// # Errors
    /// [`Error::Bus`] if the transaction fails.
    pub fn read_byte(&mut self, reg: Register) -> Result<u8, Error<I::Error>> {
        let mut buf = [0u8; 1];
        self.device.interface.read_register(reg.addr(), 8, &mut buf)?;
        Ok(buf[0])
    }

    /// Read two consecutive registers as a little-endian `i16` in a single
    /// transaction.
    ///
    /// # Errors
    /// [`Error::Bus`] if the transaction fails.
    pub fn read_word(&mut self, reg: Register) -> Result<i16, Error<I::Error>> {
        let mut buf = [0u8; 2];
        self.device.interface.read_register(reg.addr(), 16, &mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    /// Write one register.
    ///
    /// # Errors
    /// [`Error::Bus`] if the transaction fails.
    pub fn write_byte(&mut self, reg: Register, value: u8) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt-03")]
        defmt::trace!("adxl345: {} <- {=u8:#x}", reg, value);

        self.device.interface.write_register(reg.addr(), 8, &[value])?;
        Ok(())
    }

    /// Read a register, pass it through `f` and write the result back.
    /// Returns the value written.
    ///
    /// # Errors
    /// [`Error::Bus`] if either transaction fails; nothing is written when
    /// the read fails.
    pub fn modify_register<F>(&mut self, reg: Register, f: F) -> Result<u8, Error<I::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = f(self.read_byte(reg)?);
        self.write_byte(reg, value)?;
        Ok(value)
    }

    /// Replace the bits selected by `mask` with the matching bits of `value`,
    /// preserving the rest of the register. Returns the value written.
    ///
    /// # Errors
    /// [`Error::Bus`] if either transaction fails.
    pub fn update_register(
        &mut self,
        reg: Register,
        mask: u8,
        value: u8,
    ) -> Result<u8, Error<I::Error>> {
        self.modify_register(reg, |current| (current & !mask) | (value & mask))
    }

    // State control

    /// Raw `DEVID` register.
    ///
    /// # Errors
    /// [`Error::Bus`] if the transaction fails.
    pub fn device_id(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.dev_id().read()?.device_id())
    }

    /// Verify `DEVID` against [`DEVICE_ID`].
    ///
    /// On a mismatch the controller drops back to
    /// [`DeviceState::Uninitialized`] and nothing else may proceed.
    ///
    /// # Errors
    /// [`Error::Bus`] or [`Error::IdentityMismatch`].
    pub fn identify(&mut self) -> Result<(), Error<I::Error>> {
        let id = self.device_id()?;

        #[cfg(feature = "defmt-03")]
        defmt::debug!("adxl345: DEVID = {=u8:#x}", id);

        if id != DEVICE_ID {
            self.state = DeviceState::Uninitialized;
            return Err(Error::IdentityMismatch(id));
        }
        if self.state == DeviceState::Uninitialized {
            self.state = DeviceState::Identified;
        }
        Ok(())
    }

    /// Apply auto-sleep and full-resolution settings.
    ///
    /// Disabling auto-sleep zeroes `POWER_CTL`, which also stops measurement;
    /// call [`Adxl345::start_measuring`] again afterwards.
    ///
    /// The state follows what has reached the device: once `POWER_CTL` is
    /// written without `MEASURE`, axis reads are refused even if the
    /// `DATA_FORMAT` step then fails.
    ///
    /// # Errors
    /// [`Error::InvalidState`] before identification, [`Error::Bus`] on
    /// transport failure.
    pub fn configure(&mut self, config: Config) -> Result<(), Error<I::Error>> {
        self.require(DeviceState::Identified)?;

        let power = self.modify_register(Register::PowerCtl, |v| {
            codec::compose_power_control(v, config.auto_sleep, config.wake_frequency)
        })?;
        if self.state > DeviceState::Configured && !codec::is_measuring(power) {
            self.state = DeviceState::Configured;
        }

        self.device.data_format().modify(|w| {
            w.set_full_res(config.full_resolution);
        })?;

        if self.state < DeviceState::Configured {
            self.state = DeviceState::Configured;
        }
        Ok(())
    }

    /// Set `MEASURE`, keeping the auto-sleep and wakeup bits.
    ///
    /// # Errors
    /// [`Error::InvalidState`] before [`Adxl345::configure`], [`Error::Bus`]
    /// on transport failure.
    pub fn start_measuring(&mut self) -> Result<(), Error<I::Error>> {
        self.require(DeviceState::Configured)?;
        self.device.power_ctl().modify(|w| {
            w.set_measure(true);
        })?;
        self.state = DeviceState::Measuring;
        Ok(())
    }

    /// Identify, configure and start measuring in one go.
    ///
    /// # Errors
    /// Whatever the first failing step reports.
    pub fn init(&mut self, config: Config) -> Result<(), Error<I::Error>> {
        self.identify()?;
        self.configure(config)?;
        self.start_measuring()
    }

    /// Select the measurement range, preserving the rest of `DATA_FORMAT`.
    ///
    /// # Errors
    /// [`Error::InvalidState`] before configuration, [`Error::Bus`] on
    /// transport failure.
    pub fn set_range(&mut self, range: Range) -> Result<(), Error<I::Error>> {
        self.require(DeviceState::Configured)?;
        self.device.data_format().modify(|w| {
            w.set_range(range);
        })?;
        Ok(())
    }

    /// Select the measurement range by magnitude in g (2, 4, 8 or 16).
    ///
    /// # Errors
    /// [`Error::InvalidConfigurationValue`] for any other magnitude, before
    /// touching the bus.
    pub fn set_range_g(&mut self, g: u8) -> Result<(), Error<I::Error>> {
        let range = Range::from_g(g).map_err(|_| Error::InvalidConfigurationValue)?;
        self.set_range(range)
    }

    /// Current measurement range.
    ///
    /// # Errors
    /// [`Error::Bus`] if the transaction fails.
    pub fn range(&mut self) -> Result<Range, Error<I::Error>> {
        Ok(self.device.data_format().read()?.range())
    }

    /// Select the output data rate, preserving `LOW_POWER`.
    ///
    /// # Errors
    /// [`Error::InvalidState`] before configuration, [`Error::Bus`] on
    /// transport failure.
    pub fn set_datarate(&mut self, rate: DataRate) -> Result<(), Error<I::Error>> {
        self.require(DeviceState::Configured)?;
        self.device.bw_rate().modify(|w| {
            w.set_rate(rate);
        })?;
        Ok(())
    }

    /// Current output data rate.
    ///
    /// # Errors
    /// [`Error::Bus`] if the transaction fails.
    pub fn datarate(&mut self) -> Result<DataRate, Error<I::Error>> {
        Ok(self.device.bw_rate().read()?.rate())
    }

    /// Toggle full-resolution mode.
    ///
    /// # Errors
    /// [`Error::InvalidState`] before configuration, [`Error::Bus`] on
    /// transport failure.
    pub fn set_full_resolution(&mut self, on: bool) -> Result<(), Error<I::Error>> {
        self.require(DeviceState::Configured)?;
        self.device.data_format().modify(|w| {
            w.set_full_res(on);
        })?;
        Ok(())
    }

    /// Toggle reduced-power operation (`BW_RATE` bit 4).
    ///
    /// # Errors
    /// [`Error::InvalidState`] before configuration, [`Error::Bus`] on
    /// transport failure.
    pub fn set_low_power(&mut self, on: bool) -> Result<(), Error<I::Error>> {
        self.require(DeviceState::Configured)?;
        self.device.bw_rate().modify(|w| {
            w.set_low_power(on);
        })?;
        Ok(())
    }

    /// Toggle the self-test force. Output during self-test is not checked here.
    ///
    /// # Errors
    /// [`Error::InvalidState`] before identification, [`Error::Bus`] on
    /// transport failure.
    pub fn start_selftest(&mut self, on: bool) -> Result<(), Error<I::Error>> {
        self.require(DeviceState::Identified)?;
        self.device.data_format().modify(|w| {
            w.set_self_test(on);
        })?;
        Ok(())
    }
}
