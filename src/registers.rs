//! ADXL345 register map.
//!
//! The configuration and data registers the driver touches are generated by
//! `device-driver`; [`Register`] names every address for raw access.

/// Value returned by the `DEVID` register on a genuine ADXL345.
pub const DEVICE_ID: u8 = 0xE5;

#[allow(unsafe_code)]
#[allow(missing_docs)]
mod generated {
    device_driver::create_device!(
        device_name: Adxl345Registers,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// DEVID - Device ID (0x00)
            /// Expected value: 0xE5
            register DevId {
                const ADDRESS = 0x00;
                const SIZE_BITS = 8;

                /// Device ID (should read 0xE5)
                device_id: uint = 0..8,
            },

            /// BW_RATE - Data rate and power mode control (0x2C)
            register BwRate {
                const ADDRESS = 0x2C;
                const SIZE_BITS = 8;

                /// Output data rate
                rate: uint as crate::codec::DataRate = 0..4,
                /// Reduced power operation
                low_power: bool = 4,
                reserved_7_5: uint = 5..8,
            },

            /// POWER_CTL - Power-saving features control (0x2D)
            register PowerCtl {
                const ADDRESS = 0x2D;
                const SIZE_BITS = 8;

                /// Read frequency in sleep mode
                wakeup: uint as crate::codec::WakeFrequency = 0..2,
                /// Sleep mode
                sleep: bool = 2,
                /// Measurement mode
                measure: bool = 3,
                /// Auto-sleep on inactivity
                auto_sleep: bool = 4,
                /// Activity/inactivity link
                link: bool = 5,
                reserved_7_6: uint = 6..8,
            },

            /// DATA_FORMAT - Data format control (0x31)
            register DataFormat {
                const ADDRESS = 0x31;
                const SIZE_BITS = 8;

                /// Measurement range
                range: uint as crate::codec::Range = 0..2,
                /// Left-justified output
                justify: bool = 2,
                /// Full resolution (constant 3.9 mg/LSB)
                full_res: bool = 3,
                reserved_4: uint = 4..5,
                /// Active-low interrupts
                int_invert: bool = 5,
                /// 3-wire SPI
                spi: bool = 6,
                /// Self-test force
                self_test: bool = 7,
            },

            /// DATAX0/DATAX1 - X-axis data (0x32, little-endian)
            register DataX {
                const ADDRESS = 0x32;
                const SIZE_BITS = 16;

                /// Two's complement X sample
                value: uint = 0..16,
            },

            /// DATAY0/DATAY1 - Y-axis data (0x34, little-endian)
            register DataY {
                const ADDRESS = 0x34;
                const SIZE_BITS = 16;

                /// Two's complement Y sample
                value: uint = 0..16,
            },

            /// DATAZ0/DATAZ1 - Z-axis data (0x36, little-endian)
            register DataZ {
                const ADDRESS = 0x36;
                const SIZE_BITS = 16;

                /// Two's complement Z sample
                value: uint = 0..16,
            },
        }
    );
}

pub use generated::*;

/// Device register addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    DevId = 0x00,
    ThreshTap = 0x1D,
    OfsX = 0x1E,
    OfsY = 0x1F,
    OfsZ = 0x20,
    Dur = 0x21,
    Latent = 0x22,
    Window = 0x23,
    ThreshAct = 0x24,
    ThreshInact = 0x25,
    TimeInact = 0x26,
    ActInactCtl = 0x27,
    ThreshFf = 0x28,
    TimeFf = 0x29,
    TapAxes = 0x2A,
    ActTapStatus = 0x2B,
    BwRate = 0x2C,
    PowerCtl = 0x2D,
    IntEnable = 0x2E,
    IntMap = 0x2F,
    IntSource = 0x30,
    DataFormat = 0x31,
    DataX0 = 0x32,
    DataX1 = 0x33,
    DataY0 = 0x34,
    DataY1 = 0x35,
    DataZ0 = 0x36,
    DataZ1 = 0x37,
    FifoCtl = 0x38,
    FifoStatus = 0x39,
}

impl Register {
    /// Bus address of the register.
    #[must_use]
    pub const fn addr(self) -> u8 {
        self as u8
    }
}
