//! Range, data rate, power control and self-test register updates.

use crate::common::*;
use adxl345::{Config, DataRate, DeviceState, Error, Range, WakeFrequency};

fn configured_driver(rest: &[I2cTrans]) -> Driver {
    let mut expectations = vec![
        trans_who_am_i(),
        trans_read(POWER_CTL, 0x00),
        trans_write(POWER_CTL, 0x13),
        trans_read(DATA_FORMAT, 0x00),
        trans_write(DATA_FORMAT, 0x08),
    ];
    expectations.extend_from_slice(rest);
    let mut driver = new_driver(&expectations);
    driver.identify().unwrap();
    driver.configure(Config::default()).unwrap();
    assert_eq!(driver.state(), DeviceState::Configured);
    driver
}

#[test]
fn set_range_preserves_full_resolution() {
    let mut driver = configured_driver(&[
        trans_read(DATA_FORMAT, 0b0000_1000),
        trans_write(DATA_FORMAT, 0b0000_1011),
    ]);

    driver.set_range_g(16).unwrap();
    assert_eq!(driver.state(), DeviceState::Configured);
    finish(driver);
}

#[test]
fn set_range_clears_previous_range() {
    let mut driver = configured_driver(&[
        trans_read(DATA_FORMAT, 0b1000_1011),
        trans_write(DATA_FORMAT, 0b1000_1001),
    ]);

    driver.set_range(Range::G4).unwrap();
    finish(driver);
}

#[test]
fn invalid_range_touches_nothing() {
    let mut driver = configured_driver(&[]);

    for g in [0, 1, 3, 12, 32] {
        assert_eq!(driver.set_range_g(g), Err(Error::InvalidConfigurationValue));
    }
    finish(driver);
}

#[test]
fn range_needs_configuration() {
    let mut driver = new_driver(&[trans_who_am_i()]);
    driver.identify().unwrap();

    assert_eq!(
        driver.set_range(Range::G8),
        Err(Error::InvalidState {
            required: DeviceState::Configured,
            actual: DeviceState::Identified,
        })
    );
    finish(driver);
}

#[test]
fn range_readback() {
    let mut driver = new_driver(&[
        trans_read(DATA_FORMAT, 0x00),
        trans_read(DATA_FORMAT, 0b0000_1011),
        trans_read(DATA_FORMAT, 0b1000_1010),
    ]);

    assert_eq!(driver.range().unwrap(), Range::G2);
    assert_eq!(driver.range().unwrap(), Range::G16);
    assert_eq!(driver.range().unwrap(), Range::G8);
    finish(driver);
}

#[test]
fn set_datarate_preserves_low_power() {
    let mut driver = configured_driver(&[
        trans_read(BW_RATE, 0x1A),
        trans_write(BW_RATE, 0x1F),
        trans_read(BW_RATE, 0x1F),
    ]);

    driver.set_datarate(DataRate::Hz3200).unwrap();
    assert_eq!(driver.datarate().unwrap(), DataRate::Hz3200);
    finish(driver);
}

#[test]
fn low_power_keeps_rate() {
    let mut driver = configured_driver(&[
        trans_read(BW_RATE, 0x0A),
        trans_write(BW_RATE, 0x1A),
        trans_read(BW_RATE, 0x1A),
        trans_write(BW_RATE, 0x0A),
    ]);

    driver.set_low_power(true).unwrap();
    driver.set_low_power(false).unwrap();
    finish(driver);
}

#[test]
fn disabling_auto_sleep_stops_measurement() {
    let mut driver = measuring_driver(&[
        trans_read(POWER_CTL, 0x1B),
        trans_write(POWER_CTL, 0x00),
        trans_read(DATA_FORMAT, 0x08),
        trans_write(DATA_FORMAT, 0x08),
        trans_read(POWER_CTL, 0x00),
        trans_write(POWER_CTL, 0x08),
    ]);

    driver
        .configure(Config {
            auto_sleep: false,
            wake_frequency: WakeFrequency::Hz8,
            full_resolution: true,
        })
        .unwrap();
    assert_eq!(driver.state(), DeviceState::Configured);
    assert!(matches!(
        driver.read_axes(),
        Err(Error::InvalidState {
            required: DeviceState::Measuring,
            actual: DeviceState::Configured,
        })
    ));

    driver.start_measuring().unwrap();
    assert_eq!(driver.state(), DeviceState::Measuring);
    finish(driver);
}

#[test]
fn stopped_measurement_survives_data_format_failure() {
    let mut driver = measuring_driver(&[
        trans_read(POWER_CTL, 0x1B),
        trans_write(POWER_CTL, 0x00),
        I2cTrans::write_read(DEV_ADDR, vec![DATA_FORMAT], vec![0]).with_error(BusError::Other),
    ]);

    assert_eq!(
        driver.configure(Config {
            auto_sleep: false,
            wake_frequency: WakeFrequency::Hz8,
            full_resolution: true,
        }),
        Err(Error::Bus(BusError::Other))
    );
    assert_eq!(driver.state(), DeviceState::Configured);
    assert_eq!(
        driver.read_axes(),
        Err(Error::InvalidState {
            required: DeviceState::Measuring,
            actual: DeviceState::Configured,
        })
    );
    finish(driver);
}

#[test]
fn changing_wake_frequency_keeps_measuring() {
    let mut driver = measuring_driver(&[
        trans_read(POWER_CTL, 0x1B),
        trans_write(POWER_CTL, 0x18),
        trans_read(DATA_FORMAT, 0x08),
        trans_write(DATA_FORMAT, 0x00),
    ]);

    driver
        .configure(Config {
            auto_sleep: true,
            wake_frequency: WakeFrequency::Hz8,
            full_resolution: false,
        })
        .unwrap();
    assert_eq!(driver.state(), DeviceState::Measuring);
    finish(driver);
}

#[test]
fn full_resolution_toggle() {
    let mut driver = configured_driver(&[
        trans_read(DATA_FORMAT, 0x0B),
        trans_write(DATA_FORMAT, 0x03),
        trans_read(DATA_FORMAT, 0x03),
        trans_write(DATA_FORMAT, 0x0B),
    ]);

    driver.set_full_resolution(false).unwrap();
    driver.set_full_resolution(true).unwrap();
    finish(driver);
}

#[test]
fn self_test_toggle() {
    let mut driver = new_driver(&[
        trans_who_am_i(),
        trans_read(DATA_FORMAT, 0x0B),
        trans_write(DATA_FORMAT, 0x8B),
        trans_read(DATA_FORMAT, 0x8B),
        trans_write(DATA_FORMAT, 0x0B),
    ]);
    driver.identify().unwrap();

    driver.start_selftest(true).unwrap();
    driver.start_selftest(false).unwrap();
    assert_eq!(driver.state(), DeviceState::Identified);
    finish(driver);
}

#[test]
fn write_failure_is_reported() {
    let mut driver = configured_driver(&[
        trans_read(DATA_FORMAT, 0x08),
        I2cTrans::write(DEV_ADDR, vec![DATA_FORMAT, 0x0A]).with_error(BusError::NoAcknowledge(
            embedded_hal::i2c::NoAcknowledgeSource::Data,
        )),
    ]);

    assert_eq!(
        driver.set_range(Range::G8),
        Err(Error::Bus(BusError::NoAcknowledge(
            embedded_hal::i2c::NoAcknowledgeSource::Data
        )))
    );
    finish(driver);
}
