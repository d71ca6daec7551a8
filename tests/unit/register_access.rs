//! Raw register reads, writes and read-modify-write.

use crate::common::*;
use adxl345::{DeviceInterface, Error, Register};
use device_driver::RegisterInterface;

#[test]
fn byte_access() {
    let mut driver = new_driver(&[trans_read(BW_RATE, 0x0A), trans_write(0x1E, 0x7F)]);

    assert_eq!(driver.read_byte(Register::BwRate).unwrap(), 0x0A);
    driver.write_byte(Register::OfsX, 0x7F).unwrap();
    finish(driver);
}

#[test]
fn word_is_little_endian() {
    let mut driver = new_driver(&[
        I2cTrans::write_read(DEV_ADDR, vec![DATAX0], vec![0x34, 0x12]),
        I2cTrans::write_read(DEV_ADDR, vec![DATAY0], vec![0x00, 0xFF]),
    ]);

    assert_eq!(driver.read_word(Register::DataX0).unwrap(), 0x1234);
    assert_eq!(driver.read_word(Register::DataY0).unwrap(), -256);
    finish(driver);
}

#[test]
fn update_register_preserves_unmasked_bits() {
    let mut driver = new_driver(&[
        trans_read(DATA_FORMAT, 0b1010_1010),
        trans_write(DATA_FORMAT, 0b1010_0101),
    ]);

    let written = driver
        .update_register(Register::DataFormat, 0x0F, 0b1111_0101)
        .unwrap();
    assert_eq!(written, 0b1010_0101);
    finish(driver);
}

#[test]
fn failed_read_skips_write() {
    let mut driver = new_driver(&[
        I2cTrans::write_read(DEV_ADDR, vec![POWER_CTL], vec![0]).with_error(BusError::ArbitrationLoss),
    ]);

    assert_eq!(
        driver.update_register(Register::PowerCtl, 0x08, 0x08),
        Err(Error::Bus(BusError::ArbitrationLoss))
    );
    finish(driver);
}

#[test]
fn device_id_is_unchecked() {
    let mut driver = new_driver(&[trans_read(DEVID, 0x42)]);

    assert_eq!(driver.device_id().unwrap(), 0x42);
    finish(driver);
}

#[test]
fn interface_writes_every_byte() {
    let mut interface = DeviceInterface {
        i2c: I2cMock::new(&[
            I2cTrans::write(DEV_ADDR, vec![0x1E, 0x01, 0x02, 0x03]),
            I2cTrans::write(DEV_ADDR, vec![0x1D, 1, 2, 3, 4, 5, 6, 7, 8]),
        ]),
        address: DEV_ADDR,
    };

    interface.write_register(0x1E, 24, &[0x01, 0x02, 0x03]).unwrap();
    interface
        .write_register(0x1D, 64, &[1, 2, 3, 4, 5, 6, 7, 8])
        .unwrap();
    interface.i2c.done();
}

#[test]
#[should_panic]
fn oversized_write_is_never_truncated() {
    let mut interface = DeviceInterface {
        i2c: I2cMock::new(&[]),
        address: DEV_ADDR,
    };

    let _ = interface.write_register(0x1D, 72, &[0; 9]);
}
