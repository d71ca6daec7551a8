//! Blocking bring-up followed by a short smoothed sampling loop.
//!
//! The bus is an `embedded-hal-mock` script of what a resting sensor answers,
//! so this runs on the host. Hand any `embedded_hal::i2c::I2c` to
//! `Adxl345::new` to run the same sequence on hardware.

use adxl345::{Adxl345, Config, DataRate, Error, FilterState, SlaveAddr};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

const ADDR: u8 = 0x53;
const WEIGHT: f32 = 0.25;

type SensorError = Error<ErrorKind>;

fn read(reg: u8, data: &[u8]) -> I2cTrans {
    I2cTrans::write_read(ADDR, vec![reg], data.to_vec())
}

fn write(reg: u8, value: u8) -> I2cTrans {
    I2cTrans::write(ADDR, vec![reg, value])
}

fn axes((x, y, z): (i16, i16, i16)) -> [I2cTrans; 3] {
    [
        read(0x32, &x.to_le_bytes()),
        read(0x34, &y.to_le_bytes()),
        read(0x36, &z.to_le_bytes()),
    ]
}

fn script(readings: &[(i16, i16, i16)]) -> Vec<I2cTrans> {
    let mut script = vec![
        // DEVID
        read(0x00, &[0xE5]),
        // auto-sleep, 1 Hz wakeup
        read(0x2D, &[0x00]),
        write(0x2D, 0x13),
        // full resolution
        read(0x31, &[0x00]),
        write(0x31, 0x08),
        // MEASURE
        read(0x2D, &[0x13]),
        write(0x2D, 0x1B),
        // 100 Hz -> 50 Hz
        read(0x2C, &[0x0A]),
        write(0x2C, 0x09),
    ];
    for &reading in readings {
        script.extend(axes(reading));
    }
    script
}

fn main() {
    let readings = [(3, -2, 256), (5, -1, 255), (4, 0, 258), (2, -3, 257), (60, 1, 250)];
    let mut driver = Adxl345::new(I2cMock::new(&script(&readings)), SlaveAddr::Default);

    if let Err(err) = driver.init(Config::default()) {
        panic!("Failed to initialise ADXL345: {err:?}");
    }
    if let Err(err) = driver.set_datarate(DataRate::Hz50) {
        panic!("Failed to set the data rate: {err:?}");
    }
    println!("[adxl345] sensor ready ({:?})", driver.state());

    let mut filter = match driver.read_axes() {
        Ok(raw) => FilterState::seeded(raw),
        Err(err) => {
            log_error("read_axes", err);
            FilterState::default()
        }
    };

    for _ in 1..readings.len() {
        match driver.sample(filter, WEIGHT) {
            Ok((sample, next)) => {
                println!(
                    "[adxl345] raw=({}, {}, {}) m/s2=({:.3}, {:.3}, {:.3}) filtered=({:.3}, {:.3}, {:.3})",
                    sample.raw.x,
                    sample.raw.y,
                    sample.raw.z,
                    sample.acceleration.x,
                    sample.acceleration.y,
                    sample.acceleration.z,
                    sample.filtered.x,
                    sample.filtered.y,
                    sample.filtered.z,
                );
                filter = next;
            }
            Err(err) => log_error("sample", err),
        }
    }

    driver.destroy().done();
}

fn log_error(label: &str, err: SensorError) {
    eprintln!("[adxl345] {label} failed: {err:?}");
}
