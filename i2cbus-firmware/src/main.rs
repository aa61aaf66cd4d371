//! i2cbus demo firmware
//!
//! Brings up I2C0 on an RP2040 board (SDA=GP4, SCL=GP5), scans the bus
//! periodically and, when an MPU-6050 class IMU answers at 0x68, exercises
//! the register helpers on it: byte read, single-bit and bit-field
//! read-modify-write, and a burst read of the accelerometer.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use i2cbus::{BusConfig, GpioNum, I2cBus, I2cBusError, I2cDriver, I2cPort, Pullup};
use i2cbus_hal_embedded::EmbeddedHalDriver;

/// Settings generated from bus.toml
mod bus_config {
    include!(concat!(env!("OUT_DIR"), "/bus_config.rs"));
}

/// GPIO wiring of I2C0
const SDA_PIN: u8 = 4;
const SCL_PIN: u8 = 5;

/// MPU-6050 register map (subset)
mod imu {
    pub const ADDRESS: u8 = 0x68;
    pub const WHO_AM_I: u8 = 0x75;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;

    /// PWR_MGMT_1 sleep bit
    pub const SLEEP_BIT: u8 = 6;
    /// ACCEL_CONFIG full-scale select, bits 4:3
    pub const AFS_SEL_START: u8 = 3;
    pub const AFS_SEL_LENGTH: u8 = 2;
    /// +/-8g
    pub const AFS_SEL_8G: u8 = 0b10;
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("i2cbus firmware starting...");

    let p = embassy_rp::init(Default::default());

    let bus_config = BusConfig::new(GpioNum(SDA_PIN), GpioNum(SCL_PIN))
        .with_pullups(
            Pullup::from(bus_config::SDA_PULLUP),
            Pullup::from(bus_config::SCL_PULLUP),
        )
        .with_frequency(bus_config::FREQUENCY);

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = bus_config.frequency;
    i2c_config.sda_pullup = bus_config.pins.sda_pullup.is_enabled();
    i2c_config.scl_pullup = bus_config.pins.scl_pullup.is_enabled();
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut bus = I2cBus::new(I2cPort::Port0, EmbeddedHalDriver::new(I2cPort::Port0, i2c));
    if let Err(e) = bus.begin(&bus_config) {
        error!("Failed to start I2C bus: {:?}", e);
        return;
    }
    info!("I2C0 ready at {} Hz", bus_config.frequency);

    loop {
        let found = bus.scanner();
        info!("Devices: {:02x}", found.as_slice());

        if found.contains(&imu::ADDRESS) {
            if let Err(e) = exercise_imu(&mut bus) {
                warn!("IMU access failed: {:?}", e);
            }
        }

        Timer::after_secs(bus_config::SCAN_INTERVAL_S).await;
    }
}

/// Wake the IMU, select +/-8g and read one accelerometer sample
fn exercise_imu<D: I2cDriver>(bus: &mut I2cBus<D>) -> Result<(), I2cBusError> {
    let who_am_i = bus.read_byte(imu::ADDRESS, imu::WHO_AM_I)?;
    info!("IMU WHO_AM_I = 0x{:02x}", who_am_i);

    if bus.read_bit(imu::ADDRESS, imu::PWR_MGMT_1, imu::SLEEP_BIT)? {
        info!("IMU asleep, waking");
        bus.write_bit(imu::ADDRESS, imu::PWR_MGMT_1, imu::SLEEP_BIT, false)?;
    }

    bus.write_bits(
        imu::ADDRESS,
        imu::ACCEL_CONFIG,
        imu::AFS_SEL_START,
        imu::AFS_SEL_LENGTH,
        imu::AFS_SEL_8G,
    )?;
    let afs_sel = bus.read_bits(
        imu::ADDRESS,
        imu::ACCEL_CONFIG,
        imu::AFS_SEL_START,
        imu::AFS_SEL_LENGTH,
    )?;
    debug!("AFS_SEL = {}", afs_sel);

    let mut raw = [0u8; 6];
    bus.read_burst(imu::ADDRESS, imu::ACCEL_XOUT_H, &mut raw)?;
    let x = i16::from_be_bytes([raw[0], raw[1]]);
    let y = i16::from_be_bytes([raw[2], raw[3]]);
    let z = i16::from_be_bytes([raw[4], raw[5]]);
    info!("Accel raw: x={} y={} z={}", x, y, z);

    Ok(())
}
