//! Register-level access to I2C slave devices
//!
//! [`I2cBus`] wraps an [`I2cDriver`] bound to one controller port and turns
//! its single transaction primitive into the operations device drivers
//! actually want:
//!
//! - byte reads and writes of a device register
//! - single bits and bit fields inside a register (read-modify-write)
//! - register sequences, one transaction per byte or as an auto-increment
//!   burst
//! - presence probes and a full 7-bit address scan
//!
//! Errors are the driver's own [`I2cBusError`] categories, passed through
//! unchanged. Nothing is retried.
//!
//! ```ignore
//! use i2cbus::{BusConfig, GpioNum, I2cBus, I2cPort};
//!
//! let mut bus = I2cBus::new(I2cPort::Port0, driver);
//! bus.begin(&BusConfig::new(GpioNum(21), GpioNum(22)))?;
//! bus.set_timeout(10);
//!
//! // Wake the device: clear SLEEP (bit 6) of PWR_MGMT_1
//! bus.write_bit(0x68, 0x6B, 6, false)?;
//! // Select +/-8g: ACCEL_FS_SEL is bits 4:3 of ACCEL_CONFIG
//! bus.write_bits(0x68, 0x1C, 3, 2, 0b10)?;
//!
//! let who_am_i = bus.read_byte(0x68, 0x75)?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod bus;
pub mod scan;

#[cfg(test)]
mod mock;

pub use bus::I2cBus;
pub use scan::{ScanResult, MAX_ADDRESS};

pub use i2cbus_core::{BitField, InvalidBitField};
pub use i2cbus_hal::{
    BusConfig, GpioNum, I2cBusError, I2cDriver, I2cPort, PinConfig, Pullup, TIMEOUT_DEFAULT_MS,
};
