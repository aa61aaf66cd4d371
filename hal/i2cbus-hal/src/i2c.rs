//! I2C master driver abstraction
//!
//! Provides the trait a chip-specific driver implements so that the
//! register helpers can run on top of it.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::BusConfig;

/// Default transaction timeout in milliseconds
pub const TIMEOUT_DEFAULT_MS: u32 = 1000;

/// I2C controller identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum I2cPort {
    /// First I2C controller
    Port0,
    /// Second I2C controller
    Port1,
}

impl I2cPort {
    /// Look up a port by controller index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(I2cPort::Port0),
            1 => Some(I2cPort::Port1),
            _ => None,
        }
    }

    /// Controller index of this port
    pub const fn index(self) -> u8 {
        match self {
            I2cPort::Port0 => 0,
            I2cPort::Port1 => 1,
        }
    }
}

/// Outcome categories reported by an I2C driver
///
/// Every bus operation returns exactly one of these, passed through from the
/// driver without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Parameter error (bad port, malformed bit field, invalid config)
    InvalidArgument,
    /// Sending command failed, slave did not ACK the transfer
    TransferFailed,
    /// Driver not installed or not in master mode
    NotReady,
    /// Bus busy beyond the configured wait
    Timeout,
}

impl fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            I2cBusError::InvalidArgument => "invalid argument",
            I2cBusError::TransferFailed => "transfer failed, slave did not acknowledge",
            I2cBusError::NotReady => "driver not installed or not in master mode",
            I2cBusError::Timeout => "operation timed out, bus busy",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for I2cBusError {}

/// I2C master driver
///
/// The single collaborator the register helpers compose into reads, writes
/// and probes. Implementations own bus arbitration, clocking, ACK/NACK
/// handling and timeout enforcement.
pub trait I2cDriver {
    /// Configure the controller pins and clock and install the driver
    ///
    /// # Arguments
    /// * `port` - Controller to install on
    /// * `config` - Pins, pull-ups and clock frequency
    fn install(&mut self, port: I2cPort, config: &BusConfig) -> Result<(), I2cBusError>;

    /// Stop the controller and uninstall the driver
    fn uninstall(&mut self, port: I2cPort) -> Result<(), I2cBusError>;

    /// Run one transaction against a slave device
    ///
    /// Issues a START and the address, writes `write` with an ACK check on
    /// every byte, then (when `read` is non-empty) a repeated START and reads
    /// `read.len()` bytes, ACKing all but the last which is NACKed, then a
    /// STOP. With both buffers empty this is a presence check; a driver
    /// whose controller cannot address a device without a data phase may
    /// read a single byte instead.
    ///
    /// # Arguments
    /// * `port` - Controller to use
    /// * `address` - 7-bit slave address
    /// * `write` - Bytes to write (typically a register address)
    /// * `read` - Buffer to read into
    /// * `timeout_ms` - Maximum time to wait for the bus
    fn execute(
        &mut self,
        port: I2cPort,
        address: u8,
        write: &[u8],
        read: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), I2cBusError>;
}

impl<D: I2cDriver + ?Sized> I2cDriver for &mut D {
    fn install(&mut self, port: I2cPort, config: &BusConfig) -> Result<(), I2cBusError> {
        (**self).install(port, config)
    }

    fn uninstall(&mut self, port: I2cPort) -> Result<(), I2cBusError> {
        (**self).uninstall(port)
    }

    fn execute(
        &mut self,
        port: I2cPort,
        address: u8,
        write: &[u8],
        read: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), I2cBusError> {
        (**self).execute(port, address, write, read, timeout_ms)
    }
}
