//! embedded-hal backed I2C master driver
//!
//! Lets the i2cbus register helpers run on any HAL that implements
//! `embedded_hal::i2c::I2c` (embassy, esp-hal, rp-hal, stm32 HALs, ...).
//!
//! An embedded-hal peripheral is already configured when it is handed
//! over, so `install` validates and records the [`BusConfig`] and arms the
//! driver rather than reprogramming pins. The peripheral's own timeout
//! setting bounds every transaction; the requested timeout is only
//! recorded.
//!
//! Presence probes are sent as a 1-byte read: several HALs (embassy-rp
//! among them) reject zero-length writes, and a read leaves the device's
//! register pointer where it was.

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

use embedded_hal::i2c::{ErrorKind, I2c};
use i2cbus_hal::{BusConfig, I2cBusError, I2cDriver, I2cPort};

/// Map an embedded-hal error onto the driver outcome categories
pub fn map_error_kind(kind: ErrorKind) -> I2cBusError {
    match kind {
        // Another master holds the bus
        ErrorKind::ArbitrationLoss => I2cBusError::Timeout,
        // NACK, bus error, overrun and anything a HAL adds later
        _ => I2cBusError::TransferFailed,
    }
}

/// [`I2cDriver`] over one embedded-hal I2C peripheral
#[derive(Debug)]
pub struct EmbeddedHalDriver<I2C> {
    i2c: I2C,
    port: I2cPort,
    config: Option<BusConfig>,
    last_timeout_ms: Option<u32>,
}

impl<I2C> EmbeddedHalDriver<I2C> {
    /// Wrap a peripheral that serves `port`
    pub const fn new(port: I2cPort, i2c: I2C) -> Self {
        Self {
            i2c,
            port,
            config: None,
            last_timeout_ms: None,
        }
    }

    /// Port served by this driver
    pub const fn port(&self) -> I2cPort {
        self.port
    }

    /// Config recorded by the last successful install
    pub fn config(&self) -> Option<&BusConfig> {
        self.config.as_ref()
    }

    /// Check if the driver is installed
    pub fn is_installed(&self) -> bool {
        self.config.is_some()
    }

    /// Timeout requested by the most recent transaction
    pub fn last_timeout_ms(&self) -> Option<u32> {
        self.last_timeout_ms
    }

    /// Consume the driver and return the peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn check_port(&self, port: I2cPort) -> Result<(), I2cBusError> {
        if port == self.port {
            Ok(())
        } else {
            warn!(
                "port {} requested from driver serving port {}",
                port.index(),
                self.port.index()
            );
            Err(I2cBusError::InvalidArgument)
        }
    }
}

impl<I2C: I2c> I2cDriver for EmbeddedHalDriver<I2C> {
    fn install(&mut self, port: I2cPort, config: &BusConfig) -> Result<(), I2cBusError> {
        self.check_port(port)?;
        if self.config.is_some() {
            return Err(I2cBusError::InvalidArgument);
        }
        config.validate()?;
        self.config = Some(*config);
        trace!("[port:{}] driver installed", port.index());
        Ok(())
    }

    fn uninstall(&mut self, port: I2cPort) -> Result<(), I2cBusError> {
        self.check_port(port)?;
        match self.config.take() {
            Some(_) => {
                trace!("[port:{}] driver uninstalled", port.index());
                Ok(())
            }
            None => Err(I2cBusError::NotReady),
        }
    }

    fn execute(
        &mut self,
        port: I2cPort,
        address: u8,
        write: &[u8],
        read: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), I2cBusError> {
        self.check_port(port)?;
        if self.config.is_none() {
            return Err(I2cBusError::NotReady);
        }
        self.last_timeout_ms = Some(timeout_ms);

        let result = if write.is_empty() && read.is_empty() {
            let mut scratch = [0u8; 1];
            self.i2c.read(address, &mut scratch)
        } else if read.is_empty() {
            self.i2c.write(address, write)
        } else if write.is_empty() {
            self.i2c.read(address, read)
        } else {
            self.i2c.write_read(address, write, read)
        };

        result.map_err(|e| {
            let kind = embedded_hal::i2c::Error::kind(&e);
            trace!("[slave:0x{:02x}] transfer error: {:?}", address, kind);
            map_error_kind(kind)
        })
    }
}
