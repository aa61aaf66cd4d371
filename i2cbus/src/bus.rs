//! Bus handle
//!
//! One [`I2cBus`] per controller port. The handle owns (or borrows, via
//! `&mut D`) the driver and the transaction timeout; everything else is
//! state of the driver itself.

use heapless::Vec;
use i2cbus_core::bits::{self, BitField};
use i2cbus_hal::{BusConfig, I2cBusError, I2cDriver, I2cPort, TIMEOUT_DEFAULT_MS};

use crate::fmt::Bytes;

/// Largest payload accepted by [`I2cBus::write_burst`]
pub const MAX_BURST_WRITE: usize = 32;

/// Register access helpers over one I2C controller
///
/// The transaction timeout is passed to the driver on every call; whether
/// it is enforced is up to the driver.
#[derive(Debug)]
pub struct I2cBus<D> {
    driver: D,
    port: I2cPort,
    timeout_ms: u32,
}

impl<D> I2cBus<D> {
    /// Create a bus handle for `port`, driven by `driver`
    ///
    /// The controller is not touched until [`begin`](Self::begin).
    pub const fn new(port: I2cPort, driver: D) -> Self {
        Self {
            driver,
            port,
            timeout_ms: TIMEOUT_DEFAULT_MS,
        }
    }

    /// Controller port this handle drives
    pub const fn port(&self) -> I2cPort {
        self.port
    }

    /// Current transaction timeout in milliseconds
    pub const fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Borrow the underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the underlying driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the handle and return the driver
    pub fn release(self) -> D {
        self.driver
    }
}

impl<D: I2cDriver> I2cBus<D> {
    /// Configure the bus pins and clock and install the driver
    pub fn begin(&mut self, config: &BusConfig) -> Result<(), I2cBusError> {
        config.validate()?;
        debug!(
            "[port:{}] begin: sda={} scl={} pullups={}/{} clk={}Hz",
            self.port.index(),
            config.pins.sda.number(),
            config.pins.scl.number(),
            config.pins.sda_pullup.is_enabled(),
            config.pins.scl_pullup.is_enabled(),
            config.frequency,
        );
        self.driver.install(self.port, config).inspect_err(|e| {
            warn!("[port:{}] driver install failed: {:?}", self.port.index(), e);
        })
    }

    /// Stop the bus and uninstall the driver
    pub fn close(&mut self) -> Result<(), I2cBusError> {
        debug!("[port:{}] close", self.port.index());
        self.driver.uninstall(self.port)
    }

    /// Set the timeout used for every following transaction
    ///
    /// The value is handed to the driver with each transaction. Drivers
    /// over an embedded-hal peripheral cannot apply it; there the
    /// peripheral's own configuration bounds every transfer.
    pub fn set_timeout(&mut self, ms: u32) {
        debug!("[port:{}] timeout set to {}ms", self.port.index(), ms);
        self.timeout_ms = ms;
    }

    /// Read one register
    pub fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, I2cBusError> {
        let mut data = [0u8; 1];
        self.transfer(address, &[register], &mut data)?;
        trace!(
            "[port:{}, slave:0x{:02x}] read_byte [0x{:02x}]: 0x{:02x}",
            self.port.index(),
            address,
            register,
            data[0],
        );
        Ok(data[0])
    }

    /// Write one register
    pub fn write_byte(&mut self, address: u8, register: u8, data: u8) -> Result<(), I2cBusError> {
        self.transfer(address, &[register, data], &mut [])?;
        trace!(
            "[port:{}, slave:0x{:02x}] write_byte [0x{:02x}]: 0x{:02x}",
            self.port.index(),
            address,
            register,
            data,
        );
        Ok(())
    }

    /// Read `buf.len()` consecutive registers, one transaction each
    ///
    /// Register `register + i` lands in `buf[i]`. Stops at the first failure.
    pub fn read_bytes(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), I2cBusError> {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(address, register.wrapping_add(offset as u8))?;
        }
        Ok(())
    }

    /// Write `data` to consecutive registers, one transaction each
    ///
    /// `data[i]` goes to register `register + i`. Stops at the first failure.
    pub fn write_bytes(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), I2cBusError> {
        for (offset, &byte) in data.iter().enumerate() {
            self.write_byte(address, register.wrapping_add(offset as u8), byte)?;
        }
        Ok(())
    }

    /// Read consecutive registers in a single transaction
    ///
    /// Relies on the device auto-incrementing its register pointer.
    pub fn read_burst(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), I2cBusError> {
        if buf.is_empty() {
            return Err(I2cBusError::InvalidArgument);
        }
        self.transfer(address, &[register], buf)?;
        trace!(
            "[port:{}, slave:0x{:02x}] read_burst [0x{:02x}]: {:?}",
            self.port.index(),
            address,
            register,
            Bytes(buf),
        );
        Ok(())
    }

    /// Write consecutive registers in a single transaction
    ///
    /// Relies on the device auto-incrementing its register pointer. At most
    /// [`MAX_BURST_WRITE`] bytes.
    pub fn write_burst(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), I2cBusError> {
        if data.is_empty() {
            return Err(I2cBusError::InvalidArgument);
        }
        let mut frame: Vec<u8, { MAX_BURST_WRITE + 1 }> = Vec::new();
        // Cannot fail: the frame is empty and has room for the register byte
        let _ = frame.push(register);
        frame
            .extend_from_slice(data)
            .map_err(|_| I2cBusError::InvalidArgument)?;
        self.transfer(address, &frame, &mut [])?;
        trace!(
            "[port:{}, slave:0x{:02x}] write_burst [0x{:02x}]: {:?}",
            self.port.index(),
            address,
            register,
            Bytes(data),
        );
        Ok(())
    }

    /// Read bit `bit` (0-7) of a register
    pub fn read_bit(&mut self, address: u8, register: u8, bit: u8) -> Result<bool, I2cBusError> {
        let field = bit_field(bit, 1)?;
        let value = self.read_byte(address, register)?;
        Ok(bits::read_bit_field(value, field) != 0)
    }

    /// Set or clear bit `bit` (0-7) of a register, keeping the other bits
    pub fn write_bit(
        &mut self,
        address: u8,
        register: u8,
        bit: u8,
        value: bool,
    ) -> Result<(), I2cBusError> {
        self.update_field(address, register, bit_field(bit, 1)?, value as u8)
    }

    /// Read the `length`-bit field starting at bit `start` of a register
    ///
    /// The field comes back right-aligned.
    pub fn read_bits(
        &mut self,
        address: u8,
        register: u8,
        start: u8,
        length: u8,
    ) -> Result<u8, I2cBusError> {
        let field = bit_field(start, length)?;
        let value = self.read_byte(address, register)?;
        Ok(bits::read_bit_field(value, field))
    }

    /// Write the `length`-bit field starting at bit `start` of a register
    ///
    /// Bits of `value` above `length` are ignored; register bits outside the
    /// field are preserved.
    pub fn write_bits(
        &mut self,
        address: u8,
        register: u8,
        start: u8,
        length: u8,
        value: u8,
    ) -> Result<(), I2cBusError> {
        self.update_field(address, register, bit_field(start, length)?, value)
    }

    /// Check whether a device answers at `address`
    ///
    /// Issues an addressing-only transaction. `Ok` means the device ACKed.
    pub fn test(&mut self, address: u8) -> Result<(), I2cBusError> {
        self.transfer(address, &[], &mut [])
    }

    fn update_field(
        &mut self,
        address: u8,
        register: u8,
        field: BitField,
        value: u8,
    ) -> Result<(), I2cBusError> {
        let current = self.read_byte(address, register)?;
        let updated = bits::write_bit_field(current, field, value);
        self.write_byte(address, register, updated)
    }

    fn transfer(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), I2cBusError> {
        self.driver
            .execute(self.port, address, write, read, self.timeout_ms)
            .inspect_err(|e| {
                debug!(
                    "[port:{}, slave:0x{:02x}] transaction failed: {:?}",
                    self.port.index(),
                    address,
                    e,
                );
            })
    }
}

fn bit_field(start: u8, length: u8) -> Result<BitField, I2cBusError> {
    BitField::new(start, length).map_err(|_e| {
        warn!("invalid bit field: start={} length={}", _e.start, _e.length);
        I2cBusError::InvalidArgument
    })
}
