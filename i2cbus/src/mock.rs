//! Simulated I2C master driver for tests

use std::collections::BTreeMap;
use std::vec::Vec;

use i2cbus_hal::{BusConfig, I2cBusError, I2cDriver, I2cPort};

/// One transaction seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub port: I2cPort,
    pub address: u8,
    pub write: Vec<u8>,
    pub read_len: usize,
    pub timeout_ms: u32,
}

/// A device on the simulated bus: 256 registers and an auto-incrementing
/// register pointer
struct Device {
    registers: [u8; 256],
    pointer: u8,
}

/// Driver double with an in-memory bus
pub struct MockDriver {
    devices: BTreeMap<u8, Device>,
    /// Port and config of the current installation
    pub installed: Option<(I2cPort, BusConfig)>,
    /// Every `execute` call, including failed ones
    pub transactions: Vec<Transaction>,
    /// Fail the transaction with this index with this error
    pub fail_at: Option<(usize, I2cBusError)>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            devices: BTreeMap::new(),
            installed: None,
            transactions: Vec::new(),
            fail_at: None,
        }
    }

    pub fn add_device(&mut self, address: u8) {
        self.devices.insert(
            address,
            Device {
                registers: [0; 256],
                pointer: 0,
            },
        );
    }

    pub fn set_register(&mut self, address: u8, register: u8, value: u8) {
        self.device(address).registers[register as usize] = value;
    }

    pub fn register(&self, address: u8, register: u8) -> u8 {
        self.devices[&address].registers[register as usize]
    }

    fn device(&mut self, address: u8) -> &mut Device {
        self.devices
            .get_mut(&address)
            .expect("device not on simulated bus")
    }
}

impl I2cDriver for MockDriver {
    fn install(&mut self, port: I2cPort, config: &BusConfig) -> Result<(), I2cBusError> {
        if self.installed.is_some() {
            return Err(I2cBusError::InvalidArgument);
        }
        self.installed = Some((port, *config));
        Ok(())
    }

    fn uninstall(&mut self, port: I2cPort) -> Result<(), I2cBusError> {
        match self.installed {
            Some((installed, _)) if installed == port => {
                self.installed = None;
                Ok(())
            }
            _ => Err(I2cBusError::NotReady),
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
        let index = self.transactions.len();
        self.transactions.push(Transaction {
            port,
            address,
            write: write.to_vec(),
            read_len: read.len(),
            timeout_ms,
        });

        if !matches!(self.installed, Some((installed, _)) if installed == port) {
            return Err(I2cBusError::NotReady);
        }
        if let Some((at, error)) = self.fail_at {
            if at == index {
                return Err(error);
            }
        }

        let device = self
            .devices
            .get_mut(&address)
            .ok_or(I2cBusError::TransferFailed)?;

        if let Some((&register, data)) = write.split_first() {
            device.pointer = register;
            for &byte in data {
                device.registers[device.pointer as usize] = byte;
                device.pointer = device.pointer.wrapping_add(1);
            }
        }
        for byte in read.iter_mut() {
            *byte = device.registers[device.pointer as usize];
            device.pointer = device.pointer.wrapping_add(1);
        }
        Ok(())
    }
}
