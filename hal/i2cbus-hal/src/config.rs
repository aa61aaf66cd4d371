//! Bus configuration
//!
//! Everything `begin` needs to bring a controller up, with the defaults the
//! helpers have always used: internal pull-ups on and a 100 kHz clock.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gpio::{GpioNum, Pullup};
use crate::i2c::I2cBusError;

/// Highest clock frequency the master driver supports
pub const MAX_FREQUENCY: u32 = 1_000_000;

/// SDA/SCL pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Data line
    pub sda: GpioNum,
    /// Clock line
    pub scl: GpioNum,
    /// Internal pull-up on SDA
    pub sda_pullup: Pullup,
    /// Internal pull-up on SCL
    pub scl_pullup: Pullup,
}

impl PinConfig {
    /// Create a pin config with internal pull-ups enabled on both lines
    pub const fn new(sda: GpioNum, scl: GpioNum) -> Self {
        Self {
            sda,
            scl,
            sda_pullup: Pullup::Enabled,
            scl_pullup: Pullup::Enabled,
        }
    }
}

/// I2C bus configuration passed to `begin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Pin assignment and pull-ups
    pub pins: PinConfig,
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new(GpioNum(21), GpioNum(22))
    }
}

impl BusConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: u32 = 100_000;

    /// Fast mode (400 kHz)
    pub const FAST: u32 = 400_000;

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: u32 = MAX_FREQUENCY;

    /// Create a config for the given pins, pull-ups on, 100 kHz clock
    pub const fn new(sda: GpioNum, scl: GpioNum) -> Self {
        Self {
            pins: PinConfig::new(sda, scl),
            frequency: Self::STANDARD,
        }
    }

    /// Set the internal pull-up state of both lines
    pub const fn with_pullups(mut self, sda: Pullup, scl: Pullup) -> Self {
        self.pins.sda_pullup = sda;
        self.pins.scl_pullup = scl;
        self
    }

    /// Set the clock frequency in Hz
    pub const fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Check the config before handing it to a driver
    pub fn validate(&self) -> Result<(), I2cBusError> {
        if self.frequency == 0 || self.frequency > MAX_FREQUENCY {
            return Err(I2cBusError::InvalidArgument);
        }
        if self.pins.sda == self.pins.scl {
            return Err(I2cBusError::InvalidArgument);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BusConfig::default();
        assert_eq!(config.frequency, 100_000);
        assert!(config.pins.sda_pullup.is_enabled());
        assert!(config.pins.scl_pullup.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BusConfig::new(GpioNum(4), GpioNum(5))
            .with_pullups(Pullup::Disabled, Pullup::Enabled)
            .with_frequency(BusConfig::FAST);
        assert_eq!(config.pins.sda, GpioNum(4));
        assert_eq!(config.pins.scl, GpioNum(5));
        assert_eq!(config.pins.sda_pullup, Pullup::Disabled);
        assert_eq!(config.frequency, 400_000);
    }

    #[test]
    fn test_validate_rejects_bad_frequency() {
        let zero = BusConfig::default().with_frequency(0);
        assert_eq!(zero.validate(), Err(I2cBusError::InvalidArgument));

        let too_fast = BusConfig::default().with_frequency(MAX_FREQUENCY + 1);
        assert_eq!(too_fast.validate(), Err(I2cBusError::InvalidArgument));

        let fast_plus = BusConfig::default().with_frequency(BusConfig::FAST_PLUS);
        assert!(fast_plus.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shared_pin() {
        let config = BusConfig::new(GpioNum(3), GpioNum(3));
        assert_eq!(config.validate(), Err(I2cBusError::InvalidArgument));
    }
}
