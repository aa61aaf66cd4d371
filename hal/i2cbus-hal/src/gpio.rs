//! GPIO pin identifiers
//!
//! The bus only needs to name the SDA and SCL lines and say whether the
//! controller should enable its internal pull-ups on them. Routing the
//! signals is left to the driver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GPIO pin number as understood by the target's pin matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpioNum(pub u8);

impl GpioNum {
    /// Raw pin number
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for GpioNum {
    fn from(pin: u8) -> Self {
        Self(pin)
    }
}

/// Internal pull-up resistor setting for a bus line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pullup {
    /// Internal pull-up enabled
    #[default]
    Enabled,
    /// Internal pull-up disabled (external resistors fitted)
    Disabled,
}

impl Pullup {
    /// Check if the pull-up is enabled
    pub const fn is_enabled(self) -> bool {
        matches!(self, Pullup::Enabled)
    }
}

impl From<bool> for Pullup {
    fn from(enabled: bool) -> Self {
        if enabled {
            Pullup::Enabled
        } else {
            Pullup::Disabled
        }
    }
}
