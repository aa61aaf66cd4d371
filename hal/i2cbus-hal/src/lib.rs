//! i2cbus Hardware Abstraction Layer
//!
//! This crate defines the seam between the register helpers in `i2cbus`
//! and whatever actually drives the I2C controller. A chip HAL, a vendor
//! SDK binding or a test double implements [`I2cDriver`]; everything above
//! it only sequences transactions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / device drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  i2cbus (register byte/bit helpers)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  i2cbus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ i2cbus-hal-   │       │  vendor SDK   │
//! │   embedded    │       │   bindings    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`i2c::I2cDriver`] - install/uninstall/execute primitive
//! - [`i2c::I2cBusError`] - outcome categories reported by a driver
//! - [`config::BusConfig`] - pins, pull-ups and clock speed for `begin`
//! - [`gpio::GpioNum`], [`gpio::Pullup`] - pin identifiers

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod gpio;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use config::{BusConfig, PinConfig};
pub use gpio::{GpioNum, Pullup};
pub use i2c::{I2cBusError, I2cDriver, I2cPort, TIMEOUT_DEFAULT_MS};
