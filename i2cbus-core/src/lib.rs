//! Board-agnostic register logic for i2cbus
//!
//! This crate holds the only arithmetic the bus helpers perform: viewing
//! and updating contiguous bit fields inside a register byte. It does no
//! I/O, so the same code backs every driver.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bits;

pub use bits::{read_bit, read_bit_field, write_bit, write_bit_field, BitField, InvalidBitField};
