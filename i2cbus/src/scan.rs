//! Bus scanner
//!
//! Probes the whole 7-bit address space and reports which addresses ACK.

use heapless::Vec;
use i2cbus_hal::I2cDriver;

use crate::bus::I2cBus;

/// Highest 7-bit address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Number of addresses probed by a scan
pub const ADDRESS_COUNT: usize = MAX_ADDRESS as usize + 1;

/// Addresses that answered a scan, in ascending order
pub type ScanResult = Vec<u8, ADDRESS_COUNT>;

impl<D: I2cDriver> I2cBus<D> {
    /// Probe every address from 0x00 to 0x7F and log the ones that respond
    ///
    /// Each address gets exactly one independent probe with the current
    /// timeout; a short timeout makes the scan considerably faster.
    pub fn scanner(&mut self) -> ScanResult {
        info!("[port:{}] scanning I2C bus", self.port().index());

        let mut found = ScanResult::new();
        for address in 0..=MAX_ADDRESS {
            if self.test(address).is_ok() {
                info!("- device found at address 0x{:02x}", address);
                // Cannot fail: one slot per address
                let _ = found.push(address);
            }
        }

        if found.is_empty() {
            info!("[port:{}] scan done, no devices found", self.port().index());
        } else {
            info!(
                "[port:{}] scan done, {} device(s) found",
                self.port().index(),
                found.len(),
            );
        }
        found
    }
}
