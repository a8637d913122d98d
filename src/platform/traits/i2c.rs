//! I2C interface trait
//!
//! Raw byte-level transaction primitive for the shared two-wire bus. Exact
//! transaction framing (start/stop, addressing, clock stretching) is the
//! platform's concern; the driver only sees whole transactions.

use crate::platform::Result;

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Bus frequency in Hz (typically 100_000 or 400_000)
    pub frequency: u32,
    /// Per-transaction timeout in microseconds
    pub timeout_us: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000,    // 100 kHz standard mode
            timeout_us: 1_000_000, // 1 second
        }
    }
}

/// I2C interface trait
///
/// # Safety Invariants
///
/// - The peripheral must be initialized before use
/// - Only one owner per bus instance; no concurrent access from multiple
///   contexts (the bus is shared with other peripheral traffic, callers
///   serialize externally)
/// - Address must be 7-bit (valid range: 0x00..=0x7F)
pub trait I2cInterface {
    /// Write data to a device: START - ADDR(W) - DATA - STOP
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or timeout.
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Read data from a device: START - ADDR(R) - DATA - STOP
    ///
    /// Fills `buffer` completely; a device that cannot supply enough bytes is
    /// a transaction failure.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or timeout.
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;

    /// Write then read with a repeated START in between
    ///
    /// Commonly used to select a register or command and fetch its value in
    /// one bus transaction.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or timeout.
    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()>;
}
