//! Timer interface trait
//!
//! Blocking delays and a monotonic clock. The protocol layer sleeps on the
//! calling thread between response polls; there is no async executor here.

use crate::platform::Result;

/// Timer interface trait
pub trait TimerInterface {
    /// Block for `us` microseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay cannot be honored.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Block for `ms` milliseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay cannot be honored.
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Microseconds since boot (monotonic)
    fn now_us(&self) -> u64;

    /// Milliseconds since boot (monotonic)
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
