//! Platform abstraction layer
//!
//! Hardware access is isolated behind the traits in this module so that the
//! driver core can be exercised on the host with mock collaborators.

pub mod error;
pub mod traits;

// Mock implementations for host testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{GpioInterface, GpioMode, I2cConfig, I2cInterface, TimerInterface};
