//! Platform abstraction traits
//!
//! Trait definitions the platform implementation must provide. The driver
//! borrows these collaborators at construction and never owns the hardware.

pub mod gpio;
pub mod i2c;
pub mod timer;

// Re-export trait interfaces
pub use gpio::{GpioInterface, GpioMode};
pub use i2c::{I2cConfig, I2cInterface};
pub use timer::TimerInterface;
