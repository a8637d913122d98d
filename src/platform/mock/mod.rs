//! Mock platform implementations for host testing
//!
//! These doubles record every interaction so tests can assert exactly how
//! much bus traffic an operation generated, and let tests script the chip
//! side (response bytes, interrupt line level, write failures).

pub mod gpio;
pub mod i2c;
pub mod timer;

pub use gpio::MockGpio;
pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;
