//! GPIO interface trait
//!
//! The driver uses a single input pin: the interface chip's interrupt line,
//! which signals that a command response is ready to be read.

use crate::platform::Result;

/// GPIO pin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    /// Input mode (high impedance)
    Input,
    /// Input mode with pull-up resistor
    InputPullUp,
    /// Input mode with pull-down resistor
    InputPullDown,
    /// Output mode (push-pull)
    OutputPushPull,
    /// Output mode (open-drain)
    OutputOpenDrain,
}

/// GPIO interface trait
///
/// # Safety Invariants
///
/// - The pin must be initialized before use
/// - Only one owner per pin instance
/// - Pin number must be valid for the platform
pub trait GpioInterface {
    /// Set the pin high (logic level 1)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin is
    /// not configured as an output.
    fn set_high(&mut self) -> Result<()>;

    /// Set the pin low (logic level 0)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin is
    /// not configured as an output.
    fn set_low(&mut self) -> Result<()>;

    /// Read the pin state: `true` if high, `false` if low
    ///
    /// Valid in both input and output modes.
    fn read(&self) -> bool;

    /// Set the pin mode
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if the mode cannot be set.
    fn set_mode(&mut self, mode: GpioMode) -> Result<()>;

    /// Get the current pin mode
    fn mode(&self) -> GpioMode;
}
