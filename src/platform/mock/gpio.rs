//! Mock GPIO implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use core::cell::Cell;

/// Mock GPIO implementation
///
/// Tracks pin level and mode, counts reads, and lets tests drive the input
/// level through a shared reference (the driver holds the pin borrowed for
/// its whole lifetime, so the test-side controls use interior mutability).
#[derive(Debug)]
pub struct MockGpio {
    level: Cell<bool>,
    mode: GpioMode,
    reads: Cell<u32>,
}

impl MockGpio {
    /// Create a new mock pin in output mode, driven low
    pub fn new_output() -> Self {
        Self {
            level: Cell::new(false),
            mode: GpioMode::OutputPushPull,
            reads: Cell::new(0),
        }
    }

    /// Create a new mock pin in input mode, reading low
    pub fn new_input() -> Self {
        Self {
            level: Cell::new(false),
            mode: GpioMode::Input,
            reads: Cell::new(0),
        }
    }

    /// Simulate the external signal level on an input pin
    pub fn set_input_state(&self, high: bool) {
        self.level.set(high);
    }

    /// Number of times the pin has been read
    pub fn read_count(&self) -> u32 {
        self.reads.get()
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull | GpioMode::OutputOpenDrain => {
                self.level.set(true);
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn set_low(&mut self) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull | GpioMode::OutputOpenDrain => {
                self.level.set(false);
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn read(&self) -> bool {
        self.reads.set(self.reads.get() + 1);
        self.level.get()
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gpio_input_state() {
        let gpio = MockGpio::new_input();
        assert!(!gpio.read());

        gpio.set_input_state(true);
        assert!(gpio.read());
        assert_eq!(gpio.read_count(), 2);
    }

    #[test]
    fn test_mock_gpio_output() {
        let mut gpio = MockGpio::new_output();
        gpio.set_high().unwrap();
        assert!(gpio.read());

        gpio.set_low().unwrap();
        assert!(!gpio.read());
    }

    #[test]
    fn test_mock_gpio_set_on_input_rejected() {
        let mut gpio = MockGpio::new_input();
        assert_eq!(
            gpio.set_high(),
            Err(PlatformError::Gpio(GpioError::InvalidMode))
        );
    }
}
