//! Device drivers
//!
//! Drivers built on the platform abstraction, plus hardware-independent
//! trait definitions under `traits/` so higher layers and tests never touch
//! a concrete bus.

pub mod traits;
pub mod usb_flash;
