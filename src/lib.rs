#![cfg_attr(not(test), no_std)]

//! usb-flashfile - Host-side driver for a USB flash-file interface chip
//!
//! The companion interface chip owns USB mass-storage emulation and the
//! physical flash; the host configures the exposed "flash file" (name, size,
//! visibility) and reads the storage geometry over a shared I2C bus. The chip
//! is the sole authority for this state, so the driver caches everything it
//! reads and only goes back to the wire for writes.

// Platform abstraction layer (bus, IRQ pin and timer collaborators)
pub mod platform;

// Wire protocol: command packets and the bounded-retry exchange
pub mod communication;

// Device drivers using the platform abstraction
pub mod devices;

// Logging macros shared across modules
pub mod core;
