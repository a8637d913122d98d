//! USB flash-file manager
//!
//! Configures the flash file the interface chip presents on the USB drive:
//! its 8.3 filename, byte size and visibility, plus the read-only storage
//! geometry. The chip is the only writer of this state in normal operation,
//! so both the configuration and the geometry are fetched once and cached
//! for the lifetime of the manager.

pub mod config;
pub mod filename;
pub mod manager;

pub use config::{FlashFileConfig, FlashGeometry};
pub use manager::UsbFlashManager;

use crate::communication::flashif::LinkError;

/// Driver-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Supplied configuration is malformed (e.g. filename not 8.3)
    InvalidParameter,
    /// Command/response exchange failed
    Link(LinkError),
}

impl From<LinkError> for FlashError {
    fn from(err: LinkError) -> Self {
        FlashError::Link(err)
    }
}
