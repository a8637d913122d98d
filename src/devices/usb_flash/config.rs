//! Flash-file configuration and geometry types

use super::filename::MAX_FILENAME_LEN;
use super::FlashError;
use heapless::String;

/// Logical configuration of the flash file shown on the USB drive
///
/// Owned by the interface chip; the host reads it once and caches it. The
/// empty default exists only as the pre-load state of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashFileConfig {
    /// 8.3 filename, e.g. `DATA.BIN`
    pub file_name: String<MAX_FILENAME_LEN>,
    /// File size in bytes
    pub file_size: u32,
    /// Whether the file appears on the USB drive
    pub visible: bool,
}

impl FlashFileConfig {
    /// Build a configuration from its parts
    ///
    /// # Errors
    ///
    /// Returns `FlashError::InvalidParameter` if `file_name` does not fit
    /// the 8.3 string form. Full validation happens in
    /// [`set_configuration`](super::UsbFlashManager::set_configuration).
    pub fn new(file_name: &str, file_size: u32, visible: bool) -> Result<Self, FlashError> {
        let file_name = String::try_from(file_name).map_err(|_| FlashError::InvalidParameter)?;
        Ok(Self {
            file_name,
            file_size,
            visible,
        })
    }
}

/// Physical geometry of the flash-file storage area
///
/// Read-only from the host's perspective; the chip does not change geometry
/// at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashGeometry {
    /// Bytes per physical block
    pub block_size: u16,
    /// Number of physical blocks
    pub block_count: u8,
}

impl FlashGeometry {
    /// Total capacity of the storage area in bytes
    pub fn capacity(&self) -> u32 {
        u32::from(self.block_size) * u32::from(self.block_count)
    }
}
