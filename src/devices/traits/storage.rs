//! Block storage capability trait
//!
//! Contract for reading, writing and erasing the flash-file storage area by
//! logical address. A provider that has not implemented an operation returns
//! `StorageError::Unsupported` so integrators can never mistake a stub for a
//! verified success path.

use heapless::Vec;

/// Maximum bytes per read transfer
pub const MAX_TRANSFER_LEN: usize = 256;

/// Block storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Operation is not implemented by this provider
    Unsupported,
    /// Address range falls outside the storage area
    OutOfRange,
    /// Underlying device reported a failure
    DeviceError,
}

/// Block storage interface
///
/// Addresses are logical byte offsets into the storage area; the provider
/// maps them onto physical blocks per its geometry.
pub trait BlockStorage {
    /// Remount the USB drive, if connected
    ///
    /// Idempotent: remounting an already-mounted drive is a success.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unsupported` if the provider cannot remount.
    fn remount(&mut self) -> Result<(), StorageError>;

    /// Read `length` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::OutOfRange` if the range exceeds the storage
    /// area and `StorageError::Unsupported` if reads are not implemented.
    fn read(&mut self, address: u32, length: usize)
        -> Result<Vec<u8, MAX_TRANSFER_LEN>, StorageError>;

    /// Write `data` starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::OutOfRange` if the range exceeds the storage
    /// area and `StorageError::Unsupported` if writes are not implemented.
    fn write(&mut self, data: &[u8], address: u32) -> Result<(), StorageError>;

    /// Erase every physical block overlapping `[address, address + length)`
    ///
    /// A block only partially covered by the range must be read, erased and
    /// rewritten so that its bytes outside the range are preserved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::OutOfRange` if the range exceeds the storage
    /// area and `StorageError::Unsupported` if erase is not implemented.
    fn erase(&mut self, address: u32, length: usize) -> Result<(), StorageError>;
}
