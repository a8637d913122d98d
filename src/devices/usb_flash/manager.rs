//! Flash-file manager
//!
//! Facade over the packet channel: lazily loaded configuration and geometry
//! caches plus the (unimplemented) block-storage surface. Every operation is
//! synchronous and blocking; a cache-miss fetch or a write blocks the caller
//! for up to the channel's retry budget per exchange.

use super::config::{FlashFileConfig, FlashGeometry};
use super::{filename, FlashError};
use crate::communication::flashif::{
    self, Command, CommandPacket, LinkError, PacketChannel, DEFAULT_ADDRESS,
};
use crate::devices::traits::{BlockStorage, StorageError, MAX_TRANSFER_LEN};
use crate::platform::{GpioInterface, I2cInterface, TimerInterface};
use crate::{log_debug, log_warn};
use heapless::Vec;

/// Driver for the USB flash-file interface chip
///
/// Borrows its collaborators (bus, interrupt line, timer) at construction;
/// they must outlive the manager. The manager exclusively owns its cached
/// configuration, geometry and loaded flags. The loaded flags are
/// independent booleans and are never cleared once set: the chip is the
/// only writer of this state, so cached values stay authoritative until
/// restart.
pub struct UsbFlashManager<'a, I2C, IRQ, T>
where
    I2C: I2cInterface,
    IRQ: GpioInterface,
    T: TimerInterface,
{
    link: PacketChannel<'a, I2C, IRQ, T>,
    config: FlashFileConfig,
    geometry: FlashGeometry,
    config_loaded: bool,
    geometry_loaded: bool,
}

impl<'a, I2C, IRQ, T> UsbFlashManager<'a, I2C, IRQ, T>
where
    I2C: I2cInterface,
    IRQ: GpioInterface,
    T: TimerInterface,
{
    /// Create a manager talking to the chip at its default address
    pub fn new(bus: &'a mut I2C, irq: &'a IRQ, timer: &'a mut T) -> Self {
        Self::with_address(bus, irq, timer, DEFAULT_ADDRESS)
    }

    /// Create a manager for a chip at a non-default address
    pub fn with_address(bus: &'a mut I2C, irq: &'a IRQ, timer: &'a mut T, address: u8) -> Self {
        Self {
            link: PacketChannel::new(bus, irq, timer, address),
            config: FlashFileConfig::default(),
            geometry: FlashGeometry::default(),
            config_loaded: false,
            geometry_loaded: false,
        }
    }

    /// Filename, size and visibility of the flash file on the USB drive
    ///
    /// The first call performs three command/response exchanges (filename,
    /// filesize, visibility) and caches the result; later calls return the
    /// cache with zero bus traffic. A failed load propagates the error and
    /// leaves the cache unloaded, so the next call retries.
    pub fn get_configuration(&mut self) -> Result<FlashFileConfig, FlashError> {
        if !self.config_loaded {
            let response = self.link.request(Command::FileName)?;
            self.config.file_name = filename::decode(&response)?;

            let response = self.link.request(Command::FileSize)?;
            self.config.file_size = flashif::read_u32_le(&response, 0)?;

            let response = self.link.request(Command::Visibility)?;
            self.config.visible = flashif::read_u8(&response, 0)? != 0;

            self.config_loaded = true;
            log_debug!("usb-flash: configuration loaded");
        }

        Ok(self.config.clone())
    }

    /// Update the flash-file configuration on the chip
    ///
    /// Validates the filename locally first; a malformed name fails with
    /// `InvalidParameter` before any bus traffic and leaves the cache
    /// untouched. On a valid name, three write packets go out in order:
    /// filename record, file size, visibility. The sequence is not atomic:
    /// all three are attempted even if an earlier send fails, and the first
    /// error is returned.
    ///
    /// The local cache is committed unconditionally after the sends
    /// (optimistic caching): the chip applies each field independently, so
    /// the cache tracks the caller's intent while the returned error tells
    /// the caller the chip may disagree.
    ///
    /// `persist` asks the chip to keep the configuration across device
    /// reset. It is advisory: the current protocol revision has no
    /// persistence field and the chip persists writes on its own authority.
    /// It never changes local caching behavior.
    pub fn set_configuration(
        &mut self,
        config: &FlashFileConfig,
        persist: bool,
    ) -> Result<(), FlashError> {
        let record = filename::try_encode(&config.file_name)?;

        let name_packet = CommandPacket::new(Command::FileName, &record)?;
        // The size travels as its single low-order byte on this protocol
        // revision; the chip derives the real extent from its geometry.
        let size_packet = CommandPacket::new(Command::FileSize, &[config.file_size as u8])?;
        let visibility_packet =
            CommandPacket::new(Command::Visibility, &[u8::from(config.visible)])?;

        log_debug!(
            "usb-flash: writing configuration (persist={})",
            persist
        );

        let mut first_error: Option<LinkError> = None;
        for packet in [&name_packet, &size_packet, &visibility_packet] {
            if let Err(err) = self.link.send_packet(packet) {
                log_warn!("usb-flash: write failed for command {}", packet.command());
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        // Optimistic commit, see method docs
        self.config = config.clone();
        self.config_loaded = true;

        match first_error {
            None => Ok(()),
            Some(err) => Err(err.into()),
        }
    }

    /// Physical block size and block count of the storage area
    ///
    /// Lazily loaded once with two exchanges (sector size, disk size), then
    /// served from cache. There is no setter: geometry is read-only from
    /// the host and the chip does not change it at runtime.
    pub fn get_geometry(&mut self) -> Result<FlashGeometry, FlashError> {
        if !self.geometry_loaded {
            let response = self.link.request(Command::SectorSize)?;
            self.geometry.block_size = flashif::read_u16_le(&response, 2)?;

            let response = self.link.request(Command::DiskSize)?;
            self.geometry.block_count = flashif::read_u8(&response, 2)?;

            self.geometry_loaded = true;
            log_debug!(
                "usb-flash: geometry loaded ({} blocks of {} bytes)",
                self.geometry.block_count,
                self.geometry.block_size
            );
        }

        Ok(self.geometry)
    }
}

/// Block-storage surface of the interface chip
///
/// No operation is implemented in this driver revision; each reports
/// `Unsupported` rather than claiming success.
impl<'a, I2C, IRQ, T> BlockStorage for UsbFlashManager<'a, I2C, IRQ, T>
where
    I2C: I2cInterface,
    IRQ: GpioInterface,
    T: TimerInterface,
{
    fn remount(&mut self) -> Result<(), StorageError> {
        Err(StorageError::Unsupported)
    }

    fn read(
        &mut self,
        _address: u32,
        _length: usize,
    ) -> Result<Vec<u8, MAX_TRANSFER_LEN>, StorageError> {
        Err(StorageError::Unsupported)
    }

    fn write(&mut self, _data: &[u8], _address: u32) -> Result<(), StorageError> {
        Err(StorageError::Unsupported)
    }

    fn erase(&mut self, _address: u32, _length: usize) -> Result<(), StorageError> {
        Err(StorageError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{i2c::MAX_TXN_DATA, I2cTransaction, MockGpio, MockI2c, MockTimer};
    use crate::platform::I2cConfig;

    // Chip-side bytes for a full configuration load:
    // filename "DATA.BIN", size 0x1234, visible.
    fn queue_config_load(bus: &MockI2c) {
        bus.queue_read_data(b"DATA    BIN");
        bus.queue_read_data(&[0x34, 0x12, 0x00, 0x00]);
        bus.queue_read_data(&[0x01]);
    }

    #[test]
    fn test_get_configuration_loads_and_decodes() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();
        queue_config_load(&bus);

        {
            let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
            let config = manager.get_configuration().unwrap();
            assert_eq!(config.file_name.as_str(), "DATA.BIN");
            assert_eq!(config.file_size, 0x1234);
            assert!(config.visible);
        }
    }

    #[test]
    fn test_get_configuration_hits_the_bus_exactly_once() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();
        queue_config_load(&bus);

        {
            let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
            let first = manager.get_configuration().unwrap();
            let second = manager.get_configuration().unwrap();
            assert_eq!(first, second);
        }

        // Three request writes + three response reads, and nothing more
        // for the second call.
        assert_eq!(bus.transaction_count(), 6);
    }

    #[test]
    fn test_failed_load_leaves_cache_unloaded() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();
        queue_config_load(&bus);

        irq.set_input_state(true); // no response ready

        {
            let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
            assert_eq!(
                manager.get_configuration(),
                Err(FlashError::Link(LinkError::Timeout))
            );

            // Chip comes back: the next call must retry the load.
            irq.set_input_state(false);
            let config = manager.get_configuration().unwrap();
            assert_eq!(config.file_name.as_str(), "DATA.BIN");
        }
    }

    #[test]
    fn test_set_configuration_rejects_bad_name_without_bus_traffic() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();
        queue_config_load(&bus);

        {
            let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
            let loaded = manager.get_configuration().unwrap();

            let bad = FlashFileConfig::new("name.ex", 16, true).unwrap();
            assert_eq!(
                manager.set_configuration(&bad, false),
                Err(FlashError::InvalidParameter)
            );

            // Cache untouched
            assert_eq!(manager.get_configuration().unwrap(), loaded);
        }

        // Only the initial load hit the bus; the rejected write added nothing.
        assert_eq!(bus.transaction_count(), 6);
    }

    #[test]
    fn test_set_configuration_sends_three_packets_in_order() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();

        {
            let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
            let config = FlashFileConfig::new("LOG-07.TXT", 0x0201, false).unwrap();
            manager.set_configuration(&config, true).unwrap();

            // Cache now serves the new configuration without bus traffic
            assert_eq!(manager.get_configuration().unwrap(), config);
        }

        let log = bus.transactions();
        assert_eq!(log.len(), 3);

        let mut fname_wire: heapless::Vec<u8, MAX_TXN_DATA> = heapless::Vec::new();
        fname_wire.push(0x01).unwrap();
        fname_wire.extend_from_slice(b"LOG-07  TXT").unwrap();

        assert_eq!(
            log[0],
            I2cTransaction::Write {
                addr: DEFAULT_ADDRESS,
                data: fname_wire,
            }
        );
        assert_eq!(
            log[1],
            I2cTransaction::Write {
                addr: DEFAULT_ADDRESS,
                // Low-order byte of 0x0201
                data: heapless::Vec::from_slice(&[0x02, 0x01]).unwrap(),
            }
        );
        assert_eq!(
            log[2],
            I2cTransaction::Write {
                addr: DEFAULT_ADDRESS,
                data: heapless::Vec::from_slice(&[0x03, 0x00]).unwrap(),
            }
        );
    }

    #[test]
    fn test_set_configuration_commits_cache_despite_send_failure() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();
        bus.set_fail_writes(true);

        {
            let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
            let config = FlashFileConfig::new("DATA.BIN", 64, true).unwrap();

            let result = manager.set_configuration(&config, false);
            assert!(matches!(result, Err(FlashError::Link(LinkError::Bus(_)))));

            // Documented optimistic-cache policy: the cache tracks intent.
            assert_eq!(manager.get_configuration().unwrap(), config);
        }

        // All three sends were still attempted.
        assert_eq!(bus.transaction_count(), 3);
    }

    #[test]
    fn test_get_geometry_decodes_fixed_offsets() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();
        bus.queue_read_data(&[0x00, 0x00, 0x00, 0x02]); // block size 512
        bus.queue_read_data(&[0x00, 0x00, 64]); // 64 blocks

        {
            let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
            let geometry = manager.get_geometry().unwrap();
            assert_eq!(geometry.block_size, 512);
            assert_eq!(geometry.block_count, 64);

            // Cached: a second call adds no traffic.
            let again = manager.get_geometry().unwrap();
            assert_eq!(again, geometry);
        }

        assert_eq!(bus.transaction_count(), 4);
    }

    #[test]
    fn test_block_storage_is_explicitly_unsupported() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();

        let mut manager = UsbFlashManager::new(&mut bus, &irq, &mut timer);
        assert_eq!(manager.remount(), Err(StorageError::Unsupported));
        assert_eq!(manager.read(0, 16), Err(StorageError::Unsupported));
        assert_eq!(manager.write(&[0xFF], 0), Err(StorageError::Unsupported));
        assert_eq!(manager.erase(0, 512), Err(StorageError::Unsupported));
    }
}
