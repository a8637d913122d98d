//! Flash-file interface chip link layer
//!
//! Command/response exchanges with the USB interface chip over the shared
//! I2C bus. A command packet is a single command byte followed by a
//! command-specific payload; the response layout is fixed per command.
//!
//! # Wire format
//!
//! Write packet: `[command][payload...]`
//!
//! Response payloads:
//!
//! | Command     | Length | Layout                                  |
//! |-------------|--------|-----------------------------------------|
//! | filename    | 11     | 8-byte name field + 3-byte extension    |
//! | filesize    | 4      | u32 little-endian at offset 0           |
//! | visibility  | 1      | non-zero = visible                      |
//! | sector size | 4      | u16 little-endian at offset 2           |
//! | disk size   | 3      | u8 at offset 2                          |
//!
//! Offsets 0-1 of the geometry responses carry echoed command context and
//! are not interpreted here.

pub mod channel;

pub use channel::{ChannelState, PacketChannel, MAX_RETRIES, POLL_INTERVAL_MS};

use crate::platform::PlatformError;
use heapless::Vec;

/// Default 7-bit I2C address of the interface chip
pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Maximum bytes in a command packet, command byte included
pub const MAX_PACKET_LEN: usize = 16;

/// Maximum bytes in a response
pub const MAX_RESPONSE_LEN: usize = 16;

/// A response buffer as read from the chip
pub type Response = Vec<u8, MAX_RESPONSE_LEN>;

/// Command codes understood by the interface chip
///
/// Each command selects one configuration field and is used for both read
/// and write exchanges. Values are protocol constants with no meaning
/// beyond uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// 8.3 filename of the exposed flash file
    FileName = 0x01,
    /// Size of the exposed flash file in bytes
    FileSize = 0x02,
    /// Whether the flash file is visible on the USB drive
    Visibility = 0x03,
    /// Bytes per physical storage block
    SectorSize = 0x04,
    /// Number of physical storage blocks
    DiskSize = 0x05,
}

impl Command {
    /// Wire value of this command
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Fixed response length for a read of this command
    pub fn response_len(self) -> usize {
        match self {
            Command::FileName => 11,
            Command::FileSize => 4,
            Command::Visibility => 1,
            Command::SectorSize => 4,
            Command::DiskSize => 3,
        }
    }
}

/// Link-layer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Underlying bus transaction failed
    Bus(PlatformError),
    /// No response became available within the retry budget
    Timeout,
    /// Response shorter than the command's layout requires
    ResponseTooShort { expected: usize, actual: usize },
    /// Payload does not fit in a command packet
    PayloadTooLarge,
}

impl From<PlatformError> for LinkError {
    fn from(err: PlatformError) -> Self {
        LinkError::Bus(err)
    }
}

/// A command packet ready for transmission
///
/// Stored contiguously as `[command][payload...]` so it goes out in a single
/// bus write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPacket {
    bytes: Vec<u8, MAX_PACKET_LEN>,
}

impl CommandPacket {
    /// Build a packet from a command and its payload
    ///
    /// # Errors
    ///
    /// Returns `LinkError::PayloadTooLarge` if the payload exceeds
    /// `MAX_PACKET_LEN - 1` bytes.
    pub fn new(command: Command, payload: &[u8]) -> Result<Self, LinkError> {
        let mut bytes = Vec::new();
        bytes
            .push(command.code())
            .map_err(|_| LinkError::PayloadTooLarge)?;
        bytes
            .extend_from_slice(payload)
            .map_err(|_| LinkError::PayloadTooLarge)?;
        Ok(Self { bytes })
    }

    /// The command byte
    pub fn command(&self) -> u8 {
        self.bytes[0]
    }

    /// The payload following the command byte
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// The full wire image, command byte included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Read a `u8` field at `offset`, bounds-checked
pub fn read_u8(response: &[u8], offset: usize) -> Result<u8, LinkError> {
    response
        .get(offset)
        .copied()
        .ok_or(LinkError::ResponseTooShort {
            expected: offset + 1,
            actual: response.len(),
        })
}

/// Read a little-endian `u16` field at `offset`, bounds-checked
pub fn read_u16_le(response: &[u8], offset: usize) -> Result<u16, LinkError> {
    match response.get(offset..offset + 2) {
        Some(bytes) => Ok(u16::from_le_bytes([bytes[0], bytes[1]])),
        None => Err(LinkError::ResponseTooShort {
            expected: offset + 2,
            actual: response.len(),
        }),
    }
}

/// Read a little-endian `u32` field at `offset`, bounds-checked
pub fn read_u32_le(response: &[u8], offset: usize) -> Result<u32, LinkError> {
    match response.get(offset..offset + 4) {
        Some(bytes) => Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        None => Err(LinkError::ResponseTooShort {
            expected: offset + 4,
            actual: response.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_packet_layout() {
        let packet = CommandPacket::new(Command::Visibility, &[1]).unwrap();
        assert_eq!(packet.command(), 0x03);
        assert_eq!(packet.payload(), &[1]);
        assert_eq!(packet.as_bytes(), &[0x03, 1]);
    }

    #[test]
    fn test_command_packet_rejects_oversized_payload() {
        let payload = [0u8; MAX_PACKET_LEN];
        assert_eq!(
            CommandPacket::new(Command::FileName, &payload),
            Err(LinkError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_read_u16_le() {
        let response = [0xFF, 0xFF, 0x00, 0x02];
        assert_eq!(read_u16_le(&response, 2), Ok(512));
    }

    #[test]
    fn test_read_u32_le() {
        let response = [0x78, 0x56, 0x34, 0x12];
        assert_eq!(read_u32_le(&response, 0), Ok(0x1234_5678));
    }

    #[test]
    fn test_short_response_is_an_error_not_a_panic() {
        let response = [0x00, 0x01];
        assert_eq!(
            read_u32_le(&response, 0),
            Err(LinkError::ResponseTooShort {
                expected: 4,
                actual: 2
            })
        );
        assert_eq!(
            read_u8(&response, 2),
            Err(LinkError::ResponseTooShort {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_response_lengths_match_wire_layout() {
        assert_eq!(Command::FileName.response_len(), 11);
        assert_eq!(Command::FileSize.response_len(), 4);
        assert_eq!(Command::Visibility.response_len(), 1);
        assert_eq!(Command::SectorSize.response_len(), 4);
        assert_eq!(Command::DiskSize.response_len(), 3);
    }
}
