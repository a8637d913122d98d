//! Bounded-retry packet exchange
//!
//! `PacketChannel` owns one in-flight command/response exchange at a time.
//! The chip raises its interrupt line low when a response is ready; until
//! then the channel polls at millisecond intervals, giving up after a fixed
//! number of attempts. Exhaustion is an explicit `Timeout` error, never an
//! empty buffer.

use super::{Command, CommandPacket, LinkError, Response, MAX_RESPONSE_LEN};
use crate::log_warn;
use crate::platform::{GpioInterface, I2cInterface, TimerInterface};

/// Maximum response-ready polls per exchange
pub const MAX_RETRIES: usize = 20;

/// Sleep between polls, in milliseconds
pub const POLL_INTERVAL_MS: u32 = 1;

/// Exchange state, observable for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// No exchange in flight
    Idle,
    /// A request has been sent and the response is being awaited
    AwaitingResponse,
}

/// Synchronous command/response channel to the interface chip
///
/// Borrows the bus, interrupt pin and timer collaborators for its lifetime;
/// the hardware handles stay owned by the caller. Every method blocks the
/// calling thread, a response wait for up to `MAX_RETRIES` x
/// `POLL_INTERVAL_MS`. At most one exchange may be in flight; sharing a
/// channel across contexts requires external serialization.
pub struct PacketChannel<'a, I2C, IRQ, T>
where
    I2C: I2cInterface,
    IRQ: GpioInterface,
    T: TimerInterface,
{
    bus: &'a mut I2C,
    irq: &'a IRQ,
    timer: &'a mut T,
    address: u8,
    state: ChannelState,
}

impl<'a, I2C, IRQ, T> PacketChannel<'a, I2C, IRQ, T>
where
    I2C: I2cInterface,
    IRQ: GpioInterface,
    T: TimerInterface,
{
    /// Create a channel to the chip at `address`
    pub fn new(bus: &'a mut I2C, irq: &'a IRQ, timer: &'a mut T, address: u8) -> Self {
        Self {
            bus,
            irq,
            timer,
            address,
            state: ChannelState::Idle,
        }
    }

    /// The chip's 7-bit bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current exchange state
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Transmit a command packet
    ///
    /// Side effect: the chip starts processing the command. No response is
    /// awaited here; use [`poll_response`](Self::poll_response) if the
    /// command produces one.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Bus` if the bus write fails.
    pub fn send_packet(&mut self, packet: &CommandPacket) -> Result<(), LinkError> {
        self.state = ChannelState::AwaitingResponse;
        let result = self.bus.write(self.address, packet.as_bytes());
        self.state = ChannelState::Idle;
        result.map_err(LinkError::Bus)
    }

    /// Issue a read request for `command` and await its response
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Bus` on a failed transaction and
    /// `LinkError::Timeout` when the retry budget is exhausted.
    pub fn request(&mut self, command: Command) -> Result<Response, LinkError> {
        self.bus
            .write(self.address, &[command.code()])
            .map_err(LinkError::Bus)?;
        self.await_response(command.response_len())
    }

    /// Await a response for `command` without sending a read request
    ///
    /// Used when the chip signals an unsolicited response, or when the
    /// request was issued earlier.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub fn poll_response(&mut self, command: Command) -> Result<Response, LinkError> {
        self.await_response(command.response_len())
    }

    /// The retry primitive: poll for readiness, then read `len` bytes
    fn await_response(&mut self, len: usize) -> Result<Response, LinkError> {
        self.state = ChannelState::AwaitingResponse;
        let read_len = len.min(MAX_RESPONSE_LEN);

        for _ in 0..MAX_RETRIES {
            if self.response_ready() {
                let mut buf = [0u8; MAX_RESPONSE_LEN];
                let result = self.bus.read(self.address, &mut buf[..read_len]);
                self.state = ChannelState::Idle;
                result.map_err(LinkError::Bus)?;

                let mut response = Response::new();
                // read_len <= capacity, cannot fail
                let _ = response.extend_from_slice(&buf[..read_len]);
                return Ok(response);
            }
            if let Err(err) = self.timer.delay_ms(POLL_INTERVAL_MS) {
                self.state = ChannelState::Idle;
                return Err(LinkError::Bus(err));
            }
        }

        self.state = ChannelState::Idle;
        log_warn!("flashif: response timeout after {} polls", MAX_RETRIES);
        Err(LinkError::Timeout)
    }

    /// The interrupt line is active low: low means a response is waiting
    fn response_ready(&self) -> bool {
        !self.irq.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communication::flashif::DEFAULT_ADDRESS;
    use crate::platform::mock::{I2cTransaction, MockGpio, MockI2c, MockTimer};
    use crate::platform::I2cConfig;
    use heapless::Vec;

    #[test]
    fn test_send_packet_single_bus_write() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();

        {
            let mut channel = PacketChannel::new(&mut bus, &irq, &mut timer, DEFAULT_ADDRESS);
            let packet = CommandPacket::new(Command::Visibility, &[1]).unwrap();
            channel.send_packet(&packet).unwrap();
            assert_eq!(channel.state(), ChannelState::Idle);
        }

        let log = bus.transactions();
        assert_eq!(log.len(), 1);
        assert_eq!(
            log[0],
            I2cTransaction::Write {
                addr: DEFAULT_ADDRESS,
                data: Vec::from_slice(&[0x03, 1]).unwrap(),
            }
        );
    }

    #[test]
    fn test_request_sends_then_reads_response() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();

        irq.set_input_state(false); // response ready (active low)
        bus.queue_read_data(&[0x12, 0x34, 0x56, 0x00]);

        {
            let mut channel = PacketChannel::new(&mut bus, &irq, &mut timer, DEFAULT_ADDRESS);
            let response = channel.request(Command::FileSize).unwrap();
            assert_eq!(&response[..], &[0x12, 0x34, 0x56, 0x00]);
            assert_eq!(channel.state(), ChannelState::Idle);
        }

        let log = bus.transactions();
        assert_eq!(log.len(), 2);
        assert_eq!(
            log[0],
            I2cTransaction::Write {
                addr: DEFAULT_ADDRESS,
                data: Vec::from_slice(&[0x02]).unwrap(),
            }
        );
        assert_eq!(
            log[1],
            I2cTransaction::Read {
                addr: DEFAULT_ADDRESS,
                len: 4,
            }
        );
        // Ready on the first poll: no sleeping
        assert_eq!(timer.now_us(), 0);
    }

    #[test]
    fn test_retry_exhaustion_is_exact() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();

        irq.set_input_state(true); // line idle, response never ready

        {
            let mut channel = PacketChannel::new(&mut bus, &irq, &mut timer, DEFAULT_ADDRESS);
            let result = channel.request(Command::FileName);
            assert_eq!(result, Err(LinkError::Timeout));
            assert_eq!(channel.state(), ChannelState::Idle);
        }

        // Exactly MAX_RETRIES readiness polls, a ~1 ms sleep after each,
        // and no read transaction ever issued (only the request write).
        assert_eq!(irq.read_count(), MAX_RETRIES as u32);
        assert_eq!(timer.now_us(), (MAX_RETRIES as u64) * 1000);
        assert_eq!(bus.transaction_count(), 1);
    }

    #[test]
    fn test_poll_response_reads_without_request() {
        let mut bus = MockI2c::new(I2cConfig::default());
        let irq = MockGpio::new_input();
        let mut timer = MockTimer::new();

        irq.set_input_state(false);
        bus.queue_read_data(&[0x01]);

        {
            let mut channel = PacketChannel::new(&mut bus, &irq, &mut timer, DEFAULT_ADDRESS);
            let response = channel.poll_response(Command::Visibility).unwrap();
            assert_eq!(&response[..], &[0x01]);
        }

        let log = bus.transactions();
        assert_eq!(log.len(), 1);
        assert_eq!(
            log[0],
            I2cTransaction::Read {
                addr: DEFAULT_ADDRESS,
                len: 1,
            }
        );
    }
}
