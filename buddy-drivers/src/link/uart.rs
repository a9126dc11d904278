//! BLE UART bridge link
//!
//! The BLE module exposes the Nordic UART service as a plain serial port,
//! plus two GPIOs: a status line that is high while a phone is connected
//! and an enable line that turns advertising on.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_io::{Read, ReadReady};

use buddy_core::traits::{BleLink, LinkError};
use buddy_protocol::{DecodeError, Packet, PacketParser};

/// BLE link over a UART bridge module
pub struct UartLink<R, S, A> {
    rx: R,
    status: S,
    advertise: A,
    parser: PacketParser,
}

impl<R, S, A> UartLink<R, S, A>
where
    R: Read + ReadReady,
    S: InputPin,
    A: OutputPin,
{
    pub fn new(rx: R, status: S, advertise: A) -> Self {
        Self {
            rx,
            status,
            advertise,
            parser: PacketParser::new(),
        }
    }

    fn transport_error(&mut self) -> DecodeError {
        self.parser.reset();
        DecodeError::Transport
    }
}

impl<R, S, A> BleLink for UartLink<R, S, A>
where
    R: Read + ReadReady,
    S: InputPin,
    A: OutputPin,
{
    fn start_advertising(&mut self) -> Result<(), LinkError> {
        self.advertise
            .set_high()
            .map_err(|_| LinkError::Advertising)
    }

    fn stop_advertising(&mut self) -> Result<(), LinkError> {
        // Bytes from a previous connection are stale
        self.parser.reset();
        self.advertise
            .set_low()
            .map_err(|_| LinkError::Advertising)
    }

    fn is_connected(&mut self) -> bool {
        self.status.is_high().unwrap_or(false)
    }

    fn poll_packet(&mut self) -> Result<Option<Packet>, DecodeError> {
        let mut byte = [0u8; 1];
        loop {
            match self.rx.read_ready() {
                Ok(true) => {}
                Ok(false) => return Ok(None),
                Err(_) => return Err(self.transport_error()),
            }
            match self.rx.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(_) => return Err(self.transport_error()),
            }
            if let Some(packet) = self.parser.feed(byte[0])? {
                return Ok(Some(packet));
            }
        }
    }
}
