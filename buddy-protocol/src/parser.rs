//! Streaming packet parser
//!
//! Bytes arrive from the BLE UART one at a time and may start mid-packet,
//! so the parser hunts for `'!'` before it trusts anything else.

use heapless::Vec;

use crate::packet::{Packet, PacketKind, MAX_PAYLOAD_LEN, PACKET_START};

/// Errors that can occur while decoding a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Type byte is not a known packet type
    UnknownType,
    /// Checksum mismatch
    InvalidChecksum,
    /// Button packet names a button outside '1'..'8'
    InvalidButton,
    /// Button packet state is neither '0' nor '1'
    InvalidState,
    /// Payload length does not match the packet type
    InvalidLength,
    /// Bytes were lost or corrupted by the transport (UART overrun, framing)
    Transport,
}

/// State machine for parsing incoming packets
#[derive(Debug, Clone)]
pub struct PacketParser {
    state: ParseState,
    kind: Option<PacketKind>,
    payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for '!'
    WaitingForStart,
    /// Got '!', waiting for the type byte
    WaitingForType,
    /// Reading fixed-length payload
    ReadingPayload,
    /// Waiting for checksum
    WaitingForChecksum,
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketParser {
    /// Create a new packet parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            kind: None,
            payload: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.kind = None;
        self.payload.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(packet))` when a complete valid packet is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a malformed packet.
    /// After an error the parser is back to hunting for `'!'`.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Packet>, DecodeError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == PACKET_START {
                    self.state = ParseState::WaitingForType;
                }
                Ok(None)
            }
            ParseState::WaitingForType => {
                let Some(kind) = PacketKind::from_byte(byte) else {
                    self.reset();
                    return Err(DecodeError::UnknownType);
                };
                self.kind = Some(kind);
                self.payload.clear();
                self.state = ParseState::ReadingPayload;
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Capacity covers the largest payload_len()
                let _ = self.payload.push(byte);
                let needed = self.kind.map(PacketKind::payload_len).unwrap_or(0);
                if self.payload.len() >= needed {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let Some(kind) = self.kind else {
                    self.reset();
                    return Err(DecodeError::UnknownType);
                };

                let sum = self
                    .payload
                    .iter()
                    .fold(PACKET_START.wrapping_add(kind.to_byte()), |acc, &b| {
                        acc.wrapping_add(b)
                    });
                let expected = !sum;

                if byte != expected {
                    self.reset();
                    return Err(DecodeError::InvalidChecksum);
                }

                let result = Packet::decode(kind, &self.payload);
                self.reset();
                result.map(Some)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete packet found, if any.
    /// Remaining bytes after a complete packet are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Packet>, DecodeError> {
        for &byte in bytes {
            if let Some(packet) = self.feed(byte)? {
                return Ok(Some(packet));
            }
        }
        Ok(None)
    }
}
