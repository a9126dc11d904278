//! Packet types and payload decoding
//!
//! Payload lengths are fixed per packet type, so a packet is complete once
//! `1 + 1 + payload_len + 1` bytes have arrived.

use crate::button::Button;
use crate::parser::DecodeError;

/// Packet synchronization byte
pub const PACKET_START: u8 = b'!';

/// Length of a complete button packet
pub const BUTTON_PACKET_LEN: usize = 5;

/// Largest payload of any known packet type (quaternion: 4 × f32)
pub const MAX_PAYLOAD_LEN: usize = 16;

/// Packet type identifier (second byte on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketKind {
    /// `B`: control pad button
    Button,
    /// `C`: color picker
    Color,
    /// `A`: accelerometer
    Accelerometer,
    /// `G`: gyroscope
    Gyro,
    /// `M`: magnetometer
    Magnetometer,
    /// `Q`: orientation quaternion
    Quaternion,
    /// `L`: GPS location
    Location,
}

impl PacketKind {
    /// Parse a packet kind from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'B' => Some(PacketKind::Button),
            b'C' => Some(PacketKind::Color),
            b'A' => Some(PacketKind::Accelerometer),
            b'G' => Some(PacketKind::Gyro),
            b'M' => Some(PacketKind::Magnetometer),
            b'Q' => Some(PacketKind::Quaternion),
            b'L' => Some(PacketKind::Location),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            PacketKind::Button => b'B',
            PacketKind::Color => b'C',
            PacketKind::Accelerometer => b'A',
            PacketKind::Gyro => b'G',
            PacketKind::Magnetometer => b'M',
            PacketKind::Quaternion => b'Q',
            PacketKind::Location => b'L',
        }
    }

    /// Number of payload bytes between the type byte and the checksum
    pub fn payload_len(self) -> usize {
        match self {
            PacketKind::Button => 2,
            PacketKind::Color => 3,
            PacketKind::Accelerometer
            | PacketKind::Gyro
            | PacketKind::Magnetometer
            | PacketKind::Location => 12,
            PacketKind::Quaternion => 16,
        }
    }
}

/// Compute the checksum over all bytes preceding it
pub fn checksum(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    !sum
}

/// Control pad button press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPacket {
    pub button: Button,
    pub pressed: bool,
}

impl ButtonPacket {
    pub fn new(button: Button, pressed: bool) -> Self {
        Self { button, pressed }
    }

    /// Encode as the app would send it
    pub fn encode(&self) -> [u8; BUTTON_PACKET_LEN] {
        let mut buf = [
            PACKET_START,
            PacketKind::Button.to_byte(),
            self.button.to_byte(),
            if self.pressed { b'1' } else { b'0' },
            0,
        ];
        buf[4] = checksum(&buf[..4]);
        buf
    }

    fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let button = Button::from_byte(payload[0]).ok_or(DecodeError::InvalidButton)?;
        let pressed = match payload[1] {
            b'1' => true,
            b'0' => false,
            _ => return Err(DecodeError::InvalidState),
        };
        Ok(Self { button, pressed })
    }
}

/// Color picker selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorPacket {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Which phone sensor a sensor packet carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    Accelerometer,
    Gyro,
    Magnetometer,
    Quaternion,
    Location,
}

/// Phone sensor stream sample
///
/// Three-axis sensors fill `values[..3]`; quaternions use all four.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPacket {
    pub kind: SensorKind,
    pub values: [f32; 4],
}

impl SensorPacket {
    fn decode(kind: SensorKind, payload: &[u8]) -> Self {
        let mut values = [0.0f32; 4];
        for (value, chunk) in values.iter_mut().zip(payload.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { kind, values }
    }
}

/// A decoded Bluefruit Connect packet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    Button(ButtonPacket),
    Color(ColorPacket),
    Sensor(SensorPacket),
}

impl Packet {
    /// Decode a checksum-verified payload of the given kind
    ///
    /// `payload` must be exactly `kind.payload_len()` bytes.
    pub fn decode(kind: PacketKind, payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() != kind.payload_len() {
            return Err(DecodeError::InvalidLength);
        }

        let packet = match kind {
            PacketKind::Button => Packet::Button(ButtonPacket::decode(payload)?),
            PacketKind::Color => Packet::Color(ColorPacket {
                r: payload[0],
                g: payload[1],
                b: payload[2],
            }),
            PacketKind::Accelerometer => {
                Packet::Sensor(SensorPacket::decode(SensorKind::Accelerometer, payload))
            }
            PacketKind::Gyro => Packet::Sensor(SensorPacket::decode(SensorKind::Gyro, payload)),
            PacketKind::Magnetometer => {
                Packet::Sensor(SensorPacket::decode(SensorKind::Magnetometer, payload))
            }
            PacketKind::Quaternion => {
                Packet::Sensor(SensorPacket::decode(SensorKind::Quaternion, payload))
            }
            PacketKind::Location => {
                Packet::Sensor(SensorPacket::decode(SensorKind::Location, payload))
            }
        };
        Ok(packet)
    }

    /// Returns the button packet, if this is one
    pub fn as_button(&self) -> Option<&ButtonPacket> {
        match self {
            Packet::Button(b) => Some(b),
            _ => None,
        }
    }
}
