//! Bluefruit Connect packet protocol
//!
//! The Bluefruit Connect phone app talks to the figure over the Nordic UART
//! service. Every packet it sends has the same shape:
//!
//! ```text
//! ┌─────┬──────┬──────────────────┬──────────┐
//! │ '!' │ TYPE │ PAYLOAD          │ CHECKSUM │
//! │ 1B  │ 1B   │ fixed per TYPE   │ 1B       │
//! └─────┴──────┴──────────────────┴──────────┘
//! ```
//!
//! The checksum is the bitwise NOT of the byte sum of everything before it.
//! The figure only acts on button packets from the control pad; color and
//! sensor packets are decoded so the stream stays in sync, then ignored.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod button;
pub mod packet;
pub mod parser;

pub use button::Button;
pub use packet::{
    checksum, ButtonPacket, ColorPacket, Packet, PacketKind, SensorKind, SensorPacket,
    PACKET_START,
};
pub use parser::{DecodeError, PacketParser};
