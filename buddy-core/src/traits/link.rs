//! BLE remote-control link trait

use buddy_protocol::{DecodeError, Packet};

/// Errors that can occur when controlling the BLE radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Radio did not accept the advertising command
    Advertising,
}

/// Trait for the BLE UART link to the phone app
pub trait BleLink {
    /// Start broadcasting so the app can discover the figure
    fn start_advertising(&mut self) -> Result<(), LinkError>;

    /// Stop broadcasting
    fn stop_advertising(&mut self) -> Result<(), LinkError>;

    /// Check whether a phone is connected
    fn is_connected(&mut self) -> bool;

    /// Try to decode one inbound packet without blocking
    ///
    /// Returns `Ok(None)` when no complete packet has arrived yet.
    fn poll_packet(&mut self) -> Result<Option<Packet>, DecodeError>;
}
