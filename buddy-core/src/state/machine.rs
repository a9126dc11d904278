//! Link state definitions

use super::events::LinkEvent;

/// Connection state of the BLE remote link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Broadcasting and waiting for a phone
    #[default]
    Advertising,
    /// Phone connected; button packets are serviced
    Connected,
}

impl LinkState {
    /// Check if remote packets should be read in this state
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkState::Connected)
    }

    /// Process an event and return the new state
    pub fn transition(self, event: LinkEvent) -> Self {
        match (self, event) {
            (LinkState::Advertising, LinkEvent::Connected) => LinkState::Connected,
            (LinkState::Connected, LinkEvent::Disconnected) => LinkState::Advertising,
            // Repeated events are no-ops
            (state, _) => state,
        }
    }
}
