//! Events that trigger link state transitions

/// Link status changes observed by the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A phone connected
    Connected,
    /// The phone disconnected
    Disconnected,
}

impl LinkEvent {
    /// Event implied by the link's connected flag, if it differs from `state`
    pub fn observe(state: super::LinkState, connected: bool) -> Option<Self> {
        match (state.is_connected(), connected) {
            (false, true) => Some(LinkEvent::Connected),
            (true, false) => Some(LinkEvent::Disconnected),
            _ => None,
        }
    }
}
