//! Remote button dispatch

use buddy_protocol::Packet;

use super::action::{button_action, Action, Trigger};

/// Map a decoded packet to an action
///
/// Only button presses act; releases and color or sensor packets map to
/// `None`.
pub fn remote_action(packet: &Packet) -> Option<(Trigger, Action)> {
    let button = packet.as_button().filter(|b| b.pressed)?;
    Some((
        Trigger::Button(button.button),
        button_action(button.button),
    ))
}
