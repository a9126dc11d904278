//! BLE link state machine
//!
//! The figure is either advertising for a phone or connected to one.
//! Touch pads work in both states; remote packets are only read while
//! connected.

pub mod events;
pub mod machine;

pub use events::LinkEvent;
pub use machine::LinkState;
