//! Board-agnostic core logic for the Buddy animatronic firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (servo, speaker, touch pad, BLE link)
//! - Configuration types and the `figure.toml` parser
//! - Motion sequencing for the wave and lid servos
//! - Clip playback synchronised with motion
//! - Touch and remote-button dispatch tables
//! - Link state machine and the main control loop ([`figure::Figure`])

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod figure;
pub mod motion;
pub mod sound;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use figure::{Cycle, Figure, FigureError, Hardware};
