//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in buddy-core for the figure's hardware:
//!
//! - Hobby servos driven by a 50 Hz PWM channel
//! - Capacitive touch pads measured by charge time
//! - WAV clip parsing and the built-in clip table
//! - The BLE UART bridge carrying Bluefruit Connect packets

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod audio;
pub mod link;
pub mod servo;
pub mod touch;
