//! RP2040-specific HAL for the Buddy firmware
//!
//! This crate provides RP2040-specific implementations of the
//! `buddy-drivers` building blocks:
//!
//! - Charge-time touch sensing on bidirectional GPIO
//! - PWM slice configuration for servos and the speaker
//! - PWM audio streaming engine and its [`Speaker`] handle
//!
//! [`Speaker`]: buddy_core::traits::Speaker

#![no_std]

pub mod audio;
pub mod pwm;
pub mod touch;
