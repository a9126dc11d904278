//! Servo drivers

pub mod pulse;

pub use pulse::{PulseServo, SERVO_PERIOD_US};
