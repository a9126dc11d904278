//! Hobby servo trait

/// Errors that can occur when commanding a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// PWM peripheral rejected the duty cycle
    Pwm,
}

/// Trait for position-controlled hobby servos
///
/// The figure never reads an angle back; the last commanded angle is the
/// only notion of position.
pub trait Servo {
    /// Command the servo to an angle in degrees
    ///
    /// The driver clamps angles past the servo's actuation range.
    fn set_angle(&mut self, angle: u8) -> Result<(), ServoError>;
}
