//! Pulse-width hobby servo
//!
//! A hobby servo reads the width of a pulse repeated every 20 ms. The
//! angle maps linearly onto the calibrated pulse range:
//!
//! ```text
//! pulse_us = min_pulse_us + (max_pulse_us - min_pulse_us) * angle / actuation_range
//! duty     = pulse_us * max_duty / 20_000
//! ```
//!
//! The PWM channel must already be configured for a 50 Hz period.

use embedded_hal::pwm::SetDutyCycle;

use buddy_core::config::ServoConfig;
use buddy_core::traits::{Servo, ServoError};

/// PWM period expected by hobby servos (µs)
pub const SERVO_PERIOD_US: u32 = 20_000;

/// Servo on a single PWM channel
pub struct PulseServo<C> {
    channel: C,
    config: ServoConfig,
}

impl<C: SetDutyCycle> PulseServo<C> {
    pub fn new(channel: C, config: ServoConfig) -> Self {
        Self { channel, config }
    }

    /// Pulse width for an angle, clamped to the actuation range
    pub fn pulse_us(&self, angle: u8) -> u16 {
        let range = self.config.actuation_range.max(1) as u32;
        let angle = (angle as u32).min(range);
        let min = self.config.min_pulse_us as u32;
        let span = (self.config.max_pulse_us as u32).saturating_sub(min);
        (min + span * angle / range) as u16
    }

    /// Duty cycle for an angle on this channel
    pub fn duty_for(&self, angle: u8) -> u16 {
        let max_duty = self.channel.max_duty_cycle() as u32;
        let duty = self.pulse_us(angle) as u32 * max_duty / SERVO_PERIOD_US;
        duty.min(max_duty) as u16
    }

}

impl<C: SetDutyCycle> Servo for PulseServo<C> {
    /// Angles past the actuation range hold the servo at its end stop
    fn set_angle(&mut self, angle: u8) -> Result<(), ServoError> {
        let duty = self.duty_for(angle);
        self.channel
            .set_duty_cycle(duty)
            .map_err(|_| ServoError::Pwm)
    }
}
