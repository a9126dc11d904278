//! PWM slice configuration
//!
//! The system clock runs at 125 MHz. Servos need a 20 ms period; audio
//! needs a carrier well above the audible range.

use embassy_rp::pwm::Config;

/// Clock divider for servo slices (125 MHz / 64 = 1.953 MHz)
const SERVO_DIVIDER: u8 = 64;

/// Counter top for a 50 Hz period at the servo divider
const SERVO_TOP: u16 = 39_061;

/// Counter top for audio slices (8-bit resolution, ~488 kHz carrier)
pub const AUDIO_TOP: u16 = 255;

/// 50 Hz configuration for a hobby servo slice
pub fn servo_config() -> Config {
    let mut config = Config::default();
    config.divider = SERVO_DIVIDER.into();
    config.top = SERVO_TOP;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Carrier configuration for the audio slice, starting at mid-level
pub fn audio_config() -> Config {
    let mut config = Config::default();
    config.top = AUDIO_TOP;
    config.compare_a = AUDIO_TOP / 2;
    config.compare_b = AUDIO_TOP / 2;
    config
}
