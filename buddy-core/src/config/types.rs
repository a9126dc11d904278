//! Configuration type definitions
//!
//! Defaults reproduce the figure as it shipped: the wave servo ramps
//! 0 → 50, sweeps 50 ↔ 135 in steps of 3 every 20 ms, and the lid opens
//! one degree at a time to 115.

use super::{ConfigError, SoundCatalog};

/// Number of touch pads on the board
pub const PAD_COUNT: usize = 5;

/// Wave servo stepping profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaveProfile {
    /// Rest angle, and where ramp-up starts and ramp-down settles
    pub start_angle: u8,
    /// Ramp-up target and the low end of each sweep
    pub mid_angle: u8,
    /// High end of each sweep
    pub end_angle: u8,
    /// Degrees per step
    pub step: u8,
    /// Delay after each step (ms)
    pub step_delay_ms: u32,
}

impl Default for WaveProfile {
    fn default() -> Self {
        Self {
            start_angle: 0,
            mid_angle: 50,
            end_angle: 135,
            step: 3,
            step_delay_ms: 20,
        }
    }
}

/// Lid opening profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LidProfile {
    /// Final angle of the open sequence
    pub open_angle: u8,
    /// Angle commanded at boot
    pub rest_angle: u8,
    /// Steps with an index above this are followed by `step_delay_ms`
    pub slow_after: u8,
    /// Delay after each slow step (ms)
    pub step_delay_ms: u32,
}

impl Default for LidProfile {
    fn default() -> Self {
        Self {
            open_angle: 115,
            rest_angle: 115,
            slow_after: 0,
            step_delay_ms: 50,
        }
    }
}

/// Pulse-width servo calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at angle 0 (µs)
    pub min_pulse_us: u16,
    /// Pulse width at `actuation_range` (µs)
    pub max_pulse_us: u16,
    /// Largest commandable angle (degrees)
    pub actuation_range: u8,
}

impl ServoConfig {
    /// Wave servo calibration
    pub const fn wave() -> Self {
        Self {
            min_pulse_us: 750,
            max_pulse_us: 2250,
            actuation_range: 180,
        }
    }

    /// Lid servo calibration
    pub const fn lid() -> Self {
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2250,
            actuation_range: 180,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pulse_us >= self.max_pulse_us || self.actuation_range == 0 {
            return Err(ConfigError::InvalidRange);
        }
        Ok(())
    }
}

/// Touch sensitivity adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// Amount added to every pad threshold per pass
    pub threshold_step: u16,
    /// Passes per "raise thresholds" command
    pub threshold_passes: u8,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            threshold_step: 50,
            threshold_passes: 2,
        }
    }
}

/// Complete figure configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FigureConfig {
    pub catalog: SoundCatalog,
    pub wave: WaveProfile,
    pub lid: LidProfile,
    pub wave_servo: ServoConfig,
    pub lid_servo: ServoConfig,
    pub touch: TouchConfig,
    /// Delay between control loop iterations (ms)
    pub poll_interval_ms: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            catalog: SoundCatalog::default(),
            wave: WaveProfile::default(),
            lid: LidProfile::default(),
            wave_servo: ServoConfig::wave(),
            lid_servo: ServoConfig::lid(),
            touch: TouchConfig::default(),
            poll_interval_ms: 10,
        }
    }
}

impl FigureConfig {
    /// Check the configuration is internally consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.wave_servo.validate()?;
        self.lid_servo.validate()?;

        let wave = &self.wave;
        if wave.step == 0
            || wave.start_angle >= wave.mid_angle
            || wave.mid_angle >= wave.end_angle
            || wave.end_angle > self.wave_servo.actuation_range
        {
            return Err(ConfigError::InvalidRange);
        }

        let lid = &self.lid;
        if lid.open_angle > self.lid_servo.actuation_range
            || lid.rest_angle > self.lid_servo.actuation_range
        {
            return Err(ConfigError::InvalidRange);
        }

        Ok(())
    }
}
