//! Wave and lid servo sequences
//!
//! Each sequence awaits its step delays, so the control loop is busy for
//! the full duration of the motion. A servo error ends the sequence
//! immediately.

use embedded_hal_async::delay::DelayNs;

use super::Ramp;
use crate::config::{LidProfile, WaveProfile};
use crate::traits::{Servo, ServoError};

/// Owns both servos and steps them through the configured profiles
pub struct MotionSequencer<V> {
    wave: V,
    lid: V,
    wave_profile: WaveProfile,
    lid_profile: LidProfile,
}

impl<V: Servo> MotionSequencer<V> {
    pub fn new(wave: V, lid: V, wave_profile: WaveProfile, lid_profile: LidProfile) -> Self {
        Self {
            wave,
            lid,
            wave_profile,
            lid_profile,
        }
    }

    /// Move both servos to their rest angles
    pub fn home(&mut self) -> Result<(), ServoError> {
        self.wave.set_angle(self.wave_profile.start_angle)?;
        self.lid.set_angle(self.lid_profile.rest_angle)
    }

    /// Raise the wave servo from the start angle to just below mid
    pub async fn ramp_up<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), ServoError> {
        let p = self.wave_profile;
        self.step_wave(Ramp::up(p.start_angle, p.mid_angle, p.step), delay)
            .await
    }

    /// One full sweep: mid up to just below end, then end down to just above mid
    pub async fn oscillate<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), ServoError> {
        let p = self.wave_profile;
        self.step_wave(Ramp::up(p.mid_angle, p.end_angle, p.step), delay)
            .await?;
        self.step_wave(
            Ramp::down(p.end_angle, p.mid_angle as i16 - 1, p.step),
            delay,
        )
        .await
    }

    /// Lower the wave servo from just below mid and settle at the start angle
    pub async fn ramp_down<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), ServoError> {
        let p = self.wave_profile;
        self.step_wave(
            Ramp::down(p.mid_angle.saturating_sub(1), p.start_angle as i16, p.step),
            delay,
        )
        .await?;
        self.wave.set_angle(p.start_angle)
    }

    /// Open the lid one degree at a time from 0 to the open angle
    pub async fn open_lid<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), ServoError> {
        let p = self.lid_profile;
        for (index, angle) in (0..=p.open_angle).enumerate() {
            self.lid.set_angle(angle)?;
            if index > p.slow_after as usize {
                delay.delay_ms(p.step_delay_ms).await;
            }
        }
        Ok(())
    }

    async fn step_wave<D: DelayNs>(&mut self, ramp: Ramp, delay: &mut D) -> Result<(), ServoError> {
        for angle in ramp {
            self.wave.set_angle(angle)?;
            delay.delay_ms(self.wave_profile.step_delay_ms).await;
        }
        Ok(())
    }
}
