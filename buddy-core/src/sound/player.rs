//! Sound player
//!
//! Playing a clip always follows the same shape: start the clip, ramp the
//! wave servo up, sweep while the speaker reports playing, ramp down.

use embedded_hal_async::delay::DelayNs;

use crate::config::SoundCatalog;
use crate::motion::MotionSequencer;
use crate::traits::{AudioError, Servo, ServoError, Speaker};

/// Result of a completed playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Played {
    /// Catalog index that was played
    pub index: usize,
    /// Full wave sweeps performed while the clip played
    pub sweeps: u32,
}

/// Errors that can end a playback early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayError {
    /// Clip could not be opened or started
    Audio(AudioError),
    /// Wave servo fault during the motion
    Servo(ServoError),
}

impl From<AudioError> for PlayError {
    fn from(e: AudioError) -> Self {
        PlayError::Audio(e)
    }
}

impl From<ServoError> for PlayError {
    fn from(e: ServoError) -> Self {
        PlayError::Servo(e)
    }
}

/// Active playback on a speaker
///
/// The output is stopped when the guard is dropped, including when opening
/// or starting the clip fails.
pub struct Playback<'a, S: Speaker> {
    speaker: &'a mut S,
}

impl<'a, S: Speaker> Playback<'a, S> {
    /// Open a clip by name and start it
    pub fn begin(speaker: &'a mut S, name: &str) -> Result<Self, AudioError> {
        let mut playback = Self { speaker };
        let clip = playback.speaker.open(name)?;
        playback.speaker.start(clip)?;
        Ok(playback)
    }

    /// Check whether the clip is still playing
    pub fn is_playing(&mut self) -> bool {
        self.speaker.is_playing()
    }
}

impl<S: Speaker> Drop for Playback<'_, S> {
    fn drop(&mut self) {
        self.speaker.stop();
    }
}

/// Plays catalog clips on a speaker while driving the wave servo
pub struct SoundPlayer<S> {
    speaker: S,
    catalog: SoundCatalog,
}

impl<S: Speaker> SoundPlayer<S> {
    pub fn new(speaker: S, catalog: SoundCatalog) -> Self {
        Self { speaker, catalog }
    }

    /// Clip catalog
    pub fn catalog(&self) -> &SoundCatalog {
        &self.catalog
    }

    /// Play the clip at `index` and wave until it finishes
    ///
    /// Returns once the wave servo has settled at its start angle.
    pub async fn play<V: Servo, D: DelayNs>(
        &mut self,
        index: usize,
        motion: &mut MotionSequencer<V>,
        delay: &mut D,
    ) -> Result<Played, PlayError> {
        let name = self.catalog.get(index).ok_or(AudioError::ClipNotFound)?;
        let mut playback = Playback::begin(&mut self.speaker, name)?;

        motion.ramp_up(delay).await?;
        let mut sweeps = 0;
        while playback.is_playing() {
            motion.oscillate(delay).await?;
            sweeps += 1;
        }
        motion.ramp_down(delay).await?;

        drop(playback);
        Ok(Played { index, sweeps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LidProfile, WaveProfile};
    use crate::testing::{wave_trace, FakeDelay, FakeServo, FakeSpeaker};
    use embassy_futures::block_on;
    use std::vec::Vec;

    fn catalog() -> SoundCatalog {
        SoundCatalog::from_names(&["a.wav", "b.wav", "c.wav", "d.wav", "e.wav", "f.wav"]).unwrap()
    }

    fn motion(wave: &FakeServo) -> MotionSequencer<FakeServo> {
        MotionSequencer::new(
            wave.clone(),
            FakeServo::new(),
            WaveProfile::default(),
            LidProfile::default(),
        )
    }

    #[test]
    fn test_play_counts_sweeps() {
        let speaker = FakeSpeaker::new();
        speaker.play_for(3);
        let wave = FakeServo::new();
        let mut player = SoundPlayer::new(speaker.clone(), catalog());
        let mut delay = FakeDelay::new();

        let played = block_on(player.play(2, &mut motion(&wave), &mut delay)).unwrap();

        assert_eq!(played, Played { index: 2, sweeps: 3 });
        assert_eq!(speaker.started(), vec!["c.wav"]);
        assert_eq!(wave.angles(), wave_trace(3));
        assert!(!speaker.is_active());
    }

    #[test]
    fn test_two_sweep_trace() {
        let speaker = FakeSpeaker::new();
        speaker.play_for(2);
        let wave = FakeServo::new();
        let mut player = SoundPlayer::new(speaker.clone(), catalog());
        let mut delay = FakeDelay::new();

        block_on(player.play(2, &mut motion(&wave), &mut delay)).unwrap();

        let angles = wave.angles();
        let (up, rest) = angles.split_at(17);
        assert_eq!(up, (0..=48).step_by(3).collect::<Vec<u8>>().as_slice());
        let (sweeps, down) = rest.split_at(2 * 58);
        for sweep in sweeps.chunks(58) {
            assert_eq!(sweep.first(), Some(&50));
            assert_eq!(sweep[28], 134);
            assert_eq!(sweep[29], 135);
            assert_eq!(sweep.last(), Some(&51));
        }
        assert_eq!(down.first(), Some(&49));
        assert_eq!(&down[down.len() - 2..], &[1, 0]);
        assert_eq!(angles, wave_trace(2));
        assert_eq!(delay.total_ms(), 20 * (angles.len() as u64 - 1));
    }

    #[test]
    fn test_short_clip_still_ramps() {
        let speaker = FakeSpeaker::new();
        let wave = FakeServo::new();
        let mut player = SoundPlayer::new(speaker.clone(), catalog());
        let mut delay = FakeDelay::new();

        let played = block_on(player.play(0, &mut motion(&wave), &mut delay)).unwrap();

        assert_eq!(played.sweeps, 0);
        assert_eq!(wave.angles().first(), Some(&0));
        assert_eq!(wave.angles().last(), Some(&0));
    }

    #[test]
    fn test_missing_clip_aborts_without_motion() {
        let speaker = FakeSpeaker::new();
        speaker.remove("b.wav");
        let wave = FakeServo::new();
        let mut player = SoundPlayer::new(speaker.clone(), catalog());
        let mut delay = FakeDelay::new();

        let result = block_on(player.play(1, &mut motion(&wave), &mut delay));

        assert_eq!(result, Err(PlayError::Audio(AudioError::ClipNotFound)));
        assert!(wave.angles().is_empty());
        assert_eq!(speaker.stops(), 1);
    }

    #[test]
    fn test_index_out_of_range() {
        let speaker = FakeSpeaker::new();
        let mut player = SoundPlayer::new(speaker.clone(), catalog());
        let mut delay = FakeDelay::new();

        let result = block_on(player.play(6, &mut motion(&FakeServo::new()), &mut delay));
        assert_eq!(result, Err(PlayError::Audio(AudioError::ClipNotFound)));
        assert!(speaker.opened().is_empty());
    }

    #[test]
    fn test_failed_start_releases_output() {
        let speaker = FakeSpeaker::new();
        speaker.fail_start();
        let mut player = SoundPlayer::new(speaker.clone(), catalog());
        let mut delay = FakeDelay::new();

        let result = block_on(player.play(0, &mut motion(&FakeServo::new()), &mut delay));

        assert_eq!(result, Err(PlayError::Audio(AudioError::Busy)));
        assert_eq!(speaker.stops(), 1);
        assert!(!speaker.is_active());
    }

    #[test]
    fn test_servo_fault_releases_output() {
        let speaker = FakeSpeaker::new();
        speaker.play_for(5);
        let wave = FakeServo::new();
        wave.fail_after(20);
        let mut player = SoundPlayer::new(speaker.clone(), catalog());
        let mut delay = FakeDelay::new();

        let result = block_on(player.play(0, &mut motion(&wave), &mut delay));

        assert_eq!(result, Err(PlayError::Servo(ServoError::Pwm)));
        assert!(!speaker.is_active());
        assert_eq!(speaker.stops(), 1);
    }

    #[test]
    fn test_guard_stops_on_drop() {
        let mut speaker = FakeSpeaker::new();
        {
            let _playback = Playback::begin(&mut speaker, "a.wav").unwrap();
        }
        assert_eq!(speaker.stops(), 1);
        assert!(!speaker.is_active());
    }
}
