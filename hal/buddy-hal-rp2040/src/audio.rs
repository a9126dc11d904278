//! PWM audio engine
//!
//! The control task holds a [`PwmSpeaker`]; the audio task runs [`run`] and
//! owns the PWM output. They share a play request signal and two flags:
//!
//! ```text
//! PwmSpeaker::start ──► PLAY_REQUEST ──► run() streams samples
//! PwmSpeaker::stop  ──► STOP ──────────► run() stops between samples
//! PwmSpeaker::is_playing ◄── PLAYING ◄── run() clears when done
//! ```

use core::sync::atomic::Ordering;

use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use embedded_hal::pwm::SetDutyCycle;
use portable_atomic::AtomicBool;

use buddy_core::traits::{AudioError, Speaker};
use buddy_drivers::audio::{ClipTable, WavClip};

/// Clip the audio task should play next
static PLAY_REQUEST: Signal<CriticalSectionRawMutex, WavClip<'static>> = Signal::new();

/// Set from start until the clip ends or is stopped
static PLAYING: AtomicBool = AtomicBool::new(false);

/// Set by stop, checked between samples
static STOP: AtomicBool = AtomicBool::new(false);

/// Speaker handle for the control task
pub struct PwmSpeaker {
    clips: ClipTable<'static>,
    enable: Output<'static>,
}

impl PwmSpeaker {
    /// Create the handle; `enable` powers the speaker amplifier
    pub fn new(clips: ClipTable<'static>, mut enable: Output<'static>) -> Self {
        enable.set_low();
        Self { clips, enable }
    }
}

impl Speaker for PwmSpeaker {
    type Clip = WavClip<'static>;

    fn open(&mut self, name: &str) -> Result<WavClip<'static>, AudioError> {
        self.clips.open(name)
    }

    fn start(&mut self, clip: WavClip<'static>) -> Result<(), AudioError> {
        if PLAYING.load(Ordering::Acquire) {
            return Err(AudioError::Busy);
        }
        STOP.store(false, Ordering::Release);
        PLAYING.store(true, Ordering::Release);
        self.enable.set_high();
        PLAY_REQUEST.signal(clip);
        Ok(())
    }

    fn is_playing(&mut self) -> bool {
        PLAYING.load(Ordering::Acquire)
    }

    fn stop(&mut self) {
        STOP.store(true, Ordering::Release);
        PLAYING.store(false, Ordering::Release);
        self.enable.set_low();
    }
}

/// Audio streaming loop; never returns
pub async fn run(mut output: PwmOutput<'static>) {
    loop {
        let clip = PLAY_REQUEST.wait().await;
        stream(&mut output, &clip).await;

        // A newer request keeps the flag set for its own playback
        if !PLAY_REQUEST.signaled() {
            PLAYING.store(false, Ordering::Release);
        }
    }
}

async fn stream(output: &mut PwmOutput<'static>, clip: &WavClip<'static>) {
    #[cfg(feature = "defmt")]
    defmt::debug!(
        "Streaming {} frames at {} Hz",
        clip.frames(),
        clip.sample_rate
    );

    let max = output.max_duty_cycle() as u32;
    let mut ticker = Ticker::every(Duration::from_hz(clip.sample_rate as u64));

    for level in clip.samples() {
        if STOP.load(Ordering::Acquire) || PLAY_REQUEST.signaled() {
            break;
        }
        let duty = level as u32 * max / u16::MAX as u32;
        let _ = output.set_duty_cycle(duty as u16);
        ticker.next().await;
    }

    let _ = output.set_duty_cycle((max / 2) as u16);
}
