//! Main control loop
//!
//! [`Figure`] owns every hardware handle and runs one control cycle per
//! [`Figure::step`]:
//!
//! ```text
//! Advertising:  connected? ── yes ──► stop advertising, → Connected
//!                   │ no
//!                   ▼
//!               service touch
//!
//! Connected:    connected? ── no ───► start advertising, → Advertising
//!                   │ yes
//!                   ▼
//!               service touch, then decode one packet
//! ```
//!
//! Actions run to completion inside the step, so a playback or lid
//! sequence delays input servicing until it finishes.

use buddy_protocol::DecodeError;
use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::config::{ConfigError, FigureConfig, SoundCatalog, TouchConfig};
use crate::dispatch::{remote_action, Action, ThresholdReport, TouchDispatcher, Trigger};
use crate::motion::MotionSequencer;
use crate::sound::{PlayError, Played, SoundPlayer};
use crate::state::{LinkEvent, LinkState};
use crate::traits::{
    AudioError, BleLink, LinkError, Servo, ServoError, Speaker, TouchError, TouchPad,
};

/// Hardware faults that stop the figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FigureError {
    Servo(ServoError),
    Touch(TouchError),
    Link(LinkError),
}

impl From<ServoError> for FigureError {
    fn from(e: ServoError) -> Self {
        FigureError::Servo(e)
    }
}

impl From<TouchError> for FigureError {
    fn from(e: TouchError) -> Self {
        FigureError::Touch(e)
    }
}

impl From<LinkError> for FigureError {
    fn from(e: LinkError) -> Self {
        FigureError::Link(e)
    }
}

/// What an action did
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionResult {
    /// Clip played to the end
    Played(Played),
    /// Lid open sequence finished
    LidOpened,
    /// Every pad threshold was raised
    ThresholdsRaised(ThresholdReport),
    /// Clip could not be played; nothing moved
    Aborted(AudioError),
}

/// An action together with the input that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    pub trigger: Trigger,
    pub action: Action,
    pub result: ActionResult,
}

/// What happened with the remote link during a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Remote {
    /// A button press was acted on
    Performed(Outcome),
    /// A valid packet that maps to no action
    Ignored,
    /// A malformed packet was dropped
    Discarded(DecodeError),
}

/// Report of one control cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    pub link: Option<LinkEvent>,
    pub touch: Option<Outcome>,
    pub remote: Option<Remote>,
}

impl Cycle {
    /// Returns true if nothing happened this cycle
    pub fn is_idle(&self) -> bool {
        self.link.is_none() && self.touch.is_none() && self.remote.is_none()
    }
}

/// Hardware handles passed to [`Figure::new`]
pub struct Hardware<V, S, P, L, R, D, const N: usize> {
    pub wave_servo: V,
    pub lid_servo: V,
    pub speaker: S,
    pub pads: [P; N],
    pub link: L,
    pub rng: R,
    pub delay: D,
}

/// The animatronic figure
pub struct Figure<V, S, P, L, R, D, const N: usize> {
    motion: MotionSequencer<V>,
    player: SoundPlayer<S>,
    touch: TouchDispatcher<P, N>,
    link: L,
    rng: R,
    delay: D,
    state: LinkState,
    touch_config: TouchConfig,
    poll_interval_ms: u32,
}

impl<V, S, P, L, R, D, const N: usize> Figure<V, S, P, L, R, D, N>
where
    V: Servo,
    S: Speaker,
    P: TouchPad,
    L: BleLink,
    R: RngCore,
    D: DelayNs,
{
    /// Assemble the figure from a validated configuration
    pub fn new(
        config: FigureConfig,
        hw: Hardware<V, S, P, L, R, D, N>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            motion: MotionSequencer::new(hw.wave_servo, hw.lid_servo, config.wave, config.lid),
            player: SoundPlayer::new(hw.speaker, config.catalog),
            touch: TouchDispatcher::new(hw.pads),
            link: hw.link,
            rng: hw.rng,
            delay: hw.delay,
            state: LinkState::Advertising,
            touch_config: config.touch,
            poll_interval_ms: config.poll_interval_ms,
        })
    }

    /// Home both servos and start advertising
    pub fn boot(&mut self) -> Result<(), FigureError> {
        self.motion.home()?;
        self.link.start_advertising()?;
        self.state = LinkState::Advertising;
        Ok(())
    }

    /// Run one control cycle
    pub async fn step(&mut self) -> Result<Cycle, FigureError> {
        let mut cycle = Cycle::default();

        let connected = self.link.is_connected();
        if let Some(event) = LinkEvent::observe(self.state, connected) {
            match event {
                LinkEvent::Connected => self.link.stop_advertising()?,
                LinkEvent::Disconnected => self.link.start_advertising()?,
            }
            self.state = self.state.transition(event);
            cycle.link = Some(event);
            return Ok(cycle);
        }

        cycle.touch = self.service_touch().await?;
        if self.state.is_connected() {
            cycle.remote = self.service_remote().await?;
        }
        Ok(cycle)
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Delay the caller should wait between cycles
    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }

    /// Clip catalog in use
    pub fn catalog(&self) -> &SoundCatalog {
        self.player.catalog()
    }

    /// Current touch thresholds
    pub fn thresholds(&self) -> [u16; N] {
        self.touch.thresholds()
    }

    async fn service_touch(&mut self) -> Result<Option<Outcome>, FigureError> {
        let Some((pad, action)) = self.touch.poll()? else {
            return Ok(None);
        };
        self.perform(Trigger::Pad(pad), action).await.map(Some)
    }

    async fn service_remote(&mut self) -> Result<Option<Remote>, FigureError> {
        let packet = match self.link.poll_packet() {
            Ok(Some(packet)) => packet,
            Ok(None) => return Ok(None),
            Err(e) => return Ok(Some(Remote::Discarded(e))),
        };

        let Some((trigger, action)) = remote_action(&packet) else {
            return Ok(Some(Remote::Ignored));
        };
        let outcome = self.perform(trigger, action).await?;
        Ok(Some(Remote::Performed(outcome)))
    }

    async fn perform(&mut self, trigger: Trigger, action: Action) -> Result<Outcome, FigureError> {
        let result = match action {
            Action::Play(choice) => {
                let len = self.player.catalog().len();
                match choice.resolve(len, &mut self.rng) {
                    Some(index) => {
                        match self.player.play(index, &mut self.motion, &mut self.delay).await {
                            Ok(played) => ActionResult::Played(played),
                            Err(PlayError::Audio(e)) => ActionResult::Aborted(e),
                            Err(PlayError::Servo(e)) => return Err(e.into()),
                        }
                    }
                    None => ActionResult::Aborted(AudioError::ClipNotFound),
                }
            }
            Action::OpenLid => {
                self.motion.open_lid(&mut self.delay).await?;
                ActionResult::LidOpened
            }
            Action::RaiseThresholds => ActionResult::ThresholdsRaised(self.touch.raise_thresholds(
                self.touch_config.threshold_step,
                self.touch_config.threshold_passes,
            )),
        };

        Ok(Outcome {
            trigger,
            action,
            result,
        })
    }
}
