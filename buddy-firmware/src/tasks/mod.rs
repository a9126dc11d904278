//! Embassy async tasks
//!
//! The figure task owns the control loop; the audio task owns the speaker
//! PWM and streams whatever the figure asks it to play.

pub mod audio;
pub mod figure;

pub use audio::audio_task;
pub use figure::{figure_task, BuddyFigure, BuddyHardware, BuddyPad};
