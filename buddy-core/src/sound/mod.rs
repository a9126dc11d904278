//! Clip playback with synchronised wave motion

pub mod player;

pub use player::{PlayError, Playback, Played, SoundPlayer};
