//! Clip playback trait

/// Errors that can occur when opening or playing a clip
///
/// All of these abort the current action only; the control loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// No clip with that name, or catalog index out of range
    ClipNotFound,
    /// Clip data is not a playable WAV file
    InvalidClip,
    /// Output is still busy with another clip
    Busy,
}

/// Trait for the speaker output
///
/// Playback is started and then polled; the caller decides how long to
/// wait. Implementations must tolerate [`Speaker::stop`] being called when
/// nothing is playing.
pub trait Speaker {
    /// Handle to an opened clip
    type Clip;

    /// Open a clip by file name
    fn open(&mut self, name: &str) -> Result<Self::Clip, AudioError>;

    /// Start playing an opened clip
    fn start(&mut self, clip: Self::Clip) -> Result<(), AudioError>;

    /// Check whether the started clip is still playing
    fn is_playing(&mut self) -> bool;

    /// Stop playback and release the output
    fn stop(&mut self);
}
