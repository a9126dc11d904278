//! Configuration types
//!
//! Board-agnostic configuration for the figure, parsed from the
//! `figure.toml` embedded in the firmware image.

pub mod catalog;
pub mod toml;
pub mod types;

pub use catalog::*;
pub use toml::parse_config;
pub use types::*;

/// Configuration errors
///
/// The firmware falls back to [`FigureConfig::default`] on any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or does not fit its field
    InvalidValue,
    /// Array opened with `[` but never closed
    UnterminatedArray,
    /// More clips than the catalog can hold
    TooManyClips,
    /// Clip name empty or longer than [`MAX_CLIP_NAME_LEN`]
    InvalidClipName,
    /// Fewer clips than the fixed actions reference
    CatalogTooShort,
    /// Angles, steps or pulse widths are inconsistent
    InvalidRange,
}
