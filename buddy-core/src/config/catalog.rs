//! Sound catalog
//!
//! Ordered list of clip file names. The index is the only key the rest of
//! the firmware uses, so the order here is part of the behaviour.

use heapless::{String, Vec};

use super::ConfigError;

/// Maximum number of clips in the catalog
pub const MAX_CLIPS: usize = 16;

/// Maximum clip file name length in bytes
pub const MAX_CLIP_NAME_LEN: usize = 40;

/// Minimum number of clips
///
/// Fixed actions reference indices up to 5, and pad 3 picks from
/// `[3, len - 1]`.
pub const MIN_CLIPS: usize = 6;

/// Clips shipped with the figure, in catalog order
pub const DEFAULT_CLIPS: [&str; 11] = [
    "my-names-buddy.wav",
    "christmas-cheer-sing-loud.wav",
    "santas-coming-so-much-to-do.wav",
    "its-great-to-meet-you.wav",
    "i-just-like-to-smile.wav",
    "you-sit-on-a-throne-of-lies.wav",
    "you-did-it.wav",
    "whats-a-christmas-gram.wav",
    "i-love-you.wav",
    "santa-i-know-him.wav",
    "santa-must-have-called-you.wav",
];

/// Ordered, fixed-capacity list of clip file names
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoundCatalog {
    clips: Vec<String<MAX_CLIP_NAME_LEN>, MAX_CLIPS>,
}

impl SoundCatalog {
    /// Create an empty catalog
    pub const fn new() -> Self {
        Self { clips: Vec::new() }
    }

    /// Build a catalog from a list of names
    ///
    /// Does not enforce [`MIN_CLIPS`]; see [`SoundCatalog::validate`].
    pub fn from_names(names: &[&str]) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for name in names {
            catalog.push(name)?;
        }
        Ok(catalog)
    }

    /// Append a clip name
    pub fn push(&mut self, name: &str) -> Result<(), ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::InvalidClipName);
        }
        let name = String::try_from(name).map_err(|_| ConfigError::InvalidClipName)?;
        self.clips.push(name).map_err(|_| ConfigError::TooManyClips)
    }

    /// Remove all clips
    pub fn clear(&mut self) {
        self.clips.clear();
    }

    /// Clip name at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.clips.get(index).map(|s| s.as_str())
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Returns true if the catalog has no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Check the catalog is long enough for the fixed action table
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clips.len() < MIN_CLIPS {
            return Err(ConfigError::CatalogTooShort);
        }
        Ok(())
    }
}

impl Default for SoundCatalog {
    fn default() -> Self {
        let mut catalog = Self::new();
        for name in DEFAULT_CLIPS {
            // Every default name fits MAX_CLIP_NAME_LEN and the list fits MAX_CLIPS
            let _ = catalog.push(name);
        }
        catalog
    }
}
