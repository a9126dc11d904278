//! Built-in clip table
//!
//! The firmware build script embeds every catalog clip into the image and
//! generates a static `[ClipEntry]`. A clip whose file was missing at build
//! time is kept as an empty entry so it still fails to open by name.

use buddy_core::traits::AudioError;

use super::wav::WavClip;

/// One embedded clip file
#[derive(Debug, Clone, Copy)]
pub struct ClipEntry<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
}

/// Lookup over embedded clips
#[derive(Debug, Clone, Copy)]
pub struct ClipTable<'a> {
    entries: &'a [ClipEntry<'a>],
}

impl<'a> ClipTable<'a> {
    pub const fn new(entries: &'a [ClipEntry<'a>]) -> Self {
        Self { entries }
    }

    /// Raw file bytes by name
    pub fn find(&self, name: &str) -> Result<&'a [u8], AudioError> {
        self.entries
            .iter()
            .find(|e| e.name == name && !e.data.is_empty())
            .map(|e| e.data)
            .ok_or(AudioError::ClipNotFound)
    }

    /// Find and parse a clip by name
    pub fn open(&self, name: &str) -> Result<WavClip<'a>, AudioError> {
        WavClip::parse(self.find(name)?).map_err(|_| AudioError::InvalidClip)
    }

    /// Number of entries, including empty ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
