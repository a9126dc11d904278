//! Capacitive touch pad trait

/// Errors that can occur when reading a touch pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Charge measurement never completed (pad shorted or pull-down missing)
    Timeout,
}

/// Trait for a single capacitive touch pad
pub trait TouchPad {
    /// Read the pad once and report whether it is touched
    ///
    /// Takes `&mut self` because a reading drives the pin.
    fn is_touched(&mut self) -> Result<bool, TouchError>;

    /// Current sensitivity threshold (raw reading above it counts as a touch)
    fn threshold(&self) -> u16;

    /// Replace the sensitivity threshold
    fn set_threshold(&mut self, threshold: u16);
}
