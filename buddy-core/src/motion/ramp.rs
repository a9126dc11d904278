//! Stepped angle ranges

/// Half-open range of angles with a signed step
///
/// Yields `start`, `start + step`, ... while the value has not reached
/// `stop`. A step of zero yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    next: i16,
    stop: i16,
    step: i16,
}

impl Ramp {
    /// Create a ramp from `start` toward `stop` (exclusive)
    pub const fn new(start: i16, stop: i16, step: i16) -> Self {
        Self {
            next: start,
            stop,
            step,
        }
    }

    /// Ramp upward from `start` toward `stop`
    pub const fn up(start: u8, stop: u8, step: u8) -> Self {
        Self::new(start as i16, stop as i16, step as i16)
    }

    /// Ramp downward from `start` toward `stop`
    ///
    /// `stop` may be one below zero so the ramp includes angle 0.
    pub const fn down(start: u8, stop: i16, step: u8) -> Self {
        Self::new(start as i16, stop, -(step as i16))
    }
}

impl Iterator for Ramp {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let done = match self.step {
            0 => true,
            s if s > 0 => self.next >= self.stop,
            _ => self.next <= self.stop,
        };
        if done {
            return None;
        }

        let value = self.next;
        self.next = self.next.saturating_add(self.step);
        u8::try_from(value).ok()
    }
}
