//! Touch dispatcher
//!
//! Scans the pads in index order once per control cycle. The first
//! touched pad wins; pads after it are not read that cycle.

use heapless::Vec;

use super::action::{pad_action, Action};
use crate::traits::{TouchError, TouchPad};

/// Maximum threshold changes recorded per raise
pub const MAX_THRESHOLD_CHANGES: usize = 16;

/// One pad's threshold before and after a single pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdChange {
    pub pass: u8,
    pub pad: u8,
    pub before: u16,
    pub after: u16,
}

/// Threshold changes in the order they were applied
///
/// Changes beyond [`MAX_THRESHOLD_CHANGES`] are applied but not recorded.
pub type ThresholdReport = Vec<ThresholdChange, MAX_THRESHOLD_CHANGES>;

/// Owns the touch pads and maps touches to actions
pub struct TouchDispatcher<P, const N: usize> {
    pads: [P; N],
}

impl<P: TouchPad, const N: usize> TouchDispatcher<P, N> {
    pub fn new(pads: [P; N]) -> Self {
        Self { pads }
    }

    /// Read pads in order and return the first touched pad with its action
    ///
    /// Pads without a bound action are skipped without being read.
    pub fn poll(&mut self) -> Result<Option<(u8, Action)>, TouchError> {
        for (index, pad) in self.pads.iter_mut().enumerate() {
            let Ok(index) = u8::try_from(index) else {
                break;
            };
            let Some(action) = pad_action(index) else {
                continue;
            };
            if pad.is_touched()? {
                return Ok(Some((index, action)));
            }
        }
        Ok(None)
    }

    /// Add `step` to every pad's threshold, `passes` times
    ///
    /// Thresholds saturate at `u16::MAX`.
    pub fn raise_thresholds(&mut self, step: u16, passes: u8) -> ThresholdReport {
        let mut report = ThresholdReport::new();
        for pass in 0..passes {
            for (index, pad) in self.pads.iter_mut().enumerate() {
                let before = pad.threshold();
                let after = before.saturating_add(step);
                pad.set_threshold(after);
                let _ = report.push(ThresholdChange {
                    pass,
                    pad: index as u8,
                    before,
                    after,
                });
            }
        }
        report
    }

    /// Current threshold of every pad
    pub fn thresholds(&self) -> [u16; N] {
        core::array::from_fn(|i| self.pads[i].threshold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ClipChoice;
    use crate::testing::FakePad;

    fn pads() -> [FakePad; 5] {
        core::array::from_fn(|_| FakePad::new(1000))
    }

    #[test]
    fn test_no_touch() {
        let pads = pads();
        let mut dispatcher = TouchDispatcher::new(pads.clone());
        assert_eq!(dispatcher.poll(), Ok(None));
        assert!(pads.iter().all(|p| p.reads() == 1));
    }

    #[test]
    fn test_fixed_pads() {
        for i in 0..3u8 {
            let pads = pads();
            pads[i as usize].touch();
            let mut dispatcher = TouchDispatcher::new(pads);
            assert_eq!(
                dispatcher.poll(),
                Ok(Some((i, Action::Play(ClipChoice::Fixed(i)))))
            );
        }
    }

    #[test]
    fn test_first_match_wins() {
        let pads = pads();
        pads[1].touch();
        pads[4].touch();
        let mut dispatcher = TouchDispatcher::new(pads.clone());

        assert_eq!(
            dispatcher.poll(),
            Ok(Some((1, Action::Play(ClipChoice::Fixed(1)))))
        );
        assert_eq!(pads[0].reads(), 1);
        assert_eq!(pads[1].reads(), 1);
        assert_eq!(pads[2].reads(), 0);
        assert_eq!(pads[4].reads(), 0);
    }

    #[test]
    fn test_lid_pad() {
        let pads = pads();
        pads[4].touch();
        let mut dispatcher = TouchDispatcher::new(pads);
        assert_eq!(dispatcher.poll(), Ok(Some((4, Action::OpenLid))));
    }

    #[test]
    fn test_read_error_propagates() {
        let pads = pads();
        pads[2].fail();
        let mut dispatcher = TouchDispatcher::new(pads);
        assert_eq!(dispatcher.poll(), Err(TouchError::Timeout));
    }

    #[test]
    fn test_raise_thresholds_twice() {
        let pads = pads();
        let mut dispatcher = TouchDispatcher::new(pads);
        let report = dispatcher.raise_thresholds(50, 2);

        assert_eq!(dispatcher.thresholds(), [1100; 5]);
        assert_eq!(report.len(), 10);
        assert_eq!(
            report[0],
            ThresholdChange {
                pass: 0,
                pad: 0,
                before: 1000,
                after: 1050
            }
        );
        assert_eq!(
            report[9],
            ThresholdChange {
                pass: 1,
                pad: 4,
                before: 1050,
                after: 1100
            }
        );
    }

    #[test]
    fn test_raise_makes_touch_insensitive() {
        let pads = pads();
        pads[0].set_raw(1080);
        let mut dispatcher = TouchDispatcher::new(pads);

        assert!(dispatcher.poll().unwrap().is_some());
        dispatcher.raise_thresholds(50, 2);
        assert_eq!(dispatcher.poll(), Ok(None));
    }

    #[test]
    fn test_raise_saturates() {
        let pads = pads();
        pads[3].preset_threshold(u16::MAX - 10);
        let mut dispatcher = TouchDispatcher::new(pads);
        dispatcher.raise_thresholds(50, 2);
        assert_eq!(dispatcher.thresholds()[3], u16::MAX);
    }
}
