//! Actions and the fixed trigger tables

use buddy_protocol::Button;
use rand_core::RngCore;

/// How a play action picks its clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClipChoice {
    /// Always this catalog index
    Fixed(u8),
    /// Uniformly random index in `[from, len - 1]`
    RandomFrom(u8),
}

impl ClipChoice {
    /// Resolve to a catalog index for a catalog of `len` clips
    ///
    /// Returns `None` if the index or the random range falls outside the
    /// catalog.
    pub fn resolve<R: RngCore>(self, len: usize, rng: &mut R) -> Option<usize> {
        match self {
            ClipChoice::Fixed(index) => {
                let index = index as usize;
                (index < len).then_some(index)
            }
            ClipChoice::RandomFrom(from) => {
                let from = from as usize;
                let span = len.checked_sub(from).filter(|&s| s > 0)?;
                Some(from + uniform(span as u32, rng) as usize)
            }
        }
    }
}

/// Uniform value in `[0, span)` by rejection sampling
fn uniform<R: RngCore>(span: u32, rng: &mut R) -> u32 {
    let zone = u32::MAX - (u32::MAX % span);
    loop {
        let value = rng.next_u32();
        if value < zone {
            return value % span;
        }
    }
}

/// Something the figure can do in response to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Play a clip while waving
    Play(ClipChoice),
    /// Run the lid open sequence
    OpenLid,
    /// Raise every pad's touch threshold
    RaiseThresholds,
}

/// Input that produced an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Touch pad by index
    Pad(u8),
    /// Remote control pad button
    Button(Button),
}

/// Action bound to a touch pad
pub fn pad_action(pad: u8) -> Option<Action> {
    match pad {
        0..=2 => Some(Action::Play(ClipChoice::Fixed(pad))),
        3 => Some(Action::Play(ClipChoice::RandomFrom(3))),
        4 => Some(Action::OpenLid),
        _ => None,
    }
}

/// Action bound to a remote button
pub fn button_action(button: Button) -> Action {
    match button {
        Button::Button1 => Action::Play(ClipChoice::Fixed(0)),
        Button::Button2 => Action::Play(ClipChoice::Fixed(1)),
        Button::Button3 => Action::Play(ClipChoice::Fixed(2)),
        Button::Button4 => Action::Play(ClipChoice::RandomFrom(0)),
        Button::Up => Action::OpenLid,
        Button::Down => Action::Play(ClipChoice::Fixed(5)),
        Button::Left => Action::Play(ClipChoice::Fixed(4)),
        Button::Right => Action::RaiseThresholds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedRng, SeqRng};
    use proptest::prelude::*;

    #[test]
    fn test_pad_table() {
        assert_eq!(pad_action(0), Some(Action::Play(ClipChoice::Fixed(0))));
        assert_eq!(pad_action(2), Some(Action::Play(ClipChoice::Fixed(2))));
        assert_eq!(pad_action(3), Some(Action::Play(ClipChoice::RandomFrom(3))));
        assert_eq!(pad_action(4), Some(Action::OpenLid));
        assert_eq!(pad_action(5), None);
    }

    #[test]
    fn test_button_table() {
        assert_eq!(
            button_action(Button::Button3),
            Action::Play(ClipChoice::Fixed(2))
        );
        assert_eq!(
            button_action(Button::Button4),
            Action::Play(ClipChoice::RandomFrom(0))
        );
        assert_eq!(button_action(Button::Up), Action::OpenLid);
        assert_eq!(
            button_action(Button::Down),
            Action::Play(ClipChoice::Fixed(5))
        );
        assert_eq!(
            button_action(Button::Left),
            Action::Play(ClipChoice::Fixed(4))
        );
        assert_eq!(button_action(Button::Right), Action::RaiseThresholds);
    }

    #[test]
    fn test_fixed_out_of_range() {
        let mut rng = FixedRng(0);
        assert_eq!(ClipChoice::Fixed(5).resolve(6, &mut rng), Some(5));
        assert_eq!(ClipChoice::Fixed(6).resolve(6, &mut rng), None);
    }

    #[test]
    fn test_random_empty_range() {
        let mut rng = FixedRng(0);
        assert_eq!(ClipChoice::RandomFrom(3).resolve(3, &mut rng), None);
        assert_eq!(ClipChoice::RandomFrom(3).resolve(2, &mut rng), None);
        assert_eq!(ClipChoice::RandomFrom(0).resolve(0, &mut rng), None);
    }

    #[test]
    fn test_random_uses_rng_value() {
        let mut rng = FixedRng(2);
        assert_eq!(ClipChoice::RandomFrom(0).resolve(11, &mut rng), Some(2));
        assert_eq!(ClipChoice::RandomFrom(3).resolve(11, &mut rng), Some(5));
    }

    #[test]
    fn test_random_rejects_biased_values() {
        // span 6: u32::MAX itself falls in the biased tail
        let mut rng = SeqRng::new(&[u32::MAX, 4]);
        assert_eq!(ClipChoice::RandomFrom(3).resolve(9, &mut rng), Some(7));
    }

    proptest! {
        #[test]
        fn prop_pad3_in_range(len in 4usize..=16, value in any::<u32>()) {
            let mut rng = SeqRng::new(&[value, 0]);
            let index = ClipChoice::RandomFrom(3).resolve(len, &mut rng).unwrap();
            prop_assert!((3..len).contains(&index));
        }

        #[test]
        fn prop_button4_in_range(len in 1usize..=16, value in any::<u32>()) {
            let mut rng = SeqRng::new(&[value, 0]);
            let index = ClipChoice::RandomFrom(0).resolve(len, &mut rng).unwrap();
            prop_assert!(index < len);
        }
    }
}
