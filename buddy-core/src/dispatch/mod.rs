//! Input dispatch tables
//!
//! Touch pads and remote buttons map onto the same small set of
//! [`Action`]s through fixed `match` tables.

pub mod action;
pub mod remote;
pub mod touch;

pub use action::{button_action, pad_action, Action, ClipChoice, Trigger};
pub use remote::remote_action;
pub use touch::{ThresholdChange, ThresholdReport, TouchDispatcher, MAX_THRESHOLD_CHANGES};
