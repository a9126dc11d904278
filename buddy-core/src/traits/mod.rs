//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod link;
pub mod servo;
pub mod speaker;
pub mod touch;

pub use link::{BleLink, LinkError};
pub use servo::{Servo, ServoError};
pub use speaker::{AudioError, Speaker};
pub use touch::{TouchError, TouchPad};
