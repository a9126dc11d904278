//! Servo motion sequencing
//!
//! Ramps step the wave servo through half-open angle ranges with a fixed
//! delay after each command, and the lid opens one degree at a time.

pub mod ramp;
pub mod sequencer;

pub use ramp::Ramp;
pub use sequencer::MotionSequencer;
