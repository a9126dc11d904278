//! Touch sensing drivers

pub mod capacitive;

pub use capacitive::{CapacitivePad, ChargeSensor, CALIBRATION_MARGIN};
