//! Charge-time capacitive touch pad
//!
//! A finger on the pad adds capacitance, which makes the pad take longer
//! to charge or discharge. The pad is calibrated once at construction: the
//! untouched reading plus [`CALIBRATION_MARGIN`] becomes the threshold.

use buddy_core::traits::{TouchError, TouchPad};

/// Amount added to the baseline reading at calibration
pub const CALIBRATION_MARGIN: u16 = 100;

/// Raw charge-time measurement of one pad
pub trait ChargeSensor {
    /// Measure once; larger values mean more capacitance
    fn charge_time(&mut self) -> Result<u16, TouchError>;
}

/// Touch pad with a movable threshold over a charge-time sensor
pub struct CapacitivePad<S> {
    sensor: S,
    threshold: u16,
    last_raw: u16,
}

impl<S: ChargeSensor> CapacitivePad<S> {
    /// Calibrate against the current (untouched) reading
    pub fn new(mut sensor: S) -> Result<Self, TouchError> {
        let baseline = sensor.charge_time()?;
        Ok(Self {
            sensor,
            threshold: baseline.saturating_add(CALIBRATION_MARGIN),
            last_raw: baseline,
        })
    }

    /// Most recent raw reading
    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }
}

impl<S: ChargeSensor> TouchPad for CapacitivePad<S> {
    fn is_touched(&mut self) -> Result<bool, TouchError> {
        self.last_raw = self.sensor.charge_time()?;
        Ok(self.last_raw > self.threshold)
    }

    fn threshold(&self) -> u16 {
        self.threshold
    }

    fn set_threshold(&mut self, threshold: u16) {
        self.threshold = threshold;
    }
}
