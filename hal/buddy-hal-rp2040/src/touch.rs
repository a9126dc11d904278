//! Charge-time touch sensing
//!
//! Each pad is a bare GPIO with an external 1 MΩ pull-down. A measurement
//! drives the pin high, releases it to input, and counts how long the pad
//! takes to discharge through the pull-down. A finger adds capacitance and
//! lengthens the count.

use embassy_rp::gpio::{Flex, Pin, Pull};
use embassy_rp::Peri;

use buddy_core::traits::TouchError;
use buddy_drivers::touch::ChargeSensor;

/// Upper bound on the discharge count before the pad is considered stuck
pub const MAX_CHARGE_COUNT: u16 = 10_000;

/// Cycles to hold the pin high before releasing it
const CHARGE_CYCLES: u32 = 200;

/// Touch pad sensed on a single GPIO
pub struct FlexChargeSensor<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexChargeSensor<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::None);
        pin.set_as_input();
        Self { pin }
    }
}

impl ChargeSensor for FlexChargeSensor<'_> {
    fn charge_time(&mut self) -> Result<u16, TouchError> {
        self.pin.set_high();
        self.pin.set_as_output();
        cortex_m::asm::delay(CHARGE_CYCLES);
        self.pin.set_as_input();

        let mut count: u16 = 0;
        while self.pin.is_high() {
            count += 1;
            if count >= MAX_CHARGE_COUNT {
                return Err(TouchError::Timeout);
            }
        }
        Ok(count)
    }
}
