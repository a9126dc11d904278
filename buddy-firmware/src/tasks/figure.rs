//! Figure control task
//!
//! Boots the figure, then runs one control cycle per poll interval and
//! logs whatever the cycle did.

use defmt::*;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::PwmOutput;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Delay, Timer};

use buddy_core::figure::{ActionResult, Outcome, Remote};
use buddy_core::state::LinkEvent;
use buddy_core::{Cycle, Figure, Hardware};
use buddy_drivers::link::UartLink;
use buddy_drivers::servo::PulseServo;
use buddy_drivers::touch::CapacitivePad;
use buddy_hal_rp2040::audio::PwmSpeaker;
use buddy_hal_rp2040::touch::FlexChargeSensor;

/// Number of touch pads wired to the board
pub const PAD_COUNT: usize = buddy_core::config::PAD_COUNT;

pub type BuddyServo = PulseServo<PwmOutput<'static>>;
pub type BuddyPad = CapacitivePad<FlexChargeSensor<'static>>;
pub type BuddyLink = UartLink<BufferedUartRx, Input<'static>, Output<'static>>;

/// Hardware handles as wired on the RP2040 board
pub type BuddyHardware =
    Hardware<BuddyServo, PwmSpeaker, BuddyPad, BuddyLink, RoscRng, Delay, PAD_COUNT>;

/// The figure as assembled on the RP2040 board
pub type BuddyFigure =
    Figure<BuddyServo, PwmSpeaker, BuddyPad, BuddyLink, RoscRng, Delay, PAD_COUNT>;

/// Control loop task
///
/// A servo, touch or link fault leaves the hardware in an unknown state,
/// so the task halts the firmware instead of carrying on.
#[embassy_executor::task]
pub async fn figure_task(mut figure: BuddyFigure) {
    info!("Figure task started");

    if let Err(e) = figure.boot() {
        error!("Boot failed: {:?}", e);
        defmt::panic!("figure boot failed");
    }
    info!("Figure homed, advertising");

    let interval = u64::from(figure.poll_interval_ms());

    loop {
        match figure.step().await {
            Ok(cycle) => report(&figure, &cycle),
            Err(e) => {
                error!("Hardware fault: {:?}", e);
                defmt::panic!("figure halted");
            }
        }
        Timer::after_millis(interval).await;
    }
}

fn report(figure: &BuddyFigure, cycle: &Cycle) {
    if cycle.is_idle() {
        return;
    }

    match cycle.link {
        Some(LinkEvent::Connected) => info!("Remote connected, advertising stopped"),
        Some(LinkEvent::Disconnected) => info!("Remote disconnected, advertising"),
        None => {}
    }

    if let Some(outcome) = &cycle.touch {
        report_outcome(figure, outcome);
    }

    match &cycle.remote {
        Some(Remote::Performed(outcome)) => report_outcome(figure, outcome),
        Some(Remote::Ignored) => trace!("Remote packet ignored"),
        Some(Remote::Discarded(e)) => debug!("Remote packet discarded: {:?}", e),
        None => {}
    }
}

fn report_outcome(figure: &BuddyFigure, outcome: &Outcome) {
    match &outcome.result {
        ActionResult::Played(played) => info!(
            "{:?}: played {} ({} sweeps)",
            outcome.trigger,
            figure.catalog().get(played.index).unwrap_or("?"),
            played.sweeps
        ),
        ActionResult::LidOpened => info!("{:?}: lid opened", outcome.trigger),
        ActionResult::ThresholdsRaised(changes) => {
            for change in changes {
                debug!(
                    "pass {} pad {}: {} -> {}",
                    change.pass, change.pad, change.before, change.after
                );
            }
            info!(
                "{:?}: thresholds now {:?}",
                outcome.trigger,
                figure.thresholds()
            );
        }
        ActionResult::Aborted(e) => warn!(
            "{:?}: {:?} aborted: {:?}",
            outcome.trigger, outcome.action, e
        ),
    }
}
