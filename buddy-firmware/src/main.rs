//! Buddy - Animatronic Figure Firmware
//!
//! Main firmware binary for the RP2040 board inside the figure.
//! Five touch pads and a Bluefruit Connect remote trigger sound clips,
//! a waving arm and a lid; figure.toml configures all of it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use buddy_core::config::FigureConfig;
use buddy_core::traits::TouchPad;
use buddy_core::Figure;
use buddy_drivers::audio::ClipTable;
use buddy_drivers::link::UartLink;
use buddy_drivers::servo::PulseServo;
use buddy_drivers::touch::CapacitivePad;
use buddy_hal_rp2040::audio::PwmSpeaker;
use buddy_hal_rp2040::pwm::{audio_config, servo_config};
use buddy_hal_rp2040::touch::FlexChargeSensor;

use crate::tasks::{BuddyFigure, BuddyHardware, BuddyPad};

mod clips;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Buddy firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // Servos: wave arm on GPIO16 (slice 0 A), lid on GPIO18 (slice 1 A)
    let wave_pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, servo_config());
    let (wave_out, _) = wave_pwm.split();
    let wave_servo = PulseServo::new(unwrap!(wave_out), config.wave_servo);

    let lid_pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, servo_config());
    let (lid_out, _) = lid_pwm.split();
    let lid_servo = PulseServo::new(unwrap!(lid_out), config.lid_servo);

    info!("Servos initialized");

    // Touch pads on GPIO2-6, calibrated against the untouched baseline
    let pads = [
        calibrate(0, FlexChargeSensor::new(p.PIN_2)),
        calibrate(1, FlexChargeSensor::new(p.PIN_3)),
        calibrate(2, FlexChargeSensor::new(p.PIN_4)),
        calibrate(3, FlexChargeSensor::new(p.PIN_5)),
        calibrate(4, FlexChargeSensor::new(p.PIN_6)),
    ];

    info!("Touch pads calibrated");

    // Audio: PWM carrier on GPIO20 (slice 2 A), amplifier enable on GPIO21
    let audio_pwm = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_20, audio_config());
    let (audio_out, _) = audio_pwm.split();
    let speaker = PwmSpeaker::new(
        ClipTable::new(clips::CLIPS),
        Output::new(p.PIN_21, Level::Low),
    );

    info!("Audio initialized: {} clips embedded", clips::CLIPS.len());

    // Setup UART for the BLE bridge (TX GPIO0, RX GPIO1)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    // Bridge reports the connection on GPIO14, advertises while GPIO15 is high
    let link = UartLink::new(
        rx,
        Input::new(p.PIN_14, Pull::Down),
        Output::new(p.PIN_15, Level::Low),
    );

    info!("UART initialized for BLE bridge");

    let hardware = BuddyHardware {
        wave_servo,
        lid_servo,
        speaker,
        pads,
        link,
        rng: RoscRng,
        delay: Delay,
    };
    let figure = build_figure(config, hardware);

    // Spawn tasks
    spawner.spawn(tasks::audio_task(unwrap!(audio_out))).unwrap();
    spawner.spawn(tasks::figure_task(figure)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Calibrate one pad, halting if its sensor never settles
fn calibrate(index: u8, sensor: FlexChargeSensor<'static>) -> BuddyPad {
    match CapacitivePad::new(sensor) {
        Ok(pad) => {
            debug!(
                "Pad {}: baseline {}, threshold {}",
                index,
                pad.last_raw(),
                pad.threshold()
            );
            pad
        }
        Err(e) => {
            error!("Pad {} calibration failed: {:?}", index, e);
            defmt::panic!("touch pad calibration failed");
        }
    }
}

/// Assemble the figure, retrying on the defaults if the config is rejected
fn build_figure(config: FigureConfig, hardware: BuddyHardware) -> BuddyFigure {
    // Figure::new consumes the hardware, so validate before handing it over
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            error!("Configuration rejected: {:?}", e);
            warn!("Using built-in default configuration");
            FigureConfig::default()
        }
    };

    match Figure::new(config, hardware) {
        Ok(figure) => figure,
        Err(e) => {
            error!("Default configuration rejected: {:?}", e);
            defmt::panic!("no usable configuration");
        }
    }
}
