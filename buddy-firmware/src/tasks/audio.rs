//! Audio streaming task

use defmt::*;
use embassy_rp::pwm::PwmOutput;

/// Stream clips requested by the figure's speaker handle
#[embassy_executor::task]
pub async fn audio_task(output: PwmOutput<'static>) {
    info!("Audio task started");
    buddy_hal_rp2040::audio::run(output).await;
}
