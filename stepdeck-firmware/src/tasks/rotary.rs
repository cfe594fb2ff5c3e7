//! Rotary encoder tasks
//!
//! One decoder task per encoder records detents into the shared
//! accumulators; the router task drains them into the displays.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use stepdeck_core::state::RotaryChannel;
use stepdeck_drivers::{QuadratureDecoder, StepMode};

use crate::channels::{SharedConsole, ROTARY_DELTAS, ROTARY_MOVED};

/// Encoder decoder task
#[embassy_executor::task(pool_size = 4)]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>, channel: RotaryChannel) {
    info!("Encoder {} task started", channel);

    let mut decoder = QuadratureDecoder::new(StepMode::Half, a.is_high(), b.is_high());

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        let detent = decoder.update(a.is_high(), b.is_high());
        if detent != 0 {
            ROTARY_DELTAS.record(channel, detent as i32);
            ROTARY_MOVED.signal(());
        }
    }
}

/// Rotary router task - applies accumulated deltas to the displays
#[embassy_executor::task]
pub async fn rotary_router_task(console: &'static SharedConsole) {
    info!("Rotary router task started");

    loop {
        ROTARY_MOVED.wait().await;

        let mut console = console.lock().await;
        let drained = console.route_rotary(&ROTARY_DELTAS);

        for channel in RotaryChannel::ALL {
            let delta = drained[channel.index()];
            if delta != 0 {
                let value = console.panel().displays[channel.index()].value;
                debug!("Encoder {}: {} -> {}", channel, delta, value.text().as_str());
            }
        }
    }
}
