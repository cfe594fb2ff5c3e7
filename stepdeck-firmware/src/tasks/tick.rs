//! Periodic render and second triggers
//!
//! Both triggers render the panel and hand the frame to the display TX task.
//! The second trigger also advances the countdown of the latched display.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use stepdeck_core::RenderedFrame;

use crate::channels::{SharedConsole, FRAME_READY};

/// Publish a rendered frame, reporting a rejected one
fn publish(rendered: RenderedFrame) {
    if let Some(e) = rendered.error {
        warn!("Panel value out of range ({}), sending blank frame", e);
    }
    FRAME_READY.signal(rendered.frame);
}

/// Render trigger
#[embassy_executor::task]
pub async fn render_task(console: &'static SharedConsole, period_ms: u32) {
    info!("Render task started ({} ms)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));

    loop {
        ticker.next().await;

        let rendered = console.lock().await.render(Instant::now().as_millis());
        if let Some(rendered) = rendered {
            publish(rendered);
        }
    }
}

/// Second trigger
#[embassy_executor::task]
pub async fn second_task(console: &'static SharedConsole, period_ms: u32) {
    info!("Second task started ({} ms)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));

    loop {
        ticker.next().await;

        let tick = console.lock().await.second_tick(Instant::now().as_millis());
        let Some(tick) = tick else {
            continue;
        };

        if let Some(step) = tick.countdown {
            if step.released {
                info!("Countdown {} finished, latch released", step.latch);
            } else {
                trace!("Countdown {}: {}", step.latch, step.remaining.text().as_str());
            }
        }
        publish(tick.rendered);
    }
}
