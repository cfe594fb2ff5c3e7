//! Button tasks
//!
//! Each button gets a debounce task: wait for the rising edge, re-sample
//! after the debounce window and forward the button's tag. The input task
//! resolves tags and applies presses to the console one at a time.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use stepdeck_core::input::ButtonOutcome;
use stepdeck_core::state::{Button, LatchTransition};

use crate::channels::{SharedConsole, BUTTON_CHANNEL};
use crate::settings::StubSettings;

/// Debounce window in milliseconds
const DEBOUNCE_MS: u64 = 20;

/// Debounce task for one active-high button
#[embassy_executor::task(pool_size = 8)]
pub async fn button_task(mut pin: Input<'static>, tag: &'static str) {
    debug!("Button {} task started", tag);

    loop {
        pin.wait_for_rising_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;

        if pin.is_high() {
            trace!("Button {} pressed", tag);
            BUTTON_CHANNEL.send(tag).await;

            pin.wait_for_low().await;
            Timer::after_millis(DEBOUNCE_MS).await;
        }
    }
}

/// Input task - applies button presses to the console
#[embassy_executor::task]
pub async fn input_task(console: &'static SharedConsole) {
    info!("Input task started");

    let mut settings = StubSettings;

    loop {
        let tag = BUTTON_CHANNEL.receive().await;
        let Some(button) = Button::from_tag(tag) else {
            warn!("Unknown button tag {}", tag);
            continue;
        };

        let outcome = console.lock().await.handle_button(button, &mut settings);
        log_outcome(button, outcome);
    }
}

fn log_outcome(button: Button, outcome: ButtonOutcome) {
    match outcome {
        ButtonOutcome::Latch(LatchTransition::Activated(latch)) => info!("Latch {} on", latch),
        ButtonOutcome::Latch(LatchTransition::Deactivated(latch)) => info!("Latch {} off", latch),
        ButtonOutcome::Latch(LatchTransition::Rejected { pressed, holder }) => {
            warn!("Latch {} rejected, {} is active", pressed, holder)
        }
        ButtonOutcome::Ignored(_) => debug!("Button {} has no action", button.tag()),
        ButtonOutcome::TickRate(rate) => info!("Tick rate {}", rate),
        ButtonOutcome::Label => debug!("Label button pressed"),
        ButtonOutcome::DefaultsLoaded => info!("Display defaults loaded"),
        ButtonOutcome::PresetLoaded(preset) => info!("Preset {} loaded", preset),
        ButtonOutcome::PresetUnavailable(preset) => warn!("Preset {} unavailable", preset),
    }
}
