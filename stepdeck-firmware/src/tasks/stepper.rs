//! Stepper control task
//!
//! Runs the step trigger at the period of the selected tick rate and applies
//! each controller command to the STEP/DIR/EN pins.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Duration, Instant, Timer};

use stepdeck_core::motion::MotionPhase;
use stepdeck_drivers::StepDirDriver;

use crate::channels::SharedConsole;

/// Step/dir driver on three GPIOs
pub type StepperPins = StepDirDriver<Output<'static>, Output<'static>, Output<'static>>;

/// Stepper control task
#[embassy_executor::task]
pub async fn stepper_task(console: &'static SharedConsole, mut driver: StepperPins) {
    info!("Stepper task started");

    let mut delay = Delay;
    let mut next = Instant::now();
    let mut last_phase = MotionPhase::Advance;

    loop {
        let (command, phase, period_us, pulse_us) = {
            let mut console = console.lock().await;
            let command = console.step_tick(Instant::now().as_millis());
            (
                command,
                console.panel().motion.phase,
                console.step_period_us(),
                console.pulse_us(),
            )
        };

        if command.enabled != driver.is_enabled() {
            debug!("Stepper {}", if command.enabled { "enabled" } else { "released" });
        }

        if let Err(e) = driver.apply(command, pulse_us, &mut delay).await {
            warn!("Stepper pin error: {}", e);
        }

        if phase != last_phase {
            debug!("Motion phase {} -> {} ({} pulses)", last_phase, phase, driver.steps());
            last_phase = phase;
        }

        next += Duration::from_micros(period_us as u64);
        // Skip missed periods instead of bursting to catch up
        let now = Instant::now();
        if next < now {
            next = now;
        }
        Timer::at(next).await;
    }
}
