//! Stepdeck - Countdown Console Firmware
//!
//! Main firmware binary for the RP2040 console board: four 3-digit displays
//! on a shift-register chain, four lit buttons, four rotary encoders and one
//! stepper axis.
//!
//! Pin assignments:
//!
//! | Function              | GPIO                         |
//! |-----------------------|------------------------------|
//! | Display brightness    | 0 (PWM slice 0 A)            |
//! | Display SPI SCK/MOSI  | 2 / 3 (SPI0)                 |
//! | Display latch         | 12                           |
//! | Buttons 1-4           | 4, 5, 14, 15                 |
//! | Encoders 1-4 (A, B)   | (6,7) (26,1) (19,20) (16,17) |
//! | Encoder buttons 1-4   | 27, 13, 21, 18               |
//! | Stepper STEP/DIR/EN   | 10 / 11 / 22                 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_sync::mutex::Mutex;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stepdeck_core::config::ConsoleConfig;
use stepdeck_core::input::RotaryInput;
use stepdeck_core::state::events::{
    TAG_BUTTON_1, TAG_BUTTON_2, TAG_BUTTON_3, TAG_BUTTON_4, TAG_ROTARY_1, TAG_ROTARY_2,
    TAG_ROTARY_3, TAG_ROTARY_4,
};
use stepdeck_core::state::RotaryChannel;
use stepdeck_core::traits::FrameTransport;
use stepdeck_core::Console;
use stepdeck_drivers::{ShiftRegisterChain, StepDirConfig, StepDirDriver};
use stepdeck_protocol::Frame;

use crate::channels::SharedConsole;

mod channels;
mod config;
mod settings;
mod tasks;

/// Display SPI clock
const SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// Brightness PWM counter top: 125 MHz / 31250 = 4 kHz
const PWM_TOP: u16 = 31_249;

// Console state shared by all tasks (must live forever)
static CONSOLE: StaticCell<SharedConsole> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stepdeck firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    info!(
        "Configuration: render={}ms second={}ms divisor={} brightness={}",
        config.timing.render_ms,
        config.timing.second_ms,
        config.timing.countdown_divisor,
        config.displays.brightness
    );

    // Display brightness on the chain's output-enable line
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = brightness_compare(config.displays.brightness);
    let _brightness = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, pwm_config);

    // Display chain
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_2, p.PIN_3, spi_config);
    let latch = Output::new(p.PIN_12, Level::Low);
    let mut chain = ShiftRegisterChain::new(spi, latch);

    boot_frames(&mut chain, &config).await;
    info!("Display chain initialized");

    // Stepper (stage starts disabled)
    let stepper = unwrap!(StepDirDriver::new(
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_22, Level::High),
        StepDirConfig::default(),
    ));
    info!(
        "Stepper initialized: {}x{} steps, advance {}%, retreat {}%",
        config.motion.full_steps,
        config.motion.microsteps,
        config.motion.advance_percent,
        config.motion.retreat_percent
    );

    let console: &'static SharedConsole =
        CONSOLE.init(Mutex::new(Console::new(&config, RotaryInput::new(&config))));

    // Inputs
    let buttons = [
        (Input::new(p.PIN_27, Pull::Down), TAG_ROTARY_1),
        (Input::new(p.PIN_13, Pull::Down), TAG_ROTARY_2),
        (Input::new(p.PIN_21, Pull::Down), TAG_ROTARY_3),
        (Input::new(p.PIN_18, Pull::Down), TAG_ROTARY_4),
        (Input::new(p.PIN_4, Pull::Down), TAG_BUTTON_1),
        (Input::new(p.PIN_5, Pull::Down), TAG_BUTTON_2),
        (Input::new(p.PIN_14, Pull::Down), TAG_BUTTON_3),
        (Input::new(p.PIN_15, Pull::Down), TAG_BUTTON_4),
    ];
    let encoders = [
        (Input::new(p.PIN_6, Pull::Up), Input::new(p.PIN_7, Pull::Up), RotaryChannel::One),
        (Input::new(p.PIN_26, Pull::Up), Input::new(p.PIN_1, Pull::Up), RotaryChannel::Two),
        (Input::new(p.PIN_19, Pull::Up), Input::new(p.PIN_20, Pull::Up), RotaryChannel::Three),
        (Input::new(p.PIN_16, Pull::Up), Input::new(p.PIN_17, Pull::Up), RotaryChannel::Four),
    ];
    info!("Inputs initialized");

    // Spawn tasks
    spawner.spawn(tasks::display_tx_task(chain)).unwrap();
    spawner
        .spawn(tasks::render_task(console, config.timing.render_ms))
        .unwrap();
    spawner
        .spawn(tasks::second_task(console, config.timing.second_ms))
        .unwrap();
    spawner.spawn(tasks::stepper_task(console, stepper)).unwrap();
    spawner.spawn(tasks::rotary_router_task(console)).unwrap();
    spawner.spawn(tasks::input_task(console)).unwrap();
    for (pin, tag) in buttons {
        spawner.spawn(tasks::button_task(pin, tag)).unwrap();
    }
    for (a, b, channel) in encoders {
        spawner.spawn(tasks::encoder_task(a, b, channel)).unwrap();
    }

    info!("All tasks spawned, firmware running");

    // Keeps the brightness PWM alive; all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Scale a 16-bit brightness duty to the PWM counter range
fn brightness_compare(duty: u16) -> u16 {
    (duty as u32 * (PWM_TOP as u32 + 1) / 65536) as u16
}

/// Lamp test followed by the blank frame
async fn boot_frames(chain: &mut tasks::DisplayChain, config: &ConsoleConfig) {
    if config.timing.lamp_test_ms > 0 {
        if let Err(e) = chain.send(&Frame::all_on()) {
            warn!("Lamp test frame failed: {}", e);
        }
        Timer::after_millis(config.timing.lamp_test_ms as u64).await;
    }

    if let Err(e) = chain.clear() {
        warn!("Failed to clear displays: {}", e);
    }
}
