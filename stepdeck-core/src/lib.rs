//! Board-agnostic core logic for the countdown console firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Shared panel state (displays, LEDs, latches, motion profile)
//! - Rotary routing and the button latch state machine
//! - Stepper motion profile generation
//! - The control loop orchestrator driven by the periodic ticks
//! - Configuration types and the embedded config parser
//! - Collaborator traits (frame transport, settings source)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod input;
pub mod motion;
pub mod state;
pub mod traits;

pub use console::{Console, RenderedFrame, SecondTick, Trigger};
pub use state::CountdownStep;
