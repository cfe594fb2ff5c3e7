//! Input handling
//!
//! Encoder delta routing, button actions and the pluggable strategies that
//! tie them to the panel state.

pub mod buttons;
pub mod rotary;
pub mod strategy;

pub use buttons::ButtonOutcome;
pub use rotary::{apply_delta, DeltaSource, RotaryAccumulators, ROTARY_MAX};
pub use strategy::{BasicInput, InputStrategy, RotaryInput};
