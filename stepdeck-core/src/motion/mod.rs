//! Stepper motion
//!
//! Cycle profile and the tick-driven controller that walks it.

pub mod controller;
pub mod profile;

pub use controller::{steps_for, StepCommand, StepperController};
pub use profile::{Direction, MotionPhase, MotionProfile, TickRate};
