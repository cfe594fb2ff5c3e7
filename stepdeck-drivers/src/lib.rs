//! Hardware driver implementations
//!
//! Concrete implementations of the collaborators around the console core,
//! written against the `embedded-hal` 1.0 traits:
//!
//! - Shift-register display chain (SPI + latch line)
//! - Step/direction stepper driver
//! - Quadrature decoder for the rotary encoders

#![no_std]
#![deny(unsafe_code)]

pub mod rotary;
pub mod shift_register;
pub mod stepper;

pub use rotary::{QuadratureDecoder, StepMode};
pub use shift_register::{ShiftRegisterChain, ShiftRegisterError};
pub use stepper::{StepDirConfig, StepDirDriver, StepperError};
