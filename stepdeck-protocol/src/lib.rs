//! Stepdeck display frame protocol
//!
//! This crate defines the byte-level protocol between the controller and the
//! shift-register chain that drives the four 3-digit displays and the four
//! button LEDs.
//!
//! # Frame Overview
//!
//! One frame is 13 bytes, built in slot order and shifted out reversed:
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬─────┐
//! │ DISPLAY1 │ DISPLAY2 │ DISPLAY3 │ DISPLAY4 │ LED │
//! │ 3B       │ 3B       │ 3B       │ 3B       │ 1B  │
//! └──────────┴──────────┴──────────┴──────────┴─────┘
//! ```
//!
//! Digit bytes are active-high segment patterns, the LED byte is active-low
//! (0xFF = every LED off).

#![no_std]
#![deny(unsafe_code)]

pub mod blink;
pub mod codec;
pub mod digit;
pub mod frame;

pub use blink::BlinkPhase;
pub use codec::{
    render_fractional, render_integer, render_led_byte, DisplaySlot, DisplayValue, LedSlot,
    RangeError,
};
pub use digit::{encode_digit, Digit, BLANK, DECIMAL_POINT};
pub use frame::{Frame, FRAME_LEN, GROUP_LEN, LED_COUNT, SLOT_COUNT};
