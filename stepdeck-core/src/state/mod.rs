//! Console state
//!
//! The panel state block, the hold latches and the countdown that drains
//! the latched display.

pub mod countdown;
pub mod events;
pub mod latch;
pub mod panel;

pub use countdown::{Countdown, CountdownStep};
pub use events::{Button, RotaryChannel};
pub use latch::{LatchGroup, LatchId, LatchTransition};
pub use panel::PanelState;
