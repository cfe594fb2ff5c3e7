//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals and
//! the shared console mutex.

pub mod buttons;
pub mod display_tx;
pub mod rotary;
pub mod stepper;
pub mod tick;

pub use buttons::{button_task, input_task};
pub use display_tx::{display_tx_task, DisplayChain};
pub use rotary::{encoder_task, rotary_router_task};
pub use stepper::{stepper_task, StepperPins};
pub use tick::{render_task, second_task};
