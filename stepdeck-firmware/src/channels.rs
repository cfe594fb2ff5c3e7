//! Inter-task communication channels
//!
//! Defines the statics shared between Embassy tasks. Uses embassy-sync
//! primitives for async communication; encoder detents go through lock-free
//! accumulators because they are recorded on every pin edge.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use stepdeck_core::input::{RotaryAccumulators, RotaryInput};
use stepdeck_core::Console;
use stepdeck_protocol::Frame;

/// Channel capacity for debounced button tags
const BUTTON_CHANNEL_SIZE: usize = 8;

/// Console state shared by every task
///
/// Each task holds the lock for one whole callback.
pub type SharedConsole = Mutex<CriticalSectionRawMutex, Console<RotaryInput>>;

/// Tags of debounced button presses
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, &'static str, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Detents decoded by the encoder tasks, drained by the router
pub static ROTARY_DELTAS: RotaryAccumulators = RotaryAccumulators::new();

/// Signal that at least one encoder moved
pub static ROTARY_MOVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest rendered frame for the display transport
pub static FRAME_READY: Signal<CriticalSectionRawMutex, Frame> = Signal::new();
