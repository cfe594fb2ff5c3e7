//! Panel state
//!
//! Everything the console shows or remembers lives in one [`PanelState`].
//! Components borrow it for the duration of a single callback.

use stepdeck_protocol::{BlinkPhase, DisplaySlot, Frame, LedSlot, RangeError};

use super::latch::LatchGroup;
use crate::config::ConsoleConfig;
use crate::motion::{MotionProfile, TickRate};

/// LED index of button 1 (low tick rate)
pub const SPEED_LOW_LED: usize = 0;
/// LED index of button 2 (high tick rate)
pub const SPEED_HIGH_LED: usize = 1;
/// LED index of button 4 (load defaults)
pub const LOAD_DEFAULTS_LED: usize = 3;

/// LED addresses of buttons 1-4
const LED_ADDRESS: [u8; 4] = [8, 4, 2, 1];

/// Display, LED, latch and motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelState {
    pub displays: [DisplaySlot; 4],
    pub leds: [LedSlot; 4],
    pub latches: LatchGroup,
    pub motion: MotionProfile,
}

impl PanelState {
    /// Boot state
    ///
    /// Displays show their configured initial values. The low tick rate is
    /// selected with its LED lit steadily, and button 4 blinks to signal
    /// defaults can be loaded.
    pub fn new(config: &ConsoleConfig) -> Self {
        let mut leds = LED_ADDRESS.map(LedSlot::new);
        leds[SPEED_LOW_LED].active = true;
        leds[LOAD_DEFAULTS_LED].active = true;
        leds[LOAD_DEFAULTS_LED].blink = true;

        Self {
            displays: config.displays.initial.map(DisplaySlot::new),
            leds,
            latches: LatchGroup::new(config.latches.countdown),
            motion: MotionProfile::default(),
        }
    }

    /// Select a tick rate and light its button
    ///
    /// The two rate LEDs are switched together so exactly one is lit.
    pub fn set_tick_rate(&mut self, rate: TickRate) {
        self.motion.tick_rate = rate;

        let low = rate == TickRate::Low;
        for (index, lit) in [(SPEED_LOW_LED, low), (SPEED_HIGH_LED, !low)] {
            self.leds[index].active = lit;
            self.leds[index].blink = false;
        }
    }

    /// Render the current state
    pub fn frame(&self, phase: BlinkPhase) -> Result<Frame, RangeError> {
        Frame::assemble(&self.displays, &self.leds, phase)
    }
}
