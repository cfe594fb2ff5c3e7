//! Shared blink phase
//!
//! Every blinking display and LED in a frame reads the same phase, so they
//! flash in step with each other.

/// Blink phase derived from wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkPhase {
    /// Blinking outputs are shown
    On,
    /// Blinking outputs are suppressed
    Off,
}

impl BlinkPhase {
    /// Phase at `now_ms` milliseconds of wall-clock time
    ///
    /// Even seconds are `On`, odd seconds are `Off`.
    pub const fn at(now_ms: u64) -> Self {
        if (now_ms / 1000) % 2 == 1 {
            BlinkPhase::Off
        } else {
            BlinkPhase::On
        }
    }

    /// Whether an output with the given blink flag is hidden in this phase
    pub const fn suppresses(self, blink: bool) -> bool {
        blink && matches!(self, BlinkPhase::Off)
    }
}
