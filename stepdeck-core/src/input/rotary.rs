//! Rotary event routing
//!
//! Encoder tasks add detents to a per-channel accumulator from interrupt
//! context; the router later drains every accumulator and applies the
//! collected delta to the display of the same index.
//!
//! Draining is a single atomic swap with zero, so a detent recorded between
//! the read and the reset can never be lost.

use portable_atomic::{AtomicI32, Ordering};
use stepdeck_protocol::DisplayValue;

use crate::state::RotaryChannel;

/// Highest value reachable by turning an encoder
pub const ROTARY_MAX: u16 = 999;

/// Source of accumulated encoder deltas
pub trait DeltaSource {
    /// Return the delta accumulated on `channel` and reset it to zero
    fn take_delta(&self, channel: RotaryChannel) -> i32;
}

/// Lock-free per-channel detent accumulators
#[derive(Debug)]
pub struct RotaryAccumulators {
    counts: [AtomicI32; 4],
}

impl Default for RotaryAccumulators {
    fn default() -> Self {
        Self::new()
    }
}

impl RotaryAccumulators {
    /// Create zeroed accumulators (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            counts: [
                AtomicI32::new(0),
                AtomicI32::new(0),
                AtomicI32::new(0),
                AtomicI32::new(0),
            ],
        }
    }

    /// Add decoded detents to a channel
    pub fn record(&self, channel: RotaryChannel, delta: i32) {
        self.counts[channel.index()].fetch_add(delta, Ordering::AcqRel);
    }

}

impl DeltaSource for RotaryAccumulators {
    fn take_delta(&self, channel: RotaryChannel) -> i32 {
        self.counts[channel.index()].swap(0, Ordering::AcqRel)
    }
}

/// Apply an encoder delta to a display value
///
/// One detent is one whole unit: 1 on an integer display, 1.0 on a
/// fractional one. The raw result is clamped to `0..=ROTARY_MAX` (999 or
/// 99.9). A value already above the limit (set by configuration) is not
/// pulled down by turning up.
pub fn apply_delta(value: DisplayValue, delta: i32) -> DisplayValue {
    let raw = value.raw();
    let upper = i32::from(raw.max(ROTARY_MAX));
    let step = delta.saturating_mul(i32::from(value.unit()));
    let next = i32::from(raw).saturating_add(step).clamp(0, upper);
    value.with_raw(next as u16)
}
