//! Countdown of the latched display
//!
//! Driven by the second trigger. Every `divisor`-th tick the display owned by
//! the active, countdown-enabled latch loses one unit (one whole number, or
//! 1.0 for a fractional display). Reaching zero releases the latch, which in
//! turn stops the stepper.

use stepdeck_protocol::DisplayValue;

use super::latch::LatchId;
use super::panel::PanelState;

/// Result of a countdown decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownStep {
    /// Latch whose display was counted
    pub latch: LatchId,
    /// Display value after the step
    pub remaining: DisplayValue,
    /// The latch was released because the display reached zero
    pub released: bool,
}

/// Divides second ticks down to countdown steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    divisor: u16,
    ticks: u16,
}

impl Countdown {
    /// Create a countdown stepping every `divisor` ticks (0 is treated as 1)
    pub const fn new(divisor: u16) -> Self {
        Self {
            divisor: if divisor == 0 { 1 } else { divisor },
            ticks: 0,
        }
    }

    /// Restart the divider
    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    /// Count one second tick
    ///
    /// Returns the step taken, if this tick completed a period and a latch
    /// was counting. A latch whose display already reads zero is released
    /// without decrementing.
    pub fn tick(&mut self, panel: &mut PanelState) -> Option<CountdownStep> {
        self.ticks += 1;
        if self.ticks < self.divisor {
            return None;
        }
        self.ticks = 0;

        let latch = panel.latches.counting()?;
        let slot = &mut panel.displays[latch.display_index()];

        let value = slot.value;
        let remaining = value.with_raw(value.raw().saturating_sub(value.unit()));
        slot.value = remaining;

        let released = remaining.is_zero() && panel.latches.release(latch);
        Some(CountdownStep {
            latch,
            remaining,
            released,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;

    fn panel_with(value: DisplayValue) -> PanelState {
        let mut panel = PanelState::new(&ConsoleConfig::default());
        panel.displays[1].value = value;
        panel.latches.press(LatchId::Hold2);
        panel
    }

    #[test]
    fn test_divisor() {
        let mut panel = panel_with(DisplayValue::Integer(5));
        let mut countdown = Countdown::new(10);

        for _ in 0..9 {
            assert_eq!(countdown.tick(&mut panel), None);
        }
        let step = countdown.tick(&mut panel).unwrap();
        assert_eq!(step.latch, LatchId::Hold2);
        assert_eq!(step.remaining, DisplayValue::Integer(4));
        assert!(!step.released);
    }

    #[test]
    fn test_fractional_counts_whole_units() {
        let mut panel = panel_with(DisplayValue::Fractional(25));
        let mut countdown = Countdown::new(1);

        assert_eq!(countdown.tick(&mut panel).unwrap().remaining, DisplayValue::Fractional(15));
        assert_eq!(countdown.tick(&mut panel).unwrap().remaining, DisplayValue::Fractional(5));

        let step = countdown.tick(&mut panel).unwrap();
        assert_eq!(step.remaining, DisplayValue::Fractional(0));
        assert!(step.released);
        assert!(!panel.latches.any_active());
    }

    #[test]
    fn test_zero_display_releases_latch() {
        let mut panel = panel_with(DisplayValue::Integer(0));
        let mut countdown = Countdown::new(1);

        let step = countdown.tick(&mut panel).unwrap();
        assert!(step.released);
        assert_eq!(panel.displays[1].value, DisplayValue::Integer(0));
        assert_eq!(countdown.tick(&mut panel), None);
    }

    #[test]
    fn test_disabled_latch_not_counted() {
        let mut config = ConsoleConfig::default();
        config.latches.countdown[0] = false;
        let mut panel = PanelState::new(&config);
        panel.latches.press(LatchId::Hold1);

        let mut countdown = Countdown::new(1);
        assert_eq!(countdown.tick(&mut panel), None);
        assert_eq!(panel.displays[0].value, DisplayValue::Integer(1));
        assert!(panel.latches.is_active(LatchId::Hold1));
    }

    #[test]
    fn test_zero_divisor() {
        let mut panel = panel_with(DisplayValue::Integer(3));
        let mut countdown = Countdown::new(0);
        assert!(countdown.tick(&mut panel).is_some());
    }
}
