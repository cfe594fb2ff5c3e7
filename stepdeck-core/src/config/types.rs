//! Configuration type definitions
//!
//! The console is configured once at boot. Every field has a built-in
//! default so a missing or broken configuration file still yields a working
//! panel.

use stepdeck_protocol::DisplayValue;

use crate::motion::{steps_for, StepperController, TickRate};

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Values shown at boot on displays 1-4
    pub initial: [DisplayValue; 4],
    /// Values loaded into displays 1-3 by the load-defaults button
    pub defaults: [DisplayValue; 3],
    /// Output-enable PWM duty (0-65535)
    pub brightness: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            initial: [
                DisplayValue::Integer(1),
                DisplayValue::Integer(2),
                DisplayValue::Integer(3),
                DisplayValue::Integer(4),
            ],
            defaults: [
                DisplayValue::Integer(300),
                DisplayValue::Integer(120),
                DisplayValue::Integer(60),
            ],
            brightness: 63000,
        }
    }
}

/// Hold latch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchConfig {
    /// Count the display down while its latch is active
    pub countdown: [bool; 3],
}

impl Default for LatchConfig {
    fn default() -> Self {
        Self {
            countdown: [true; 3],
        }
    }
}

/// Periodic trigger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Render trigger period (ms)
    pub render_ms: u32,
    /// Second trigger period (ms)
    pub second_ms: u32,
    /// Second ticks per countdown decrement
    pub countdown_divisor: u16,
    /// Lamp test duration at boot (ms), 0 to skip
    pub lamp_test_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            render_ms: 50,
            second_ms: 100,
            countdown_divisor: 10,
            lamp_test_ms: 1000,
        }
    }
}

/// Stepper axis configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Full steps per revolution
    pub full_steps: u32,
    /// Microsteps per full step
    pub microsteps: u32,
    /// Advance travel, percent of one revolution
    pub advance_percent: u32,
    /// Retreat travel, percent of one revolution
    pub retreat_percent: u32,
    /// Pause between advance and retreat (ms)
    pub dwell_ms: u32,
    /// Pause after retreat before the next cycle (ms)
    pub rest_ms: u32,
    /// Step period at the low tick rate (us)
    pub low_rate_us: u32,
    /// Step period at the high tick rate (us)
    pub high_rate_us: u32,
    /// Step pulse width (us)
    pub pulse_us: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            full_steps: 200,
            microsteps: 8,
            advance_percent: 75,
            retreat_percent: 30,
            dwell_ms: 500,
            rest_ms: 5000,
            low_rate_us: 2000,
            high_rate_us: 500,
            pulse_us: 5,
        }
    }
}

impl MotionConfig {
    /// Build the cycle controller
    pub fn controller(&self) -> StepperController {
        StepperController::new(
            steps_for(self.full_steps, self.microsteps, self.advance_percent),
            steps_for(self.full_steps, self.microsteps, self.retreat_percent),
            self.dwell_ms as u64,
            self.rest_ms as u64,
        )
    }

    /// Step period for a tick rate (us)
    pub fn period_us(&self, rate: TickRate) -> u32 {
        match rate {
            TickRate::Low => self.low_rate_us,
            TickRate::High => self.high_rate_us,
        }
    }
}

/// Complete console configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    pub displays: DisplayConfig,
    pub latches: LatchConfig,
    pub timing: TimingConfig,
    pub motion: MotionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let ctrl = MotionConfig::default().controller();
        assert_eq!(ctrl.advance_steps, 1200);
        assert_eq!(ctrl.retreat_steps, 480);
        assert_eq!(ctrl.dwell_ms, 500);
    }

    #[test]
    fn test_period_by_rate() {
        let motion = MotionConfig::default();
        assert_eq!(motion.period_us(TickRate::Low), 2000);
        assert_eq!(motion.period_us(TickRate::High), 500);
    }
}
