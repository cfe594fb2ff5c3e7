//! Motion profile state
//!
//! The profile is the single mutable record of where the axis is within its
//! advance / dwell / retreat / rest cycle.

/// Step rate selected by the mode buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickRate {
    /// Slow stepping (button 1)
    #[default]
    Low,
    /// Fast stepping (button 2)
    High,
}

/// Stepper direction line level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards the advance end
    #[default]
    Forward,
    /// Back towards the start
    Reverse,
}

/// Phase of the motion cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    #[default]
    Advance,
    Dwell,
    Retreat,
    Rest,
}

/// Current state of the motion cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionProfile {
    /// Selected step rate
    pub tick_rate: TickRate,
    /// Microsteps since the start of the cycle
    pub step_count: u32,
    /// Last direction driven
    pub direction: Direction,
    /// Current phase (derived from `step_count`)
    pub phase: MotionPhase,
    /// Time the dwell phase was entered (ms)
    pub dwell_started_at: Option<u64>,
    /// Time the rest phase was entered (ms)
    pub rest_started_at: Option<u64>,
}

impl MotionProfile {
    /// Return to the start of the cycle
    ///
    /// The selected tick rate is kept.
    pub fn reset(&mut self) {
        *self = Self {
            tick_rate: self.tick_rate,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_tick_rate() {
        let mut profile = MotionProfile {
            tick_rate: TickRate::High,
            step_count: 1300,
            direction: Direction::Reverse,
            phase: MotionPhase::Retreat,
            dwell_started_at: Some(10),
            rest_started_at: None,
        };
        profile.reset();

        assert_eq!(profile.tick_rate, TickRate::High);
        assert_eq!(profile.step_count, 0);
        assert_eq!(profile.direction, Direction::Forward);
        assert_eq!(profile.phase, MotionPhase::Advance);
        assert_eq!(profile.dwell_started_at, None);
    }
}
