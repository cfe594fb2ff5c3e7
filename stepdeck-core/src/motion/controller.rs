//! Stepper motion controller
//!
//! Drives an open-loop, step-counted cycle:
//!
//! ```text
//!  n:  0 ........ A        A+1 ....... A+B    > A+B
//!      Advance    Dwell    Retreat            Rest
//!      (Forward)  (wait)   (Reverse)          (wait, then n = 0)
//! ```
//!
//! The controller never blocks. Each tick yields a [`StepCommand`] for the
//! step/direction driver, and dwell/rest are elapsed-time comparisons against
//! the tick timestamp.

use super::profile::{Direction, MotionPhase, MotionProfile};

/// Output of one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepCommand {
    /// Driver enable line asserted
    pub enabled: bool,
    /// Direction line level
    pub direction: Direction,
    /// Emit one step pulse
    pub pulse: bool,
}

impl StepCommand {
    /// Driver released, no motion
    pub const DISABLED: StepCommand = StepCommand {
        enabled: false,
        direction: Direction::Forward,
        pulse: false,
    };

    fn hold(direction: Direction) -> Self {
        Self {
            enabled: true,
            direction,
            pulse: false,
        }
    }

    fn step(direction: Direction) -> Self {
        Self {
            enabled: true,
            direction,
            pulse: true,
        }
    }
}

/// Cycle geometry and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperController {
    /// Microsteps in the advance phase (A)
    pub advance_steps: u32,
    /// Microsteps in the retreat phase (B)
    pub retreat_steps: u32,
    /// Dwell duration (ms)
    pub dwell_ms: u64,
    /// Rest duration (ms)
    pub rest_ms: u64,
}

/// Microsteps covering `percent` of one revolution
pub fn steps_for(full_steps: u32, microsteps: u32, percent: u32) -> u32 {
    let per_rev = full_steps as u64 * microsteps as u64;
    let steps = per_rev * percent as u64 / 100;
    steps.min(u32::MAX as u64) as u32
}

impl StepperController {
    /// Create a controller from explicit step counts
    pub const fn new(advance_steps: u32, retreat_steps: u32, dwell_ms: u64, rest_ms: u64) -> Self {
        Self {
            advance_steps,
            retreat_steps,
            dwell_ms,
            rest_ms,
        }
    }

    /// Last step count of the retreat phase
    fn retreat_end(&self) -> u32 {
        self.advance_steps.saturating_add(self.retreat_steps)
    }

    /// Phase that a given step count belongs to
    pub fn phase_for(&self, step_count: u32) -> MotionPhase {
        if step_count < self.advance_steps {
            MotionPhase::Advance
        } else if step_count == self.advance_steps {
            MotionPhase::Dwell
        } else if step_count <= self.retreat_end() {
            MotionPhase::Retreat
        } else {
            MotionPhase::Rest
        }
    }

    /// Advance the cycle by one tick
    ///
    /// `gate` is true while any hold latch is active. Dropping the gate
    /// returns the profile to the start of the cycle and releases the driver.
    pub fn tick(&self, profile: &mut MotionProfile, gate: bool, now_ms: u64) -> StepCommand {
        if !gate {
            profile.reset();
            return StepCommand::DISABLED;
        }

        let n = profile.step_count;
        let command = match self.phase_for(n) {
            MotionPhase::Advance => {
                profile.direction = Direction::Forward;
                profile.step_count = n + 1;
                StepCommand::step(Direction::Forward)
            }
            MotionPhase::Dwell => {
                let started = *profile.dwell_started_at.get_or_insert(now_ms);
                if now_ms.saturating_sub(started) >= self.dwell_ms {
                    profile.dwell_started_at = None;
                    profile.step_count = n.saturating_add(1);
                }
                StepCommand::hold(profile.direction)
            }
            MotionPhase::Retreat => {
                profile.direction = Direction::Reverse;
                profile.step_count = n.saturating_add(1);
                if profile.step_count > self.retreat_end() {
                    profile.rest_started_at = Some(now_ms);
                }
                StepCommand::step(Direction::Reverse)
            }
            MotionPhase::Rest => {
                let started = *profile.rest_started_at.get_or_insert(now_ms);
                let direction = profile.direction;
                if now_ms.saturating_sub(started) >= self.rest_ms {
                    profile.reset();
                }
                StepCommand::hold(direction)
            }
        };

        profile.phase = self.phase_for(profile.step_count);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(dwell_ms: u64, rest_ms: u64) -> StepperController {
        StepperController::new(steps_for(200, 8, 75), steps_for(200, 8, 30), dwell_ms, rest_ms)
    }

    #[test]
    fn test_step_counts() {
        assert_eq!(steps_for(200, 8, 75), 1200);
        assert_eq!(steps_for(200, 8, 30), 480);
        assert_eq!(steps_for(0, 8, 30), 0);
    }

    #[test]
    fn test_gate_off_resets() {
        let ctrl = controller(0, 0);
        let mut profile = MotionProfile {
            step_count: 700,
            direction: Direction::Reverse,
            dwell_started_at: Some(5),
            ..MotionProfile::default()
        };

        let cmd = ctrl.tick(&mut profile, false, 100);
        assert_eq!(cmd, StepCommand::DISABLED);
        assert_eq!(profile.step_count, 0);
        assert_eq!(profile.phase, MotionPhase::Advance);
        assert_eq!(profile.dwell_started_at, None);
    }

    #[test]
    fn test_advance_pulses_forward() {
        let ctrl = controller(0, 0);
        let mut profile = MotionProfile::default();

        let cmd = ctrl.tick(&mut profile, true, 0);
        assert!(cmd.enabled);
        assert!(cmd.pulse);
        assert_eq!(cmd.direction, Direction::Forward);
        assert_eq!(profile.step_count, 1);
    }

    #[test]
    fn test_dwell_waits_for_elapsed_time() {
        let ctrl = controller(500, 0);
        let mut profile = MotionProfile {
            step_count: 1200,
            phase: MotionPhase::Dwell,
            ..MotionProfile::default()
        };

        let cmd = ctrl.tick(&mut profile, true, 1000);
        assert!(!cmd.pulse);
        assert!(cmd.enabled);
        assert_eq!(profile.dwell_started_at, Some(1000));
        assert_eq!(profile.phase, MotionPhase::Dwell);

        ctrl.tick(&mut profile, true, 1499);
        assert_eq!(profile.step_count, 1200);

        ctrl.tick(&mut profile, true, 1500);
        assert_eq!(profile.step_count, 1201);
        assert_eq!(profile.phase, MotionPhase::Retreat);
        assert_eq!(profile.dwell_started_at, None);
    }

    #[test]
    fn test_retreat_pulses_reverse_and_starts_rest() {
        let ctrl = controller(0, 1000);
        let mut profile = MotionProfile {
            step_count: 1680,
            ..MotionProfile::default()
        };

        let cmd = ctrl.tick(&mut profile, true, 42);
        assert!(cmd.pulse);
        assert_eq!(cmd.direction, Direction::Reverse);
        assert_eq!(profile.phase, MotionPhase::Rest);
        assert_eq!(profile.rest_started_at, Some(42));
    }

    #[test]
    fn test_rest_times_out_to_advance() {
        let ctrl = controller(0, 1000);
        let mut profile = MotionProfile {
            step_count: 1681,
            phase: MotionPhase::Rest,
            rest_started_at: Some(0),
            ..MotionProfile::default()
        };

        let cmd = ctrl.tick(&mut profile, true, 999);
        assert!(!cmd.pulse);
        assert_eq!(profile.phase, MotionPhase::Rest);

        ctrl.tick(&mut profile, true, 1000);
        assert_eq!(profile.step_count, 0);
        assert_eq!(profile.phase, MotionPhase::Advance);
        assert_eq!(profile.rest_started_at, None);
    }

    #[test]
    fn test_degenerate_geometry() {
        let ctrl = StepperController::new(0, 0, 0, 0);
        let mut profile = MotionProfile::default();

        for now in 0..10 {
            let cmd = ctrl.tick(&mut profile, true, now);
            assert!(cmd.enabled);
        }
        assert!(profile.step_count <= 1);
    }

    #[test]
    fn test_phase_boundaries() {
        let ctrl = controller(0, 0);
        assert_eq!(ctrl.phase_for(0), MotionPhase::Advance);
        assert_eq!(ctrl.phase_for(1199), MotionPhase::Advance);
        assert_eq!(ctrl.phase_for(1200), MotionPhase::Dwell);
        assert_eq!(ctrl.phase_for(1201), MotionPhase::Retreat);
        assert_eq!(ctrl.phase_for(1680), MotionPhase::Retreat);
        assert_eq!(ctrl.phase_for(1681), MotionPhase::Rest);
    }
}
