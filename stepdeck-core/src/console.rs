//! Control loop orchestrator
//!
//! [`Console`] owns the panel state and is driven by three periodic
//! triggers plus input events:
//!
//! | Trigger  | Call                      | Output                  |
//! |----------|---------------------------|-------------------------|
//! | Render   | [`Console::render`]       | frame for the transport |
//! | Second   | [`Console::second_tick`]  | frame + countdown step  |
//! | Step     | [`Console::step_tick`]    | step/dir/enable command |
//!
//! The console itself has no notion of time beyond the `now_ms` passed in,
//! which keeps it usable from host tests.

use stepdeck_protocol::{BlinkPhase, Frame, RangeError};

use crate::config::{ConsoleConfig, MotionConfig};
use crate::input::{ButtonOutcome, DeltaSource, InputStrategy};
use crate::motion::{StepCommand, StepperController};
use crate::state::{Button, Countdown, CountdownStep, LatchTransition, PanelState, RotaryChannel};
use crate::traits::SettingsSource;

/// Periodic trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    Render,
    Second,
    Step,
}

impl Trigger {
    const fn index(self) -> usize {
        match self {
            Trigger::Render => 0,
            Trigger::Second => 1,
            Trigger::Step => 2,
        }
    }
}

/// Frame produced by a render
///
/// When the panel state could not be rendered, `frame` is the blank frame
/// and `error` names the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderedFrame {
    pub frame: Frame,
    pub error: Option<RangeError>,
}

/// Output of the second trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecondTick {
    pub rendered: RenderedFrame,
    pub countdown: Option<CountdownStep>,
}

/// Console controller
pub struct Console<S: InputStrategy> {
    panel: PanelState,
    input: S,
    stepper: StepperController,
    motion: MotionConfig,
    countdown: Countdown,
    running: [bool; 3],
}

impl<S: InputStrategy> Console<S> {
    /// Create a console in its boot state
    pub fn new(config: &ConsoleConfig, input: S) -> Self {
        Self {
            panel: PanelState::new(config),
            input,
            stepper: config.motion.controller(),
            motion: config.motion,
            countdown: Countdown::new(config.timing.countdown_divisor),
            running: [true; 3],
        }
    }

    /// Current panel state
    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// Mutable panel state
    pub fn panel_mut(&mut self) -> &mut PanelState {
        &mut self.panel
    }

    /// Stop a periodic trigger
    pub fn stop(&mut self, trigger: Trigger) {
        self.running[trigger.index()] = false;
    }

    /// Resume a stopped trigger
    pub fn resume(&mut self, trigger: Trigger) {
        self.running[trigger.index()] = true;
    }

    /// Check if a trigger is running
    pub fn is_running(&self, trigger: Trigger) -> bool {
        self.running[trigger.index()]
    }

    fn render_frame(&self, now_ms: u64) -> RenderedFrame {
        match self.panel.frame(BlinkPhase::at(now_ms)) {
            Ok(frame) => RenderedFrame { frame, error: None },
            Err(e) => RenderedFrame {
                frame: Frame::blank(),
                error: Some(e),
            },
        }
    }

    /// Render trigger
    ///
    /// Returns `None` while the render trigger is stopped.
    pub fn render(&mut self, now_ms: u64) -> Option<RenderedFrame> {
        if !self.is_running(Trigger::Render) {
            return None;
        }
        Some(self.render_frame(now_ms))
    }

    /// Second trigger
    ///
    /// Advances the countdown (if the input strategy runs one) and renders
    /// the result.
    pub fn second_tick(&mut self, now_ms: u64) -> Option<SecondTick> {
        if !self.is_running(Trigger::Second) {
            return None;
        }

        let countdown = if self.input.runs_countdown() {
            self.countdown.tick(&mut self.panel)
        } else {
            None
        };

        Some(SecondTick {
            rendered: self.render_frame(now_ms),
            countdown,
        })
    }

    /// Step trigger
    ///
    /// The motion cycle is gated by the hold latches.
    pub fn step_tick(&mut self, now_ms: u64) -> StepCommand {
        if !self.is_running(Trigger::Step) {
            return StepCommand::DISABLED;
        }
        let gate = self.panel.latches.any_active();
        self.stepper.tick(&mut self.panel.motion, gate, now_ms)
    }

    /// Step period for the selected tick rate (us)
    pub fn step_period_us(&self) -> u32 {
        self.motion.period_us(self.panel.motion.tick_rate)
    }

    /// Step pulse width (us)
    pub fn pulse_us(&self) -> u32 {
        self.motion.pulse_us
    }

    /// Drain every encoder channel and apply the deltas
    ///
    /// Returns the drained delta per channel.
    pub fn route_rotary<D: DeltaSource>(&mut self, source: &D) -> [i32; 4] {
        let mut drained = [0; 4];
        for channel in RotaryChannel::ALL {
            let delta = source.take_delta(channel);
            if delta != 0 {
                self.input.on_rotary(&mut self.panel, channel, delta);
            }
            drained[channel.index()] = delta;
        }
        drained
    }

    /// Handle a debounced button press
    pub fn handle_button<P: SettingsSource>(
        &mut self,
        button: Button,
        settings: &mut P,
    ) -> ButtonOutcome {
        let outcome = self.input.on_button(&mut self.panel, button, settings);
        if let ButtonOutcome::Latch(LatchTransition::Activated(_)) = outcome {
            // Full countdown period before the first decrement
            self.countdown.reset();
        }
        outcome
    }
}
