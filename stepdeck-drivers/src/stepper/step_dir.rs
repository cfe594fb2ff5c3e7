//! Step/direction stepper driver
//!
//! Applies the [`StepCommand`] produced by the motion controller to a
//! generic STEP/DIR/EN driver stage (A4988, DRV8825, TMC in standalone
//! mode). The step pulse is held with an async delay so the executor keeps
//! running other tasks during the pulse.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use stepdeck_core::motion::{Direction, StepCommand};

/// Errors that can occur while driving the stepper pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// STEP pin could not be driven
    Step,
    /// DIR pin could not be driven
    Dir,
    /// EN pin could not be driven
    Enable,
}

/// Pin polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepDirConfig {
    /// Driver is enabled with EN low
    pub enable_active_low: bool,
    /// DIR high means forward
    pub forward_high: bool,
}

impl Default for StepDirConfig {
    fn default() -> Self {
        Self {
            enable_active_low: true,
            forward_high: true,
        }
    }
}

/// STEP/DIR/EN driver
pub struct StepDirDriver<STEP, DIR, EN> {
    step: STEP,
    dir: DIR,
    enable: EN,
    config: StepDirConfig,
    enabled: bool,
    direction: Option<Direction>,
    steps: u32,
}

impl<STEP, DIR, EN> StepDirDriver<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// Create a driver with the stage disabled and STEP low
    pub fn new(step: STEP, dir: DIR, enable: EN, config: StepDirConfig) -> Result<Self, StepperError> {
        let mut driver = Self {
            step,
            dir,
            enable,
            config,
            enabled: true,
            direction: None,
            steps: 0,
        };
        driver.step.set_low().map_err(|_| StepperError::Step)?;
        driver.set_enabled(false)?;
        Ok(driver)
    }

    /// Check if the driver stage is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pulses emitted since creation
    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), StepperError> {
        if enabled == self.enabled {
            return Ok(());
        }
        let high = enabled != self.config.enable_active_low;
        if high {
            self.enable.set_high()
        } else {
            self.enable.set_low()
        }
        .map_err(|_| StepperError::Enable)?;
        self.enabled = enabled;
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), StepperError> {
        if self.direction == Some(direction) {
            return Ok(());
        }
        let high = (direction == Direction::Forward) == self.config.forward_high;
        if high {
            self.dir.set_high()
        } else {
            self.dir.set_low()
        }
        .map_err(|_| StepperError::Dir)?;
        self.direction = Some(direction);
        Ok(())
    }

    /// Apply one controller command
    ///
    /// EN and DIR are only written when they change. A pulse holds STEP high
    /// for `pulse_us`.
    pub async fn apply<D: DelayNs>(
        &mut self,
        command: StepCommand,
        pulse_us: u32,
        delay: &mut D,
    ) -> Result<(), StepperError> {
        self.set_enabled(command.enabled)?;
        if !command.enabled {
            return Ok(());
        }

        self.set_direction(command.direction)?;
        if command.pulse {
            self.step.set_high().map_err(|_| StepperError::Step)?;
            delay.delay_us(pulse_us).await;
            self.step.set_low().map_err(|_| StepperError::Step)?;
            self.steps = self.steps.wrapping_add(1);
        }
        Ok(())
    }
}
