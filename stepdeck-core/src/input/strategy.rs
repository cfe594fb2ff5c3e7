//! Input strategies
//!
//! The console delegates every input event to an [`InputStrategy`]:
//!
//! - [`BasicInput`]: drains and reports input without touching the panel
//! - [`RotaryInput`]: encoders edit the displays, buttons drive the latches,
//!   tick rate and load-defaults action, and latched displays count down

use stepdeck_protocol::DisplayValue;

use super::buttons::{load_defaults, press_latch, select_tick_rate, ButtonOutcome};
use super::rotary::apply_delta;
use crate::config::ConsoleConfig;
use crate::motion::TickRate;
use crate::state::{Button, PanelState, RotaryChannel};
use crate::traits::SettingsSource;

/// Reaction to input events
pub trait InputStrategy {
    /// Handle a non-zero encoder delta
    ///
    /// Returns the new display value if the panel was changed.
    fn on_rotary(
        &mut self,
        panel: &mut PanelState,
        channel: RotaryChannel,
        delta: i32,
    ) -> Option<DisplayValue>;

    /// Handle a debounced button press
    fn on_button<P: SettingsSource>(
        &mut self,
        panel: &mut PanelState,
        button: Button,
        settings: &mut P,
    ) -> ButtonOutcome;

    /// Whether the second trigger counts latched displays down
    fn runs_countdown(&self) -> bool;
}

/// Observe-only input
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInput;

impl InputStrategy for BasicInput {
    fn on_rotary(
        &mut self,
        _panel: &mut PanelState,
        _channel: RotaryChannel,
        _delta: i32,
    ) -> Option<DisplayValue> {
        None
    }

    fn on_button<P: SettingsSource>(
        &mut self,
        _panel: &mut PanelState,
        button: Button,
        _settings: &mut P,
    ) -> ButtonOutcome {
        ButtonOutcome::Ignored(button)
    }

    fn runs_countdown(&self) -> bool {
        false
    }
}

/// Full console input handling
#[derive(Debug, Clone, Copy)]
pub struct RotaryInput {
    defaults: [DisplayValue; 3],
}

impl RotaryInput {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            defaults: config.displays.defaults,
        }
    }
}

impl InputStrategy for RotaryInput {
    fn on_rotary(
        &mut self,
        panel: &mut PanelState,
        channel: RotaryChannel,
        delta: i32,
    ) -> Option<DisplayValue> {
        let slot = &mut panel.displays[channel.index()];
        slot.value = apply_delta(slot.value, delta);
        Some(slot.value)
    }

    fn on_button<P: SettingsSource>(
        &mut self,
        panel: &mut PanelState,
        button: Button,
        settings: &mut P,
    ) -> ButtonOutcome {
        match button {
            Button::Rotary(channel) => press_latch(panel, channel),
            Button::SpeedLow => select_tick_rate(panel, TickRate::Low),
            Button::SpeedHigh => select_tick_rate(panel, TickRate::High),
            Button::Label => ButtonOutcome::Label,
            Button::LoadDefaults => load_defaults(panel, &self.defaults, settings),
        }
    }

    fn runs_countdown(&self) -> bool {
        true
    }
}
