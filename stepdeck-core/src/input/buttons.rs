//! Button actions
//!
//! - Rotary buttons 1-3: toggle the hold latch of their display
//! - Rotary button 4: no latch, reported and ignored
//! - Button 1 / 2: select the low / high tick rate
//! - Button 3: label action, no effect yet
//! - Button 4: load display defaults or a stored preset

use stepdeck_protocol::DisplayValue;

use crate::motion::TickRate;
use crate::state::{Button, LatchId, LatchTransition, PanelState, RotaryChannel};
use crate::traits::SettingsSource;

/// What a button press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonOutcome {
    /// Hold latch transition (including rejected presses)
    Latch(LatchTransition),
    /// Press had no effect
    Ignored(Button),
    /// Tick rate selected
    TickRate(TickRate),
    /// Label button pressed
    Label,
    /// Displays 1-3 received the configured defaults
    DefaultsLoaded,
    /// Displays 1-3 received a stored preset
    PresetLoaded(u16),
    /// Requested preset could not be loaded
    PresetUnavailable(u16),
}

/// Toggle the latch owned by a rotary button
pub fn press_latch(panel: &mut PanelState, channel: RotaryChannel) -> ButtonOutcome {
    match LatchId::for_channel(channel) {
        Some(latch) => ButtonOutcome::Latch(panel.latches.press(latch)),
        None => ButtonOutcome::Ignored(Button::Rotary(channel)),
    }
}

/// Select a tick rate
pub fn select_tick_rate(panel: &mut PanelState, rate: TickRate) -> ButtonOutcome {
    panel.set_tick_rate(rate);
    ButtonOutcome::TickRate(rate)
}

/// Load displays 1-3
///
/// With display 4 at zero the configured defaults are used. Otherwise
/// display 4 names a preset, looked up in `settings`; an unknown preset
/// leaves the displays unchanged.
pub fn load_defaults<P: SettingsSource>(
    panel: &mut PanelState,
    defaults: &[DisplayValue; 3],
    settings: &mut P,
) -> ButtonOutcome {
    let selector = panel.displays[3].value;
    if selector.is_zero() {
        write_values(panel, defaults);
        return ButtonOutcome::DefaultsLoaded;
    }

    let preset = selector.raw();
    match settings.load_preset(preset) {
        Some(values) => {
            write_values(panel, &values);
            ButtonOutcome::PresetLoaded(preset)
        }
        None => ButtonOutcome::PresetUnavailable(preset),
    }
}

fn write_values(panel: &mut PanelState, values: &[DisplayValue; 3]) {
    for (slot, value) in panel.displays.iter_mut().zip(values.iter()) {
        slot.value = *value;
    }
}
