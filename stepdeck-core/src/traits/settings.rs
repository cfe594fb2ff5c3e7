//! Settings source trait

use stepdeck_protocol::DisplayValue;

/// Source of stored display presets
///
/// Consulted by the load-defaults button when display 4 holds a preset
/// number.
pub trait SettingsSource {
    /// Look up values for displays 1-3
    ///
    /// Returns `None` when the preset does not exist or the source cannot be
    /// reached.
    fn load_preset(&mut self, preset: u16) -> Option<[DisplayValue; 3]>;
}

/// Settings source without any presets
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsSource for NoSettings {
    fn load_preset(&mut self, _preset: u16) -> Option<[DisplayValue; 3]> {
        None
    }
}
