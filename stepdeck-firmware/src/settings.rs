//! Settings source for the load-defaults button
//!
//! Remote preset storage is not wired up on this board. Every lookup is
//! reported and answered with `None`, which leaves the displays unchanged.

use defmt::*;

use stepdeck_core::traits::SettingsSource;
use stepdeck_protocol::DisplayValue;

/// Settings source without a backing store
#[derive(Default)]
pub struct StubSettings;

impl SettingsSource for StubSettings {
    fn load_preset(&mut self, preset: u16) -> Option<[DisplayValue; 3]> {
        warn!("Preset {} requested, remote settings unavailable", preset);
        None
    }
}
