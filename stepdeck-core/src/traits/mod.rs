//! Collaborator traits
//!
//! These traits define the interface between the console logic and the
//! hardware or remote services around it.

pub mod settings;
pub mod transport;

pub use settings::{NoSettings, SettingsSource};
pub use transport::FrameTransport;
