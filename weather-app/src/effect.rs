//! Side effects requested by the UI state machine.
//!
//! `App` never touches the network or the disk itself; it returns an effect
//! and the event loop carries it out.

use weather_core::Config;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up current weather. Only one is ever in flight.
    Fetch { city: String, api_key: String },
    /// Persist this snapshot of the config.
    SaveConfig(Config),
    Quit,
}
