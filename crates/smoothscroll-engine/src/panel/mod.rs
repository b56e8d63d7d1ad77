//! Terminal preferences panel generated from the settings schema

mod input;
mod state;
mod widget;

pub use input::{handle_key_event, Action};
pub use state::{PanelOutcome, SettingsPanel};
pub use widget::SettingsPanelWidget;
