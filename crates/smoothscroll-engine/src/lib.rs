pub mod panel;
pub mod plugin;
pub mod replay;
pub mod scroll;
pub mod sim;
pub mod theme;

pub use panel::{PanelOutcome, SettingsPanel, SettingsPanelWidget};
pub use plugin::{ScrollingPlugin, Timer};
pub use replay::{Replayer, Script, ScriptStep, TraceEntry};
pub use sim::{SimEditor, SimHost};
pub use theme::Theme;
