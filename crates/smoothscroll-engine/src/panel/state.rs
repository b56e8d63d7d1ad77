use serde_json::Value;
use smoothscroll_core::schema::{Control, SettingDef, SETTINGS};
use smoothscroll_core::{Result, Settings};
use tracing::debug;

use super::input::Action;

/// Slider steps covered by a large adjustment
const LARGE_STEP: f64 = 10.0;

/// What the caller should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    None,
    /// Settings changed and should be saved and applied
    Changed,
    Quit,
}

/// Preferences panel state: one row per schema entry
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    settings: Settings,
    selected: usize,
    status_message: Option<String>,
}

impl SettingsPanel {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            selected: 0,
            status_message: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_def(&self) -> &'static SettingDef {
        &SETTINGS[self.selected]
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Display text of a setting's current value
    pub fn display_value(&self, def: &SettingDef) -> String {
        match (def.control, self.settings.get(def.key)) {
            (Control::Toggle, Ok(Value::Bool(on))) => (if on { "on" } else { "off" }).to_string(),
            (Control::Slider { step, .. }, Ok(Value::Number(n))) => {
                let value = n.as_f64().unwrap_or_default();
                if step >= 1.0 {
                    format!("{:.0}", value)
                } else {
                    format!("{:.1}", value)
                }
            }
            (Control::Dropdown { .. }, Ok(Value::String(s))) => s,
            (_, Ok(other)) => other.to_string(),
            (_, Err(_)) => "?".to_string(),
        }
    }

    pub fn handle(&mut self, action: Action) -> PanelOutcome {
        let changed = match action {
            Action::Quit => return PanelOutcome::Quit,
            Action::MoveUp => {
                self.selected = self.selected.saturating_sub(1);
                false
            }
            Action::MoveDown => {
                self.selected = (self.selected + 1).min(SETTINGS.len() - 1);
                false
            }
            Action::JumpToTop => {
                self.selected = 0;
                false
            }
            Action::JumpToBottom => {
                self.selected = SETTINGS.len() - 1;
                false
            }
            Action::Increase => self.adjust(1.0),
            Action::Decrease => self.adjust(-1.0),
            Action::LargeIncrease => self.adjust(LARGE_STEP),
            Action::LargeDecrease => self.adjust(-LARGE_STEP),
            Action::Toggle => self.adjust(1.0),
            Action::ResetSelected => self.reset_selected(),
            Action::None => false,
        };

        if changed {
            PanelOutcome::Changed
        } else {
            PanelOutcome::None
        }
    }

    /// Move the selected setting by `steps`
    ///
    /// Toggles flip regardless of direction; dropdowns cycle through their
    /// options and wrap.
    fn adjust(&mut self, steps: f64) -> bool {
        let def = self.selected_def();
        let Ok(current) = self.settings.get(def.key) else {
            return false;
        };

        let next = match def.control {
            Control::Toggle => Value::Bool(!current.as_bool().unwrap_or_default()),
            Control::Slider { min, max, step } => {
                let value = current.as_f64().unwrap_or(min);
                let stepped = ((value + step * steps) / step).round() * step;
                let stepped = (stepped.clamp(min, max) * 100.0).round() / 100.0;
                match serde_json::Number::from_f64(stepped) {
                    Some(n) => Value::Number(n),
                    None => return false,
                }
            }
            Control::Dropdown { options } => {
                let position = current
                    .as_str()
                    .and_then(|s| options.iter().position(|o| *o == s))
                    .unwrap_or(0);
                let len = options.len() as i64;
                let shift = if steps < 0.0 { -1 } else { 1 };
                let next = (position as i64 + shift).rem_euclid(len) as usize;
                Value::String(options[next].to_string())
            }
        };

        if next == current {
            return false;
        }
        self.update(def.key, next)
    }

    fn reset_selected(&mut self) -> bool {
        let def = self.selected_def();
        let Ok(default) = Settings::default().get(def.key) else {
            return false;
        };
        if self.settings.get(def.key).ok().as_ref() == Some(&default) {
            return false;
        }
        self.update(def.key, default)
    }

    fn update(&mut self, key: &str, value: Value) -> bool {
        match self.try_update(key, value) {
            Ok(()) => {
                debug!(key, "Setting changed in panel");
                self.status_message = None;
                true
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
                false
            }
        }
    }

    fn try_update(&mut self, key: &str, value: Value) -> Result<()> {
        let mut updated = self.settings.clone();
        updated.set_value(key, value)?;
        self.settings = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use smoothscroll_core::ScrollbarVisibility;

    use super::*;

    fn select(panel: &mut SettingsPanel, key: &str) {
        panel.handle(Action::JumpToTop);
        while panel.selected_def().key != key {
            panel.handle(Action::MoveDown);
        }
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut panel = SettingsPanel::new(Settings::default());
        assert_eq!(panel.handle(Action::MoveUp), PanelOutcome::None);
        assert_eq!(panel.selected(), 0);
        panel.handle(Action::JumpToBottom);
        panel.handle(Action::MoveDown);
        assert_eq!(panel.selected(), SETTINGS.len() - 1);
    }

    #[test]
    fn test_toggle() {
        let mut panel = SettingsPanel::new(Settings::default());
        select(&mut panel, "mouse_scroll_invert");
        assert_eq!(panel.handle(Action::Toggle), PanelOutcome::Changed);
        assert!(panel.settings().mouse_scroll_invert);
        assert_eq!(panel.display_value(panel.selected_def()), "on");
    }

    #[test]
    fn test_slider_steps_and_clamps() {
        let mut panel = SettingsPanel::new(Settings::default());
        select(&mut panel, "mouse_scroll_speed");
        panel.handle(Action::Increase);
        assert_eq!(panel.settings().mouse_scroll_speed, 1.1);
        assert_eq!(panel.display_value(panel.selected_def()), "1.1");

        for _ in 0..10 {
            panel.handle(Action::LargeIncrease);
        }
        assert_eq!(panel.settings().mouse_scroll_speed, 5.0);
        assert_eq!(panel.handle(Action::Increase), PanelOutcome::None);
    }

    #[test]
    fn test_dropdown_cycles() {
        let mut panel = SettingsPanel::new(Settings::default());
        select(&mut panel, "scrollbar_visibility");
        panel.handle(Action::Increase);
        assert_eq!(
            panel.settings().scrollbar_visibility,
            ScrollbarVisibility::Hide
        );
        panel.handle(Action::Decrease);
        panel.handle(Action::Decrease);
        assert_eq!(
            panel.settings().scrollbar_visibility,
            ScrollbarVisibility::Scroll
        );
    }

    #[test]
    fn test_reset_selected() {
        let mut panel = SettingsPanel::new(Settings::default());
        select(&mut panel, "scrollbar_width");
        assert_eq!(panel.handle(Action::ResetSelected), PanelOutcome::None);
        panel.handle(Action::LargeIncrease);
        assert_eq!(panel.settings().scrollbar_width, 10.0);
        assert_eq!(panel.handle(Action::ResetSelected), PanelOutcome::Changed);
        assert_eq!(panel.settings().scrollbar_width, 0.0);
    }

    #[test]
    fn test_quit() {
        let mut panel = SettingsPanel::new(Settings::default());
        assert_eq!(panel.handle(Action::Quit), PanelOutcome::Quit);
    }
}
