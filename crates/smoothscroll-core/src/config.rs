use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::schema::{self, SETTINGS};
use crate::store::SettingsStore;
use crate::{Error, Result};

/// Plugin settings, persisted as a flat mapping of option names to values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Animate mouse wheel scrolling
    #[serde(default = "default_true")]
    pub mouse_scroll_enabled: bool,
    /// Multiplier for each wheel step
    #[serde(default = "default_mouse_scroll_speed")]
    pub mouse_scroll_speed: f64,
    /// Wheel animation length (0 = jump)
    #[serde(default = "default_smoothness")]
    pub mouse_scroll_smoothness: f64,
    /// Reverse wheel direction
    #[serde(default)]
    pub mouse_scroll_invert: bool,

    /// Keep the cursor centered in the viewport
    #[serde(default = "default_true")]
    pub center_cursor_enabled: bool,
    /// Dead zone while typing, percent of half the viewport height
    #[serde(default)]
    pub center_cursor_editing_distance: f64,
    /// Dead zone while navigating, percent of half the viewport height
    #[serde(default)]
    pub center_cursor_moving_distance: f64,
    /// Centering animation smoothness while typing (0 = jump)
    #[serde(default = "default_smoothness")]
    pub center_cursor_editing_smoothness: f64,
    /// Centering animation smoothness while navigating (0 = jump)
    #[serde(default = "default_smoothness")]
    pub center_cursor_moving_smoothness: f64,
    /// Re-center when the cursor is placed with the mouse
    #[serde(default)]
    pub center_cursor_enable_mouse: bool,

    /// Style every scrollbar instead of only the editor's
    #[serde(default)]
    pub scrollbar_global: bool,
    /// Scrollbar visibility mode
    #[serde(default)]
    pub scrollbar_visibility: ScrollbarVisibility,
    /// Scrollbar thickness in pixels (0 = host default)
    #[serde(default)]
    pub scrollbar_width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_scroll_enabled: default_true(),
            mouse_scroll_speed: default_mouse_scroll_speed(),
            mouse_scroll_smoothness: default_smoothness(),
            mouse_scroll_invert: false,
            center_cursor_enabled: default_true(),
            center_cursor_editing_distance: 0.0,
            center_cursor_moving_distance: 0.0,
            center_cursor_editing_smoothness: default_smoothness(),
            center_cursor_moving_smoothness: default_smoothness(),
            center_cursor_enable_mouse: false,
            scrollbar_global: false,
            scrollbar_visibility: ScrollbarVisibility::default(),
            scrollbar_width: 0.0,
        }
    }
}

/// When scrollbars are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollbarVisibility {
    /// Never
    Hide,
    /// Only while the view is scrolling
    Scroll,
    /// Always
    #[default]
    Show,
}

impl ScrollbarVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollbarVisibility::Hide => "hide",
            ScrollbarVisibility::Scroll => "scroll",
            ScrollbarVisibility::Show => "show",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_mouse_scroll_speed() -> f64 {
    1.0
}

fn default_smoothness() -> f64 {
    1.0
}

impl Settings {
    /// Load settings from the host store, merged over defaults
    pub async fn load(store: &dyn SettingsStore) -> Result<Self> {
        match store.load_data().await? {
            Some(data) => Ok(Self::merged(&data)),
            None => Ok(Self::default()),
        }
    }

    /// Save settings to the host store
    pub async fn save(&self, store: &dyn SettingsStore) -> Result<()> {
        let data = serde_json::to_value(self)?;
        store.save_data(&data).await
    }

    /// Merge persisted data over the defaults
    ///
    /// Unknown keys are ignored, missing keys keep their default, and a key
    /// whose value has the wrong type is skipped with a warning instead of
    /// discarding the whole object.
    pub fn merged(data: &Value) -> Self {
        let Some(object) = data.as_object() else {
            if !data.is_null() {
                warn!("Ignoring persisted settings: expected an object");
            }
            return Self::default();
        };

        let mut merged = Self::default();
        for def in SETTINGS {
            let Some(value) = object.get(def.key) else {
                continue;
            };
            if let Err(e) = merged.set_value(def.key, value.clone()) {
                warn!(key = def.key, error = %e, "Ignoring persisted setting");
            }
        }
        merged
    }

    /// Read a single setting as JSON
    pub fn get(&self, key: &str) -> Result<Value> {
        schema::find(key).ok_or_else(|| Error::UnknownSetting(key.to_string()))?;
        serde_json::to_value(self)?
            .get(key)
            .cloned()
            .ok_or_else(|| Error::UnknownSetting(key.to_string()))
    }

    /// Parse and set a single setting from user input
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let def = schema::find(key).ok_or_else(|| Error::UnknownSetting(key.to_string()))?;
        let value = def.control.parse(key, raw)?;
        self.set_value(key, value)
    }

    /// Set a single setting from a JSON value; the result is normalized
    pub fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        schema::find(key).ok_or_else(|| Error::UnknownSetting(key.to_string()))?;

        let mut data = serde_json::to_value(&*self)?;
        let object = data
            .as_object_mut()
            .ok_or_else(|| Error::Config("settings did not serialize to an object".to_string()))?;
        object.insert(key.to_string(), value);

        let updated: Settings = serde_json::from_value(data)?;
        *self = updated.normalized();
        Ok(())
    }

    /// Clamp numeric settings into their schema ranges
    ///
    /// Non-finite values fall back to the default.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.mouse_scroll_speed = clamp_setting(
            "mouse_scroll_speed",
            self.mouse_scroll_speed,
            defaults.mouse_scroll_speed,
        );
        self.mouse_scroll_smoothness = clamp_setting(
            "mouse_scroll_smoothness",
            self.mouse_scroll_smoothness,
            defaults.mouse_scroll_smoothness,
        );
        self.center_cursor_editing_distance = clamp_setting(
            "center_cursor_editing_distance",
            self.center_cursor_editing_distance,
            defaults.center_cursor_editing_distance,
        );
        self.center_cursor_moving_distance = clamp_setting(
            "center_cursor_moving_distance",
            self.center_cursor_moving_distance,
            defaults.center_cursor_moving_distance,
        );
        self.center_cursor_editing_smoothness = clamp_setting(
            "center_cursor_editing_smoothness",
            self.center_cursor_editing_smoothness,
            defaults.center_cursor_editing_smoothness,
        );
        self.center_cursor_moving_smoothness = clamp_setting(
            "center_cursor_moving_smoothness",
            self.center_cursor_moving_smoothness,
            defaults.center_cursor_moving_smoothness,
        );
        self.scrollbar_width =
            clamp_setting("scrollbar_width", self.scrollbar_width, defaults.scrollbar_width);
        self
    }
}

fn clamp_setting(key: &str, value: f64, default: f64) -> f64 {
    if !value.is_finite() {
        return default;
    }
    match schema::find(key) {
        Some(def) => def.control.clamp(value),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.mouse_scroll_enabled);
        assert!(settings.center_cursor_enabled);
        assert!(!settings.center_cursor_enable_mouse);
        assert_eq!(settings.center_cursor_editing_smoothness, 1.0);
        assert_eq!(settings.scrollbar_visibility, ScrollbarVisibility::Show);
    }

    #[test]
    fn test_merge_ignores_unknown_and_defaults_missing() {
        let settings = Settings::merged(&json!({
            "mouse_scroll_speed": 2.5,
            "scrollbar_visibility": "hide",
            "some_future_option": [1, 2, 3],
        }));
        assert_eq!(settings.mouse_scroll_speed, 2.5);
        assert_eq!(settings.scrollbar_visibility, ScrollbarVisibility::Hide);
        assert_eq!(settings.center_cursor_moving_smoothness, 1.0);
        assert!(settings.center_cursor_enabled);
    }

    #[test]
    fn test_merge_skips_mistyped_values() {
        let settings = Settings::merged(&json!({
            "center_cursor_enabled": "yes please",
            "center_cursor_moving_distance": 30,
        }));
        assert!(settings.center_cursor_enabled);
        assert_eq!(settings.center_cursor_moving_distance, 30.0);
    }

    #[test]
    fn test_merge_clamps_out_of_range() {
        let settings = Settings::merged(&json!({
            "center_cursor_editing_distance": 250,
            "scrollbar_width": -4,
        }));
        assert_eq!(settings.center_cursor_editing_distance, 100.0);
        assert_eq!(settings.scrollbar_width, 0.0);
    }

    #[test]
    fn test_merge_non_object() {
        assert_eq!(Settings::merged(&json!(null)), Settings::default());
        assert_eq!(Settings::merged(&json!("garbage")), Settings::default());
    }

    #[test]
    fn test_set_and_get() {
        let mut settings = Settings::default();
        settings.set("mouse_scroll_invert", "true").unwrap();
        settings.set("center_cursor_moving_smoothness", "4").unwrap();
        assert!(settings.mouse_scroll_invert);
        assert_eq!(settings.center_cursor_moving_smoothness, 4.0);
        assert_eq!(settings.get("mouse_scroll_invert").unwrap(), json!(true));
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("nope", "1"),
            Err(Error::UnknownSetting(_))
        ));
        assert!(matches!(
            settings.set("mouse_scroll_speed", "9000"),
            Err(Error::InvalidValue { .. })
        ));
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_load_save_round_trip_through_store() {
        let store = MemoryStore::default();
        assert_eq!(Settings::load(&store).await.unwrap(), Settings::default());

        let mut settings = Settings::default();
        settings.set("scrollbar_width", "8").unwrap();
        settings.save(&store).await.unwrap();

        let loaded = Settings::load(&store).await.unwrap();
        assert_eq!(loaded.scrollbar_width, 8.0);
        assert_eq!(store.save_count(), 1);
    }
}
