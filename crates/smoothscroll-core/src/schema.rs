//! Settings schema
//!
//! One entry per persisted setting. The preferences panel is generated from
//! this table, the CLI parses `settings set` input through it, and numeric
//! values are clamped into the slider ranges when settings are loaded.

use serde_json::Value;

use crate::{Error, Result};

/// Group a setting is listed under in the preferences panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    MouseWheel,
    CenterCursor,
    Scrollbar,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::MouseWheel => "Mouse wheel",
            Section::CenterCursor => "Center cursor",
            Section::Scrollbar => "Scrollbar",
        }
    }
}

/// How a setting is edited
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Toggle,
    Slider { min: f64, max: f64, step: f64 },
    Dropdown { options: &'static [&'static str] },
}

impl Control {
    /// Clamp a numeric value into the slider range; other controls pass through
    pub fn clamp(&self, value: f64) -> f64 {
        match self {
            Control::Slider { min, max, .. } => value.clamp(*min, *max),
            _ => value,
        }
    }

    /// Parse user input into the JSON value stored under `key`
    pub fn parse(&self, key: &str, raw: &str) -> Result<Value> {
        let raw = raw.trim();
        let invalid = |reason: String| Error::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason,
        };

        match self {
            Control::Toggle => match raw.to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "off" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(invalid("expected true or false".to_string())),
            },
            Control::Slider { min, max, .. } => {
                let number: f64 = raw
                    .parse()
                    .map_err(|_| invalid("expected a number".to_string()))?;
                if !number.is_finite() || number < *min || number > *max {
                    return Err(invalid(format!("expected a number between {} and {}", min, max)));
                }
                serde_json::Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| invalid("expected a finite number".to_string()))
            }
            Control::Dropdown { options } => {
                let lowered = raw.to_ascii_lowercase();
                if options.contains(&lowered.as_str()) {
                    Ok(Value::String(lowered))
                } else {
                    Err(invalid(format!("expected one of: {}", options.join(", "))))
                }
            }
        }
    }
}

/// A single entry of the settings schema
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub section: Section,
    pub control: Control,
}

pub const SCROLLBAR_VISIBILITY_OPTIONS: &[&str] = &["hide", "scroll", "show"];

pub const SETTINGS: &[SettingDef] = &[
    SettingDef {
        key: "mouse_scroll_enabled",
        name: "Smooth wheel scrolling",
        description: "Animate mouse wheel scrolling inside the editor",
        section: Section::MouseWheel,
        control: Control::Toggle,
    },
    SettingDef {
        key: "mouse_scroll_speed",
        name: "Wheel speed",
        description: "Multiplier applied to every wheel step",
        section: Section::MouseWheel,
        control: Control::Slider { min: 0.1, max: 5.0, step: 0.1 },
    },
    SettingDef {
        key: "mouse_scroll_smoothness",
        name: "Wheel smoothness",
        description: "Length of the wheel animation (0 disables easing)",
        section: Section::MouseWheel,
        control: Control::Slider { min: 0.0, max: 5.0, step: 0.1 },
    },
    SettingDef {
        key: "mouse_scroll_invert",
        name: "Invert wheel",
        description: "Reverse the wheel scroll direction",
        section: Section::MouseWheel,
        control: Control::Toggle,
    },
    SettingDef {
        key: "center_cursor_enabled",
        name: "Center cursor",
        description: "Keep the text cursor near the middle of the viewport",
        section: Section::CenterCursor,
        control: Control::Toggle,
    },
    SettingDef {
        key: "center_cursor_editing_distance",
        name: "Dead zone while editing",
        description: "Percent of half the viewport the cursor may drift while typing",
        section: Section::CenterCursor,
        control: Control::Slider { min: 0.0, max: 100.0, step: 1.0 },
    },
    SettingDef {
        key: "center_cursor_moving_distance",
        name: "Dead zone while navigating",
        description: "Percent of half the viewport the cursor may drift while moving",
        section: Section::CenterCursor,
        control: Control::Slider { min: 0.0, max: 100.0, step: 1.0 },
    },
    SettingDef {
        key: "center_cursor_editing_smoothness",
        name: "Smoothness while editing",
        description: "Animation steps used when typing re-centers (0 jumps)",
        section: Section::CenterCursor,
        control: Control::Slider { min: 0.0, max: 5.0, step: 0.1 },
    },
    SettingDef {
        key: "center_cursor_moving_smoothness",
        name: "Smoothness while navigating",
        description: "Animation steps used when navigation re-centers (0 jumps)",
        section: Section::CenterCursor,
        control: Control::Slider { min: 0.0, max: 5.0, step: 0.1 },
    },
    SettingDef {
        key: "center_cursor_enable_mouse",
        name: "Center on click",
        description: "Also re-center when the cursor is placed with the mouse",
        section: Section::CenterCursor,
        control: Control::Toggle,
    },
    SettingDef {
        key: "scrollbar_global",
        name: "Style all scrollbars",
        description: "Apply scrollbar styling everywhere, not only in the editor",
        section: Section::Scrollbar,
        control: Control::Toggle,
    },
    SettingDef {
        key: "scrollbar_visibility",
        name: "Scrollbar visibility",
        description: "Hide scrollbars, show them while scrolling, or always show them",
        section: Section::Scrollbar,
        control: Control::Dropdown { options: SCROLLBAR_VISIBILITY_OPTIONS },
    },
    SettingDef {
        key: "scrollbar_width",
        name: "Scrollbar width",
        description: "Thickness in pixels (0 keeps the host default)",
        section: Section::Scrollbar,
        control: Control::Slider { min: 0.0, max: 30.0, step: 1.0 },
    },
];

/// Look up a setting by its persisted key
pub fn find(key: &str) -> Option<&'static SettingDef> {
    SETTINGS.iter().find(|def| def.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_unique() {
        for (i, def) in SETTINGS.iter().enumerate() {
            assert!(
                SETTINGS[i + 1..].iter().all(|other| other.key != def.key),
                "duplicate key {}",
                def.key
            );
        }
    }

    #[test]
    fn test_parse_toggle() {
        let control = Control::Toggle;
        assert_eq!(control.parse("k", "on").unwrap(), Value::Bool(true));
        assert_eq!(control.parse("k", " False ").unwrap(), Value::Bool(false));
        assert!(control.parse("k", "maybe").is_err());
    }

    #[test]
    fn test_parse_slider_range() {
        let control = find("center_cursor_editing_distance").unwrap().control;
        assert_eq!(control.parse("k", "40").unwrap().as_f64(), Some(40.0));
        assert!(control.parse("k", "101").is_err());
        assert!(control.parse("k", "-1").is_err());
        assert!(control.parse("k", "NaN").is_err());
        assert!(control.parse("k", "wide").is_err());
    }

    #[test]
    fn test_parse_dropdown() {
        let control = find("scrollbar_visibility").unwrap().control;
        assert_eq!(
            control.parse("k", "Scroll").unwrap(),
            Value::String("scroll".to_string())
        );
        assert!(control.parse("k", "sometimes").is_err());
    }

    #[test]
    fn test_clamp() {
        let control = find("scrollbar_width").unwrap().control;
        assert_eq!(control.clamp(99.0), 30.0);
        assert_eq!(control.clamp(-3.0), 0.0);
        assert_eq!(Control::Toggle.clamp(7.0), 7.0);
    }
}
