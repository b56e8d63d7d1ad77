//! Scripted replay against the simulated host
//!
//! A script is a JSON document describing one simulated editor and a list of
//! user actions. [`Replayer`] feeds the resulting host signals to a
//! [`ScrollingPlugin`], fires its timers one deadline at a time, and records
//! every change of the editor's scroll offset.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smoothscroll_core::{
    Editor, EditorId, Error, EventOutcome, HostEvent, Millis, Result, Settings,
};
use tracing::debug;

use crate::plugin::ScrollingPlugin;
use crate::sim::{SimEditor, SimHost};

/// The single editor every script runs in
pub const SCRIPT_EDITOR: EditorId = EditorId(1);

fn default_lines() -> usize {
    2000
}

fn default_line_height() -> f64 {
    20.0
}

fn default_viewport_height() -> f64 {
    800.0
}

/// Geometry of the simulated document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_lines")]
    pub lines: usize,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: default_lines(),
            line_height: default_line_height(),
            viewport_height: default_viewport_height(),
        }
    }
}

/// One user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Type `lines` newlines at the cursor
    Type {
        #[serde(default)]
        lines: usize,
    },
    /// Keyboard navigation
    Move { line: usize },
    /// Single click on a line
    Click { line: usize },
    /// Mouse drag selection
    Drag { from: usize, to: usize },
    /// Keyboard selection
    Select { from: usize, to: usize },
    /// One wheel tick; positive scrolls down
    Wheel { delta: f64 },
    /// Let virtual time pass
    Wait { ms: Millis },
    /// Focus leaves the editor
    Blur,
    /// Focus returns to the editor
    Focus,
    /// Change a setting mid-script
    Set { key: String, value: Value },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub document: Document,
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        let doc = &self.document;
        if doc.lines == 0 {
            return Err(Error::Config("document needs at least one line".to_string()));
        }
        if !(doc.line_height.is_finite() && doc.line_height > 0.0) {
            return Err(Error::Config("line_height must be positive".to_string()));
        }
        if !(doc.viewport_height.is_finite() && doc.viewport_height > 0.0) {
            return Err(Error::Config("viewport_height must be positive".to_string()));
        }

        for (index, step) in self.steps.iter().enumerate() {
            if let ScriptStep::Wheel { delta } = step {
                if !delta.is_finite() {
                    return Err(Error::Script {
                        step: index + 1,
                        reason: "wheel delta must be finite".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Total virtual time the script waits
    pub fn duration(&self) -> Millis {
        self.steps
            .iter()
            .map(|step| match step {
                ScriptStep::Wait { ms } => *ms,
                _ => 0,
            })
            .fold(0, Millis::saturating_add)
    }
}

/// A recorded scroll offset change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceEntry {
    /// Virtual time of the change
    pub at: Millis,
    pub scroll_top: f64,
}

/// Drives a plugin through a script
#[derive(Debug)]
pub struct Replayer {
    plugin: ScrollingPlugin,
    host: SimHost,
    trace: Vec<TraceEntry>,
    last_top: f64,
}

impl Replayer {
    pub fn new(settings: Settings, document: Document) -> Self {
        let editor = SimEditor::new(
            SCRIPT_EDITOR.0,
            document.lines,
            document.line_height,
            document.viewport_height,
        );
        let mut host = SimHost::with_editor(editor);
        let mut plugin = ScrollingPlugin::new(settings);
        plugin.load(&mut host);

        Self {
            plugin,
            host,
            trace: Vec::new(),
            last_top: 0.0,
        }
    }

    /// Replay a whole script and return its trace
    pub fn run(settings: Settings, script: &Script) -> Result<Vec<TraceEntry>> {
        let mut replayer = Self::new(settings, script.document);
        for (index, step) in script.steps.iter().enumerate() {
            replayer.apply(step).map_err(|e| Error::Script {
                step: index + 1,
                reason: e.to_string(),
            })?;
        }
        replayer.finish();
        Ok(replayer.trace)
    }

    pub fn plugin(&self) -> &ScrollingPlugin {
        &self.plugin
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Trace entries recorded since the last call
    pub fn drain_trace(&mut self) -> Vec<TraceEntry> {
        std::mem::take(&mut self.trace)
    }

    pub fn now(&self) -> Millis {
        self.plugin.now()
    }

    pub fn scroll_top(&self) -> f64 {
        self.host
            .editor_ref(SCRIPT_EDITOR)
            .map(|editor| editor.scroll_top())
            .unwrap_or_default()
    }

    pub fn apply(&mut self, step: &ScriptStep) -> Result<()> {
        debug!(?step, at = self.plugin.now(), "Replay step");
        let events = match step {
            ScriptStep::Type { lines } => self.host.type_lines(*lines),
            ScriptStep::Move { line } => self.host.move_cursor(*line),
            ScriptStep::Click { line } => self.host.click(*line),
            ScriptStep::Drag { from, to } => self.host.drag(*from, *to),
            ScriptStep::Select { from, to } => self.host.select(*from, *to),
            ScriptStep::Wheel { delta } => self.host.wheel(*delta),
            ScriptStep::Wait { ms } => {
                self.wait(*ms);
                return Ok(());
            }
            ScriptStep::Blur => {
                self.host.set_active(None);
                return Ok(());
            }
            ScriptStep::Focus => {
                self.host.set_active(Some(SCRIPT_EDITOR));
                return Ok(());
            }
            ScriptStep::Set { key, value } => {
                let mut settings = self.plugin.settings().clone();
                match value {
                    Value::String(raw) => settings.set(key, raw)?,
                    other => settings.set_value(key, other.clone())?,
                }
                self.plugin.apply_settings(&mut self.host, settings);
                return Ok(());
            }
        };
        self.dispatch(events);
        Ok(())
    }

    /// Let `ms` of virtual time pass, one timer deadline at a time
    pub fn wait(&mut self, ms: Millis) {
        let until = self.plugin.now().saturating_add(ms);
        while let Some(deadline) = self.plugin.next_deadline() {
            if deadline > until {
                break;
            }
            self.plugin.advance_to(&mut self.host, deadline);
            self.settle_scroll();
        }
        self.plugin.advance_to(&mut self.host, until);
    }

    /// Run every pending timer to completion
    pub fn finish(&mut self) {
        while let Some(deadline) = self.plugin.next_deadline() {
            self.plugin.advance_to(&mut self.host, deadline);
            self.settle_scroll();
        }
    }

    fn dispatch(&mut self, events: Vec<HostEvent>) {
        for event in events {
            let outcome = self.plugin.handle(&mut self.host, event);
            if let (EventOutcome::PassThrough, HostEvent::Wheel { editor, delta_y }) =
                (outcome, event)
            {
                self.host.default_wheel(editor, delta_y);
            }
        }
        self.settle_scroll();
    }

    /// Record a changed offset and tell the plugin the editor scrolled
    fn settle_scroll(&mut self) {
        let top = self.scroll_top();
        if top != self.last_top {
            self.last_top = top;
            self.trace.push(TraceEntry {
                at: self.plugin.now(),
                scroll_top: top,
            });
        }

        for event in self.host.take_scroll_events() {
            self.plugin.handle(&mut self.host, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use smoothscroll_core::style::SCROLLING_CLASS;

    use super::*;

    fn tops(trace: &[TraceEntry]) -> Vec<f64> {
        trace.iter().map(|entry| entry.scroll_top).collect()
    }

    #[test]
    fn test_parse_script() {
        let script = Script::parse(
            r#"{
                "document": { "lines": 500 },
                "steps": [
                    { "action": "move", "line": 60 },
                    { "action": "wait", "ms": 50 },
                    { "action": "set", "key": "mouse_scroll_speed", "value": 2 },
                    { "action": "blur" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.document.lines, 500);
        assert_eq!(script.document.line_height, 20.0);
        assert_eq!(script.steps[0], ScriptStep::Move { line: 60 });
        assert_eq!(script.steps[3], ScriptStep::Blur);
        assert_eq!(script.duration(), 50);
    }

    #[test]
    fn test_huge_waits_saturate() {
        let script = Script {
            document: Document::default(),
            steps: vec![
                ScriptStep::Move { line: 60 },
                ScriptStep::Wait { ms: 5 },
                ScriptStep::Wait { ms: Millis::MAX },
            ],
        };
        assert_eq!(script.duration(), Millis::MAX);

        let trace = Replayer::run(Settings::default(), &script).unwrap();
        assert!(!trace.is_empty());
        assert!(trace.iter().all(|entry| entry.at < Millis::MAX));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Script::parse(r#"{ "steps": [ { "action": "fly" } ] }"#).is_err());
        assert!(Script::parse(r#"{ "document": { "lines": 0 }, "steps": [] }"#).is_err());
    }

    #[test]
    fn test_navigation_trace() {
        let script = Script {
            document: Document::default(),
            steps: vec![
                ScriptStep::Move { line: 25 },
                ScriptStep::Wait { ms: 100 },
            ],
        };
        let trace = Replayer::run(Settings::default(), &script).unwrap();
        assert_eq!(tops(&trace), vec![20.0, 40.0, 60.0, 80.0, 100.0]);
        let times: Vec<Millis> = trace.iter().map(|entry| entry.at).collect();
        assert_eq!(times, vec![10, 15, 20, 25, 30]);
    }

    #[test]
    fn test_click_leaves_view_alone() {
        let script = Script {
            document: Document::default(),
            steps: vec![ScriptStep::Click { line: 35 }, ScriptStep::Wait { ms: 100 }],
        };
        assert!(Replayer::run(Settings::default(), &script)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_wheel_falls_back_to_host_when_disabled() {
        let mut replayer = Replayer::new(Settings::default(), Document::default());
        replayer
            .apply(&ScriptStep::Set {
                key: "mouse_scroll_enabled".to_string(),
                value: Value::Bool(false),
            })
            .unwrap();
        replayer.apply(&ScriptStep::Wheel { delta: 120.0 }).unwrap();
        assert_eq!(replayer.scroll_top(), 120.0);
        assert_eq!(tops(replayer.trace()), vec![120.0]);
    }

    #[test]
    fn test_scroll_class_fades() {
        let mut replayer = Replayer::new(Settings::default(), Document::default());
        replayer
            .apply(&ScriptStep::Set {
                key: "scrollbar_visibility".to_string(),
                value: Value::String("scroll".to_string()),
            })
            .unwrap();
        replayer.apply(&ScriptStep::Wheel { delta: 200.0 }).unwrap();
        replayer.wait(150);
        let editor = replayer.host().editor_ref(SCRIPT_EDITOR).unwrap();
        assert!(editor.has_class(SCROLLING_CLASS));

        replayer.finish();
        let editor = replayer.host().editor_ref(SCRIPT_EDITOR).unwrap();
        assert!(!editor.has_class(SCROLLING_CLASS));
        assert_eq!(replayer.scroll_top(), 200.0);
        assert_eq!(replayer.plugin().pending_timers(), 0);
    }

    #[test]
    fn test_blur_before_settle() {
        let mut replayer = Replayer::new(Settings::default(), Document::default());
        replayer.apply(&ScriptStep::Move { line: 80 }).unwrap();
        replayer.apply(&ScriptStep::Blur).unwrap();
        replayer.wait(100);
        assert!(replayer.trace().is_empty());

        replayer.apply(&ScriptStep::Focus).unwrap();
        replayer.apply(&ScriptStep::Move { line: 81 }).unwrap();
        replayer.wait(100);
        assert_eq!(replayer.scroll_top(), 1220.0);
    }

    #[test]
    fn test_unknown_setting_reports_step() {
        let script = Script {
            document: Document::default(),
            steps: vec![
                ScriptStep::Wait { ms: 1 },
                ScriptStep::Set {
                    key: "nope".to_string(),
                    value: Value::Bool(true),
                },
            ],
        };
        let err = Replayer::run(Settings::default(), &script).unwrap_err();
        assert!(matches!(err, Error::Script { step: 2, .. }));
    }
}
