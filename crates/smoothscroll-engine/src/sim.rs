//! Simulated host
//!
//! A line-based stand-in for the host's editors with fixed line height. The
//! user-level helpers (`type_lines`, `click`, ...) update the simulated
//! document and return the host signals a real editor would fire for that
//! action, in the order it would fire them.

use std::collections::{BTreeMap, BTreeSet};

use smoothscroll_core::{
    Coords, Editor, EditorId, EventKind, EventPort, HostEvent, Rect, StyleSink, Workspace,
};

/// A simulated document editor
#[derive(Debug, Clone)]
pub struct SimEditor {
    id: EditorId,
    line_count: usize,
    line_height: f64,
    viewport: Rect,
    scroll_top: f64,
    cursor_line: usize,
    anchor_line: Option<usize>,
    layout_ready: bool,
    classes: BTreeSet<String>,
    writes: Vec<f64>,
    scrolled: bool,
}

impl SimEditor {
    /// Editor whose viewport starts at the top of the screen
    pub fn new(id: u64, line_count: usize, line_height: f64, viewport_height: f64) -> Self {
        Self {
            id: EditorId(id),
            line_count: line_count.max(1),
            line_height,
            viewport: Rect {
                top: 0.0,
                bottom: viewport_height,
            },
            scroll_top: 0.0,
            cursor_line: 0,
            anchor_line: None,
            layout_ready: true,
            classes: BTreeSet::new(),
            writes: Vec::new(),
            scrolled: false,
        }
    }

    /// Move the viewport down the screen (e.g. below a title bar)
    pub fn with_viewport_top(mut self, top: f64) -> Self {
        let height = self.viewport.height();
        self.viewport = Rect {
            top,
            bottom: top + height,
        };
        self
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Place the cursor, collapsing any selection
    pub fn set_cursor(&mut self, line: usize) {
        self.cursor_line = line.min(self.line_count - 1);
        self.anchor_line = None;
    }

    /// Select from `anchor` to `head`; the cursor sits at `head`
    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        self.anchor_line = Some(anchor.min(self.line_count - 1));
        self.cursor_line = head.min(self.line_count - 1);
    }

    /// Insert `count` lines after the cursor and move onto the last of them
    pub fn insert_lines(&mut self, count: usize) {
        self.line_count += count;
        self.set_cursor(self.cursor_line + count);
    }

    pub fn set_layout_ready(&mut self, ready: bool) {
        self.layout_ready = ready;
    }

    /// Host-side scroll that does not go through the plugin and is not
    /// recorded as a plugin write
    pub fn scroll_to(&mut self, top: f64) {
        self.scroll_top = top.clamp(0.0, self.max_scroll_top());
    }

    /// Every scroll offset written through [`Editor::set_scroll_top`]
    pub fn scroll_writes(&self) -> &[f64] {
        &self.writes
    }

    /// Whether the scroll offset changed since the last call
    pub fn take_scrolled(&mut self) -> bool {
        std::mem::take(&mut self.scrolled)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

impl Editor for SimEditor {
    fn id(&self) -> EditorId {
        self.id
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        let top = top.clamp(0.0, self.max_scroll_top());
        if top != self.scroll_top {
            self.scrolled = true;
        }
        self.scroll_top = top;
        self.writes.push(top);
    }

    fn max_scroll_top(&self) -> f64 {
        (self.line_count as f64 * self.line_height - self.viewport.height()).max(0.0)
    }

    fn cursor_coords(&self) -> Option<Coords> {
        if !self.layout_ready {
            return None;
        }
        let top = self.viewport.top + self.cursor_line as f64 * self.line_height - self.scroll_top;
        Some(Coords {
            top,
            bottom: top + self.line_height,
        })
    }

    fn viewport(&self) -> Option<Rect> {
        self.layout_ready.then_some(self.viewport)
    }

    fn has_selection(&self) -> bool {
        self.anchor_line.is_some_and(|anchor| anchor != self.cursor_line)
    }

    fn set_scroller_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}

/// A simulated host workspace
#[derive(Debug, Clone, Default)]
pub struct SimHost {
    editors: Vec<SimEditor>,
    active: Option<EditorId>,
    subscriptions: BTreeSet<EventKind>,
    styles: BTreeMap<String, String>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with one focused editor
    pub fn with_editor(editor: SimEditor) -> Self {
        let mut host = Self::new();
        host.active = Some(editor.id());
        host.editors.push(editor);
        host
    }

    pub fn add_editor(&mut self, editor: SimEditor) {
        self.editors.push(editor);
    }

    /// Focus an editor, or nothing
    pub fn set_active(&mut self, id: Option<EditorId>) {
        self.active = id;
    }

    pub fn editor_ref(&self, id: EditorId) -> Option<&SimEditor> {
        self.editors.iter().find(|e| e.id == id)
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    pub fn subscriptions(&self) -> &BTreeSet<EventKind> {
        &self.subscriptions
    }

    pub fn style(&self, id: &str) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    /// Type `lines` newlines at the cursor (0 types on the current line)
    pub fn type_lines(&mut self, lines: usize) -> Vec<HostEvent> {
        let Some(editor) = self.active_editor() else {
            return Vec::new();
        };
        editor.insert_lines(lines);
        let id = editor.id();
        vec![HostEvent::Edit { editor: id }, HostEvent::SelectionChange]
    }

    /// Keyboard navigation to `line`
    pub fn move_cursor(&mut self, line: usize) -> Vec<HostEvent> {
        let Some(editor) = self.active_editor() else {
            return Vec::new();
        };
        editor.set_cursor(line);
        vec![HostEvent::SelectionChange]
    }

    /// Keyboard selection from `anchor` to `head`
    pub fn select(&mut self, anchor: usize, head: usize) -> Vec<HostEvent> {
        let Some(editor) = self.active_editor() else {
            return Vec::new();
        };
        editor.set_selection(anchor, head);
        vec![HostEvent::SelectionChange]
    }

    /// Single click placing the cursor on `line`
    ///
    /// The selection change arrives after the button is released.
    pub fn click(&mut self, line: usize) -> Vec<HostEvent> {
        let Some(editor) = self.active_editor() else {
            return Vec::new();
        };
        editor.set_cursor(line);
        vec![
            HostEvent::MouseDown,
            HostEvent::MouseUp,
            HostEvent::SelectionChange,
        ]
    }

    /// Mouse drag selecting from `anchor` to `head`
    pub fn drag(&mut self, anchor: usize, head: usize) -> Vec<HostEvent> {
        let Some(editor) = self.active_editor() else {
            return Vec::new();
        };
        editor.set_cursor(anchor);
        let mut events = vec![HostEvent::MouseDown, HostEvent::SelectionChange];
        editor.set_selection(anchor, head);
        events.extend([
            HostEvent::SelectionChange,
            HostEvent::MouseUp,
            HostEvent::SelectionChange,
        ]);
        events
    }

    /// Wheel over the focused editor
    pub fn wheel(&mut self, delta_y: f64) -> Vec<HostEvent> {
        match self.active {
            Some(editor) => vec![HostEvent::Wheel { editor, delta_y }],
            None => Vec::new(),
        }
    }

    /// Default wheel handling for a signal the plugin passed through
    pub fn default_wheel(&mut self, id: EditorId, delta_y: f64) {
        if let Some(editor) = self.editor(id) {
            let top = editor.scroll_top() + delta_y;
            editor.scroll_to(top);
            editor.scrolled = true;
        }
    }

    /// Scroll signals for every editor whose offset changed
    pub fn take_scroll_events(&mut self) -> Vec<HostEvent> {
        self.editors
            .iter_mut()
            .filter_map(|editor| {
                editor
                    .take_scrolled()
                    .then_some(HostEvent::Scroll { editor: editor.id })
            })
            .collect()
    }
}

impl Workspace for SimHost {
    type Editor = SimEditor;

    fn active_editor(&mut self) -> Option<&mut SimEditor> {
        let id = self.active?;
        self.editor(id)
    }

    fn editor(&mut self, id: EditorId) -> Option<&mut SimEditor> {
        self.editors.iter_mut().find(|e| e.id == id)
    }
}

impl EventPort for SimHost {
    fn subscribe(&mut self, kind: EventKind) {
        self.subscriptions.insert(kind);
    }

    fn unsubscribe(&mut self, kind: EventKind) {
        self.subscriptions.remove(&kind);
    }
}

impl StyleSink for SimHost {
    fn inject_style(&mut self, id: &str, css: &str) {
        self.styles.insert(id.to_string(), css.to_string());
    }

    fn remove_style(&mut self, id: &str) {
        self.styles.remove(id);
    }
}
