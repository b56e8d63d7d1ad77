//! Ports the plugin needs from the host application
//!
//! The plugin never talks to a concrete editor. Everything it reads or writes
//! goes through these traits, which the real host (or the simulated one used
//! in tests and the CLI) implements.

/// Stable identifier of an open document editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub u64);

/// Screen coordinates of the cursor line, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub top: f64,
    pub bottom: f64,
}

/// Vertical bounds of the editor viewport on screen, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn midpoint(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// A document editor view
pub trait Editor {
    fn id(&self) -> EditorId;

    /// Current vertical scroll offset
    fn scroll_top(&self) -> f64;

    fn set_scroll_top(&mut self, top: f64);

    /// Largest valid scroll offset
    fn max_scroll_top(&self) -> f64;

    /// Screen coordinates of the cursor, `None` while layout is not ready
    fn cursor_coords(&self) -> Option<Coords>;

    /// Screen bounds of the scrolled viewport
    fn viewport(&self) -> Option<Rect>;

    /// Whether the main selection is non-empty
    fn has_selection(&self) -> bool;

    /// Add or remove a CSS class on the editor's scroll container
    fn set_scroller_class(&mut self, class: &str, enabled: bool);
}

/// Kinds of host signals the plugin can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Edit,
    MouseDown,
    MouseUp,
    SelectionChange,
    Wheel,
    Scroll,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Edit,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::SelectionChange,
        EventKind::Wheel,
        EventKind::Scroll,
    ];
}

/// A signal delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The document of `editor` changed
    Edit { editor: EditorId },
    MouseDown,
    MouseUp,
    /// Cursor or selection moved, for any reason
    SelectionChange,
    /// Mouse wheel over `editor`
    Wheel { editor: EditorId, delta_y: f64 },
    /// The scroll container of `editor` scrolled
    Scroll { editor: EditorId },
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Edit { .. } => EventKind::Edit,
            HostEvent::MouseDown => EventKind::MouseDown,
            HostEvent::MouseUp => EventKind::MouseUp,
            HostEvent::SelectionChange => EventKind::SelectionChange,
            HostEvent::Wheel { .. } => EventKind::Wheel,
            HostEvent::Scroll { .. } => EventKind::Scroll,
        }
    }
}

/// Whether the host should still run its default handling for a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Consumed,
    PassThrough,
}

/// Access to the host's open editors
pub trait Workspace {
    type Editor: Editor;

    /// The focused document editor, if any
    fn active_editor(&mut self) -> Option<&mut Self::Editor>;

    fn editor(&mut self, id: EditorId) -> Option<&mut Self::Editor>;
}

/// Subscription to host signals
pub trait EventPort {
    fn subscribe(&mut self, kind: EventKind);
    fn unsubscribe(&mut self, kind: EventKind);
}

/// Injection of identifiable style blocks into the host document
pub trait StyleSink {
    /// Insert or replace the style element `id`
    fn inject_style(&mut self, id: &str, css: &str);
    fn remove_style(&mut self, id: &str);
}

/// Everything the plugin needs from its host
pub trait Host: Workspace + EventPort + StyleSink {}

impl<T: Workspace + EventPort + StyleSink> Host for T {}
