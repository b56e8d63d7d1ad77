//! Plugin lifecycle and signal dispatch
//!
//! [`ScrollingPlugin`] owns every piece of mutable state: settings,
//! interaction flags, the timer queue and both animations. The host is
//! borrowed per call, never stored, so tests and the CLI drive the plugin
//! against the simulated host and advance virtual time explicitly.

use std::collections::{BTreeSet, HashMap, HashSet};

use smoothscroll_core::style::{scrollbar_css, SCROLLING_CLASS, STYLE_ELEMENT_ID};
use smoothscroll_core::{
    Editor, EditorId, EventKind, EventOutcome, Host, HostEvent, Millis, ScrollbarVisibility,
    Settings, TimerId, TimerQueue,
};
use tracing::{debug, info};

use crate::scroll::timing::{SCROLLBAR_FADE_MS, SELECTION_SETTLE_MS};
use crate::scroll::{
    CenterAnimator, Classification, InteractionState, Motion, SelectionDecision, WheelSmoother,
};

/// Deferred work scheduled on the plugin's timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Evaluate a selection change once concurrent signals have settled
    SelectionSettle,
    /// Next centering animation step
    CenterStep,
    /// Next wheel animation frame
    WheelFrame,
    /// Hide the scrollbar of an editor that stopped scrolling
    ScrollbarFade(EditorId),
}

/// The scrolling plugin
#[derive(Debug)]
pub struct ScrollingPlugin {
    settings: Settings,
    state: InteractionState,
    timers: TimerQueue<Timer>,
    center: CenterAnimator,
    wheel: WheelSmoother,
    settle_timers: HashSet<TimerId>,
    fade_timers: HashMap<EditorId, TimerId>,
    subscriptions: BTreeSet<EventKind>,
    injected_css: Option<String>,
    loaded: bool,
}

impl ScrollingPlugin {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: settings.normalized(),
            state: InteractionState::new(),
            timers: TimerQueue::new(),
            center: CenterAnimator::new(),
            wheel: WheelSmoother::new(),
            settle_timers: HashSet::new(),
            fade_timers: HashMap::new(),
            subscriptions: BTreeSet::new(),
            injected_css: None,
            loaded: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current virtual time
    #[inline]
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_centering(&self) -> bool {
        self.center.is_animating()
    }

    pub fn is_wheel_scrolling(&self) -> bool {
        self.wheel.is_animating()
    }

    pub fn subscriptions(&self) -> &BTreeSet<EventKind> {
        &self.subscriptions
    }

    /// Subscribe to host signals and inject styling
    pub fn load<H: Host>(&mut self, host: &mut H) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.sync_subscriptions(host);
        self.sync_style(host);
        info!(
            subscriptions = self.subscriptions.len(),
            styled = self.injected_css.is_some(),
            "Plugin loaded"
        );
    }

    /// Tear down: no subscriptions, timers or styles survive this
    pub fn unload<H: Host>(&mut self, host: &mut H) {
        if !self.loaded {
            return;
        }

        for kind in std::mem::take(&mut self.subscriptions) {
            host.unsubscribe(kind);
        }

        self.center.cancel(&mut self.timers);
        self.wheel.cancel(&mut self.timers);
        self.settle_timers.clear();
        self.clear_scrolling_classes(host);
        self.timers.clear();

        if self.injected_css.take().is_some() {
            host.remove_style(STYLE_ELEMENT_ID);
        }

        self.state.reset();
        self.loaded = false;
        info!("Plugin unloaded");
    }

    /// Replace the settings and re-derive everything that depends on them
    pub fn apply_settings<H: Host>(&mut self, host: &mut H, settings: Settings) {
        self.settings = settings.normalized();
        if !self.loaded {
            return;
        }

        if !self.settings.center_cursor_enabled {
            self.center.cancel(&mut self.timers);
            for id in std::mem::take(&mut self.settle_timers) {
                self.timers.cancel(id);
            }
            self.state.reset();
        }
        if !self.settings.mouse_scroll_enabled {
            self.wheel.cancel(&mut self.timers);
        }
        if self.settings.scrollbar_visibility != ScrollbarVisibility::Scroll {
            self.clear_scrolling_classes(host);
        }

        self.sync_subscriptions(host);
        self.sync_style(host);
        debug!("Settings applied");
    }

    /// Dispatch one host signal
    pub fn handle<H: Host>(&mut self, host: &mut H, event: HostEvent) -> EventOutcome {
        if !self.loaded || !self.subscriptions.contains(&event.kind()) {
            return EventOutcome::PassThrough;
        }

        match event {
            HostEvent::Edit { editor } => {
                if let Classification::Recenter(motion) = self.state.on_edit() {
                    if let Some(editor) = host.editor(editor) {
                        self.recenter(editor, motion);
                    }
                }
                EventOutcome::PassThrough
            }
            HostEvent::MouseDown => {
                self.state.on_mouse_down();
                EventOutcome::PassThrough
            }
            HostEvent::MouseUp => {
                self.state
                    .on_mouse_up(self.settings.center_cursor_enable_mouse);
                EventOutcome::PassThrough
            }
            HostEvent::SelectionChange => {
                match self.state.on_selection_change() {
                    SelectionDecision::Ignore(reason) => {
                        debug!(?reason, "Selection change ignored");
                    }
                    SelectionDecision::Settle => {
                        // every change gets its own check
                        let id = self.timers.schedule(SELECTION_SETTLE_MS, Timer::SelectionSettle);
                        self.settle_timers.insert(id);
                    }
                }
                EventOutcome::PassThrough
            }
            HostEvent::Wheel { editor, delta_y } => {
                let Some(editor) = host.editor(editor) else {
                    return EventOutcome::PassThrough;
                };
                self.center.cancel(&mut self.timers);
                self.wheel
                    .scroll(editor, delta_y, &self.settings, &mut self.timers);
                EventOutcome::Consumed
            }
            HostEvent::Scroll { editor: id } => {
                if let Some(editor) = host.editor(id) {
                    editor.set_scroller_class(SCROLLING_CLASS, true);
                    if let Some(previous) = self.fade_timers.remove(&id) {
                        self.timers.cancel(previous);
                    }
                    let timer = self
                        .timers
                        .schedule(SCROLLBAR_FADE_MS, Timer::ScrollbarFade(id));
                    self.fade_timers.insert(id, timer);
                }
                EventOutcome::PassThrough
            }
        }
    }

    /// Advance virtual time by `ms`, firing every timer that comes due
    pub fn advance<H: Host>(&mut self, host: &mut H, ms: Millis) {
        let until = self.timers.now().saturating_add(ms);
        self.advance_to(host, until);
    }

    /// Advance virtual time to `until`, firing due timers in deadline order
    ///
    /// Timers scheduled while firing run in the same call when they come due
    /// before `until`.
    pub fn advance_to<H: Host>(&mut self, host: &mut H, until: Millis) {
        while let Some((id, timer)) = self.timers.pop_due(until) {
            self.fire(host, id, timer);
        }
        self.timers.set_now(until);
    }

    fn fire<H: Host>(&mut self, host: &mut H, id: TimerId, timer: Timer) {
        match timer {
            Timer::SelectionSettle => {
                if !self.settle_timers.remove(&id) {
                    return;
                }
                match self.state.settle(host) {
                    Classification::Recenter(motion) => {
                        if let Some(editor) = host.active_editor() {
                            self.recenter(editor, motion);
                        }
                    }
                    Classification::Ignored(reason) => {
                        debug!(?reason, "Settled selection change ignored");
                    }
                }
            }
            Timer::CenterStep => {
                if !self.center.owns(id) {
                    return;
                }
                let editor = match self.center.editor() {
                    Some(editor) => host.editor(editor),
                    None => None,
                };
                match editor {
                    Some(editor) => self.center.tick(editor, &mut self.timers),
                    None => self.center.cancel(&mut self.timers),
                }
            }
            Timer::WheelFrame => {
                if !self.wheel.owns(id) {
                    return;
                }
                let editor = match self.wheel.editor() {
                    Some(editor) => host.editor(editor),
                    None => None,
                };
                match editor {
                    Some(editor) => self.wheel.tick(editor, &mut self.timers),
                    None => self.wheel.cancel(&mut self.timers),
                }
            }
            Timer::ScrollbarFade(editor_id) => {
                if self.fade_timers.get(&editor_id) != Some(&id) {
                    return;
                }
                self.fade_timers.remove(&editor_id);
                if let Some(editor) = host.editor(editor_id) {
                    editor.set_scroller_class(SCROLLING_CLASS, false);
                }
            }
        }
    }

    fn recenter<E: Editor>(&mut self, editor: &mut E, motion: Motion) {
        let (dead_zone, smoothness) = match motion {
            Motion::Editing => (
                self.settings.center_cursor_editing_distance,
                self.settings.center_cursor_editing_smoothness,
            ),
            Motion::Navigating => (
                self.settings.center_cursor_moving_distance,
                self.settings.center_cursor_moving_smoothness,
            ),
        };

        if self
            .center
            .recenter(editor, dead_zone, smoothness, &mut self.timers)
        {
            self.wheel.cancel(&mut self.timers);
        }
    }

    fn wanted_subscriptions(&self) -> BTreeSet<EventKind> {
        let mut wanted = BTreeSet::new();
        if self.settings.center_cursor_enabled {
            wanted.extend([
                EventKind::Edit,
                EventKind::MouseDown,
                EventKind::MouseUp,
                EventKind::SelectionChange,
            ]);
        }
        if self.settings.mouse_scroll_enabled {
            wanted.insert(EventKind::Wheel);
        }
        if self.settings.scrollbar_visibility == ScrollbarVisibility::Scroll {
            wanted.insert(EventKind::Scroll);
        }
        wanted
    }

    fn sync_subscriptions<H: Host>(&mut self, host: &mut H) {
        let wanted = self.wanted_subscriptions();
        for kind in self.subscriptions.difference(&wanted) {
            host.unsubscribe(*kind);
        }
        for kind in wanted.difference(&self.subscriptions) {
            host.subscribe(*kind);
        }
        self.subscriptions = wanted;
    }

    fn sync_style<H: Host>(&mut self, host: &mut H) {
        let css = scrollbar_css(&self.settings);
        if css == self.injected_css {
            return;
        }
        match &css {
            Some(css) => host.inject_style(STYLE_ELEMENT_ID, css),
            None => host.remove_style(STYLE_ELEMENT_ID),
        }
        self.injected_css = css;
    }

    fn clear_scrolling_classes<H: Host>(&mut self, host: &mut H) {
        for (editor_id, timer) in std::mem::take(&mut self.fade_timers) {
            self.timers.cancel(timer);
            if let Some(editor) = host.editor(editor_id) {
                editor.set_scroller_class(SCROLLING_CLASS, false);
            }
        }
    }
}
