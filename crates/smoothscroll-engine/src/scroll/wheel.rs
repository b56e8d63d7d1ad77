//! Mouse wheel smoothing
//!
//! Wheel input moves a target offset; the view eases toward it one frame at
//! a time. Input that arrives mid-flight retargets the running animation from
//! wherever the view currently is, so rapid wheel ticks accumulate instead of
//! restarting from the old target.

use smoothscroll_core::{Editor, EditorId, Millis, Settings, TimerId, TimerQueue};
use tracing::debug;

use super::easing::ease_out_cubic;
use super::timing::{lerp, progress, wheel_duration, WHEEL_FRAME_MS};
use crate::plugin::Timer;

/// Active wheel animation state
#[derive(Debug, Clone, Copy, PartialEq)]
struct WheelAnimation {
    editor: EditorId,
    /// Animation start time
    start: Millis,
    /// Starting scroll position
    from: f64,
    /// Target scroll position
    to: f64,
    /// Animation duration
    duration: Millis,
}

/// Smooths wheel scrolling for one editor at a time
#[derive(Debug, Default)]
pub struct WheelSmoother {
    animation: Option<WheelAnimation>,
    timer: Option<TimerId>,
}

impl WheelSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Editor of the running animation
    pub fn editor(&self) -> Option<EditorId> {
        self.animation.map(|a| a.editor)
    }

    /// Final position of the running animation
    pub fn target(&self) -> Option<f64> {
        self.animation.map(|a| a.to)
    }

    /// Whether `id` is this smoother's pending frame
    #[inline]
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Handle one wheel signal over `editor`
    pub fn scroll<E: Editor>(
        &mut self,
        editor: &mut E,
        delta_y: f64,
        settings: &Settings,
        timers: &mut TimerQueue<Timer>,
    ) {
        let direction = if settings.mouse_scroll_invert { -1.0 } else { 1.0 };
        let amount = delta_y * settings.mouse_scroll_speed * direction;

        let base = match self.animation {
            Some(animation) if animation.editor == editor.id() => animation.to,
            _ => editor.scroll_top(),
        };
        let target = (base + amount).clamp(0.0, editor.max_scroll_top().max(0.0));

        let duration = wheel_duration(settings.mouse_scroll_smoothness);
        if duration == 0 {
            self.cancel(timers);
            editor.set_scroll_top(target);
            return;
        }

        debug!(editor = editor.id().0, from = editor.scroll_top(), to = target, "Wheel scroll");
        self.animation = Some(WheelAnimation {
            editor: editor.id(),
            start: timers.now(),
            from: editor.scroll_top(),
            to: target,
            duration,
        });
        if self.timer.is_none() {
            self.timer = Some(timers.schedule(WHEEL_FRAME_MS, Timer::WheelFrame));
        }
    }

    /// Apply the current frame and schedule the next one
    pub fn tick<E: Editor>(&mut self, editor: &mut E, timers: &mut TimerQueue<Timer>) {
        self.timer = None;
        let Some(animation) = self.animation else {
            return;
        };

        let t = progress(animation.start, timers.now(), animation.duration);
        if t >= 1.0 {
            editor.set_scroll_top(animation.to);
            self.animation = None;
            return;
        }

        editor.set_scroll_top(lerp(animation.from, animation.to, ease_out_cubic(t)));
        self.timer = Some(timers.schedule(WHEEL_FRAME_MS, Timer::WheelFrame));
    }

    /// Stop the running animation where it is
    pub fn cancel(&mut self, timers: &mut TimerQueue<Timer>) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimEditor;

    fn settings(speed: f64, smoothness: f64, invert: bool) -> Settings {
        Settings {
            mouse_scroll_speed: speed,
            mouse_scroll_smoothness: smoothness,
            mouse_scroll_invert: invert,
            ..Default::default()
        }
    }

    fn run_to_end(
        smoother: &mut WheelSmoother,
        editor: &mut SimEditor,
        timers: &mut TimerQueue<Timer>,
    ) {
        while let Some((id, _)) = timers.pop_due(u64::MAX) {
            if smoother.owns(id) {
                smoother.tick(editor, timers);
            }
        }
    }

    #[test]
    fn test_instant_when_not_smooth() {
        let mut editor = SimEditor::new(1, 1000, 20.0, 800.0);
        let mut timers = TimerQueue::new();
        let mut smoother = WheelSmoother::new();

        smoother.scroll(&mut editor, 100.0, &settings(2.0, 0.0, false), &mut timers);
        assert_eq!(editor.scroll_top(), 200.0);
        assert!(!smoother.is_animating());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_eases_to_target() {
        let mut editor = SimEditor::new(1, 1000, 20.0, 800.0);
        let mut timers = TimerQueue::new();
        let mut smoother = WheelSmoother::new();

        smoother.scroll(&mut editor, 120.0, &settings(1.0, 1.0, false), &mut timers);
        assert!(smoother.is_animating());
        assert_eq!(editor.scroll_top(), 0.0);

        run_to_end(&mut smoother, &mut editor, &mut timers);
        assert_eq!(editor.scroll_top(), 120.0);
        let writes = editor.scroll_writes();
        assert!(writes.len() > 2);
        assert!(writes.windows(2).all(|w| w[1] >= w[0]));
        assert!(timers.now() >= 100);
    }

    #[test]
    fn test_invert() {
        let mut editor = SimEditor::new(1, 1000, 20.0, 800.0);
        editor.scroll_to(500.0);
        let mut timers = TimerQueue::new();
        let mut smoother = WheelSmoother::new();

        smoother.scroll(&mut editor, 100.0, &settings(1.0, 0.0, true), &mut timers);
        assert_eq!(editor.scroll_top(), 400.0);
    }

    #[test]
    fn test_accumulates_mid_flight() {
        let mut editor = SimEditor::new(1, 1000, 20.0, 800.0);
        let mut timers = TimerQueue::new();
        let mut smoother = WheelSmoother::new();
        let s = settings(1.0, 1.0, false);

        smoother.scroll(&mut editor, 100.0, &s, &mut timers);
        smoother.scroll(&mut editor, 100.0, &s, &mut timers);
        assert_eq!(smoother.target(), Some(200.0));
        assert_eq!(timers.len(), 1);

        run_to_end(&mut smoother, &mut editor, &mut timers);
        assert_eq!(editor.scroll_top(), 200.0);
    }

    #[test]
    fn test_clamps_to_document() {
        let mut editor = SimEditor::new(1, 50, 20.0, 800.0);
        let mut timers = TimerQueue::new();
        let mut smoother = WheelSmoother::new();

        smoother.scroll(&mut editor, 5000.0, &settings(1.0, 1.0, false), &mut timers);
        assert_eq!(smoother.target(), Some(200.0));
        smoother.scroll(&mut editor, -9000.0, &settings(1.0, 1.0, false), &mut timers);
        assert_eq!(smoother.target(), Some(0.0));
    }

    #[test]
    fn test_cancel() {
        let mut editor = SimEditor::new(1, 1000, 20.0, 800.0);
        let mut timers = TimerQueue::new();
        let mut smoother = WheelSmoother::new();

        smoother.scroll(&mut editor, 100.0, &settings(1.0, 1.0, false), &mut timers);
        smoother.cancel(&mut timers);
        assert!(!smoother.is_animating());
        assert!(timers.is_empty());
    }
}
