//! Cursor centering animation
//!
//! Computes the scroll offset that puts the cursor on the viewport midpoint
//! and walks toward it in equal steps, one every [`CENTER_STEP_MS`]. The
//! first step is applied as soon as the animation starts, so a smoothness of
//! zero is a single immediate jump.

use smoothscroll_core::{Editor, EditorId, TimerId, TimerQueue};
use tracing::debug;

use super::timing::{step_count, CENTER_STEP_MS};
use crate::plugin::Timer;

/// Planned centering animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterAnimation {
    /// Editor being scrolled
    pub editor: EditorId,
    /// Final scroll offset
    pub destination: f64,
    /// Scroll distance covered by each step
    pub step: f64,
    /// Steps still to apply
    pub remaining: u32,
}

impl CenterAnimation {
    /// Plan a re-center from the editor's current geometry
    ///
    /// Returns `None` when the cursor or viewport is unavailable, or when the
    /// cursor already sits inside the dead zone.
    pub fn plan<E: Editor>(editor: &E, dead_zone_percent: f64, smoothness: f64) -> Option<Self> {
        let viewport = editor.viewport()?;
        let cursor = editor.cursor_coords()?;

        let offset = cursor.top - viewport.midpoint();
        if !offset.is_finite() {
            return None;
        }
        if offset.abs() <= dead_zone_radius(dead_zone_percent, viewport.height()) {
            return None;
        }

        let steps = step_count(smoothness);
        Some(Self {
            editor: editor.id(),
            destination: editor.scroll_top() + offset,
            step: offset / steps as f64,
            remaining: steps,
        })
    }

    /// Scroll offset for the next step, consuming it
    pub fn advance(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        let top = self.destination - self.step * (self.remaining - 1) as f64;
        self.remaining -= 1;
        Some(top)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

/// Cursor displacement tolerated around the midpoint, in pixels
///
/// `percent` of half the viewport height.
#[inline]
pub fn dead_zone_radius(percent: f64, viewport_height: f64) -> f64 {
    let percent = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    percent / 100.0 * viewport_height.max(0.0) / 2.0
}

/// Runs at most one centering animation at a time
#[derive(Debug, Default)]
pub struct CenterAnimator {
    animation: Option<CenterAnimation>,
    timer: Option<TimerId>,
}

impl CenterAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&CenterAnimation> {
        self.animation.as_ref()
    }

    /// Editor of the running animation
    pub fn editor(&self) -> Option<EditorId> {
        self.animation.map(|a| a.editor)
    }

    /// Whether `id` is this animator's pending step
    #[inline]
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Re-center `editor`, preempting any running animation
    ///
    /// Returns `false` without touching anything when there is nothing to do.
    pub fn recenter<E: Editor>(
        &mut self,
        editor: &mut E,
        dead_zone_percent: f64,
        smoothness: f64,
        timers: &mut TimerQueue<Timer>,
    ) -> bool {
        let Some(plan) = CenterAnimation::plan(editor, dead_zone_percent, smoothness) else {
            debug!(editor = editor.id().0, "Centering skipped: no geometry or inside dead zone");
            return false;
        };

        self.cancel(timers);
        debug!(
            editor = plan.editor.0,
            destination = plan.destination,
            steps = plan.remaining,
            "Centering cursor"
        );
        self.animation = Some(plan);
        self.tick(editor, timers);
        true
    }

    /// Apply the next step and schedule the one after it
    pub fn tick<E: Editor>(&mut self, editor: &mut E, timers: &mut TimerQueue<Timer>) {
        self.timer = None;
        let Some(animation) = self.animation.as_mut() else {
            return;
        };

        if let Some(top) = animation.advance() {
            editor.set_scroll_top(top);
        }

        if animation.is_finished() {
            self.animation = None;
        } else {
            self.timer = Some(timers.schedule(CENTER_STEP_MS, Timer::CenterStep));
        }
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

    /// 800px viewport at the top of the screen, 20px lines, scrolled to 0
    fn editor_with_cursor_at(line: usize) -> SimEditor {
        let mut editor = SimEditor::new(1, 1000, 20.0, 800.0);
        editor.set_cursor(line);
        editor
    }

    fn run_to_end(
        animator: &mut CenterAnimator,
        editor: &mut SimEditor,
        timers: &mut TimerQueue<Timer>,
    ) {
        while let Some((id, _)) = timers.pop_due(u64::MAX) {
            if animator.owns(id) {
                animator.tick(editor, timers);
            }
        }
    }

    #[test]
    fn test_plan_offsets_from_midpoint() {
        // cursor top at 500px, midpoint at 400px
        let editor = editor_with_cursor_at(25);
        let plan = CenterAnimation::plan(&editor, 0.0, 1.0).unwrap();
        assert_eq!(plan.destination, 100.0);
        assert_eq!(plan.step, 20.0);
        assert_eq!(plan.remaining, 5);
    }

    #[test]
    fn test_five_steps_of_twenty() {
        let mut editor = editor_with_cursor_at(25);
        let mut timers = TimerQueue::new();
        let mut animator = CenterAnimator::new();

        assert!(animator.recenter(&mut editor, 0.0, 1.0, &mut timers));
        assert_eq!(editor.scroll_top(), 20.0);
        run_to_end(&mut animator, &mut editor, &mut timers);

        assert_eq!(editor.scroll_writes(), &[20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(timers.now(), 4 * CENTER_STEP_MS);
        assert!(!animator.is_animating());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_zero_smoothness_jumps() {
        let mut editor = editor_with_cursor_at(25);
        let mut timers = TimerQueue::new();
        let mut animator = CenterAnimator::new();

        assert!(animator.recenter(&mut editor, 0.0, 0.0, &mut timers));
        assert_eq!(editor.scroll_writes(), &[100.0]);
        assert!(!animator.is_animating());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_scrolls_up_for_cursor_above_midpoint() {
        let mut editor = SimEditor::new(1, 1000, 20.0, 800.0);
        editor.scroll_to(1000.0);
        editor.set_cursor(60); // 1200 - 1000 = 200px on screen
        let mut timers = TimerQueue::new();
        let mut animator = CenterAnimator::new();

        animator.recenter(&mut editor, 0.0, 1.0, &mut timers);
        run_to_end(&mut animator, &mut editor, &mut timers);
        assert_eq!(editor.scroll_top(), 800.0);
        assert_eq!(editor.scroll_writes(), &[960.0, 920.0, 880.0, 840.0, 800.0]);
    }

    #[test]
    fn test_second_animation_preempts_first() {
        let mut editor = editor_with_cursor_at(25);
        let mut timers = TimerQueue::new();
        let mut animator = CenterAnimator::new();

        animator.recenter(&mut editor, 0.0, 1.0, &mut timers);
        assert_eq!(timers.len(), 1);

        // cursor jumps further down before the first animation finishes
        editor.set_cursor(45);
        animator.recenter(&mut editor, 0.0, 1.0, &mut timers);
        assert_eq!(timers.len(), 1);
        let destination = animator.animation().unwrap().destination;

        run_to_end(&mut animator, &mut editor, &mut timers);
        assert_eq!(editor.scroll_top(), destination);
        assert_eq!(destination, 500.0);
    }

    #[test]
    fn test_missing_geometry_is_noop() {
        let mut editor = editor_with_cursor_at(25);
        editor.set_layout_ready(false);
        let mut timers = TimerQueue::new();
        let mut animator = CenterAnimator::new();

        assert!(!animator.recenter(&mut editor, 0.0, 1.0, &mut timers));
        assert!(editor.scroll_writes().is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_dead_zone() {
        // offset 100px, half viewport 400px: 25% tolerates exactly 100px
        let editor = editor_with_cursor_at(25);
        assert!(CenterAnimation::plan(&editor, 25.0, 1.0).is_none());
        assert!(CenterAnimation::plan(&editor, 24.0, 1.0).is_some());
    }

    #[test]
    fn test_already_centered_is_noop() {
        let editor = editor_with_cursor_at(20);
        assert!(CenterAnimation::plan(&editor, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_dead_zone_radius() {
        assert_eq!(dead_zone_radius(50.0, 800.0), 200.0);
        assert_eq!(dead_zone_radius(150.0, 800.0), 400.0);
        assert_eq!(dead_zone_radius(f64::NAN, 800.0), 0.0);
    }

    #[test]
    fn test_advance_reaches_destination_exactly() {
        let mut animation = CenterAnimation {
            editor: EditorId(1),
            destination: 333.0,
            step: 333.0 / 17.0,
            remaining: 17,
        };
        let mut last = 0.0;
        let mut count = 0;
        while let Some(top) = animation.advance() {
            assert!(top > last);
            last = top;
            count += 1;
        }
        assert_eq!(count, 17);
        assert_eq!(last, 333.0);
    }
}
