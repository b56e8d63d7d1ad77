//! Decides whether a cursor movement should re-center the view
//!
//! One user action fires several overlapping host signals: a keystroke sends
//! an edit and then a selection change, a click sends mouse-down, mouse-up and
//! a selection change. The flags here collapse each action into at most one
//! re-center decision.

use smoothscroll_core::{Editor, Workspace};

/// Which parameter set a re-center uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Cursor moved because the document changed
    Editing,
    /// Cursor moved by navigation or programmatically
    Navigating,
}

/// Why a signal did not lead to a re-center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// A mouse drag is in progress
    MouseDrag,
    /// Side effect of the click that just ended
    MouseReleased,
    /// The edit handler already re-centered for this change
    Typing,
    /// The user is holding a selection
    TextSelected,
    /// No document editor is focused
    NoEditor,
}

/// Outcome of classifying a moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Ignored(Ignored),
    Recenter(Motion),
}

/// Immediate reaction to a selection change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDecision {
    Ignore(Ignored),
    /// Evaluate again once concurrent signals have settled
    Settle,
}

/// Transient interaction flags of one plugin instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    editing: bool,
    mouse_down: bool,
    mouse_just_released: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    #[inline]
    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    #[inline]
    pub fn mouse_just_released(&self) -> bool {
        self.mouse_just_released
    }

    /// Document changed: always re-centers, with the editing parameters
    pub fn on_edit(&mut self) -> Classification {
        self.editing = true;
        Classification::Recenter(Motion::Editing)
    }

    pub fn on_mouse_down(&mut self) {
        self.mouse_down = true;
    }

    /// Mouse released
    ///
    /// Unless clicks should re-center, the selection change the click
    /// produces is marked for suppression.
    pub fn on_mouse_up(&mut self, center_on_click: bool) {
        self.mouse_down = false;
        if !center_on_click {
            self.mouse_just_released = true;
        }
    }

    pub fn on_selection_change(&mut self) -> SelectionDecision {
        if self.mouse_down {
            return SelectionDecision::Ignore(Ignored::MouseDrag);
        }
        if self.mouse_just_released {
            self.mouse_just_released = false;
            return SelectionDecision::Ignore(Ignored::MouseReleased);
        }
        SelectionDecision::Settle
    }

    /// Evaluate a settled selection change against the current workspace
    pub fn settle<W: Workspace>(&mut self, workspace: &mut W) -> Classification {
        if self.mouse_down {
            return Classification::Ignored(Ignored::MouseDrag);
        }
        if self.editing {
            self.editing = false;
            return Classification::Ignored(Ignored::Typing);
        }
        let Some(editor) = workspace.active_editor() else {
            return Classification::Ignored(Ignored::NoEditor);
        };
        if editor.has_selection() {
            return Classification::Ignored(Ignored::TextSelected);
        }
        Classification::Recenter(Motion::Navigating)
    }

    /// Forget every flag
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimEditor, SimHost};

    fn host() -> SimHost {
        SimHost::with_editor(SimEditor::new(1, 500, 20.0, 800.0))
    }

    #[test]
    fn test_edit_recenters_and_marks_typing() {
        let mut state = InteractionState::new();
        assert_eq!(state.on_edit(), Classification::Recenter(Motion::Editing));
        assert!(state.is_editing());

        let mut host = host();
        assert_eq!(state.on_selection_change(), SelectionDecision::Settle);
        assert_eq!(
            state.settle(&mut host),
            Classification::Ignored(Ignored::Typing)
        );
        assert!(!state.is_editing());
        assert_eq!(
            state.settle(&mut host),
            Classification::Recenter(Motion::Navigating)
        );
    }

    #[test]
    fn test_drag_ignored_until_release() {
        let mut state = InteractionState::new();
        state.on_mouse_down();
        assert_eq!(
            state.on_selection_change(),
            SelectionDecision::Ignore(Ignored::MouseDrag)
        );

        state.on_mouse_up(false);
        assert!(!state.is_mouse_down());
        assert_eq!(
            state.on_selection_change(),
            SelectionDecision::Ignore(Ignored::MouseReleased)
        );
        assert_eq!(state.on_selection_change(), SelectionDecision::Settle);
    }

    #[test]
    fn test_click_centering_skips_suppression() {
        let mut state = InteractionState::new();
        state.on_mouse_down();
        state.on_mouse_up(true);
        assert!(!state.mouse_just_released());
        assert_eq!(state.on_selection_change(), SelectionDecision::Settle);
    }

    #[test]
    fn test_settle_rechecks_mouse() {
        let mut state = InteractionState::new();
        let mut host = host();
        assert_eq!(state.on_selection_change(), SelectionDecision::Settle);
        state.on_mouse_down();
        assert_eq!(
            state.settle(&mut host),
            Classification::Ignored(Ignored::MouseDrag)
        );
    }

    #[test]
    fn test_settle_without_editor() {
        let mut state = InteractionState::new();
        let mut host = host();
        host.set_active(None);
        assert_eq!(
            state.settle(&mut host),
            Classification::Ignored(Ignored::NoEditor)
        );
    }

    #[test]
    fn test_settle_with_selection() {
        let mut state = InteractionState::new();
        let mut host = host();
        host.select(10, 14);
        assert_eq!(
            state.settle(&mut host),
            Classification::Ignored(Ignored::TextSelected)
        );
    }

    #[test]
    fn test_reset() {
        let mut state = InteractionState::new();
        state.on_edit();
        state.on_mouse_down();
        state.reset();
        assert_eq!(state, InteractionState::default());
    }
}
