//! Input model: modifier keys, mouse buttons, keys, and the gesture state machine.
//!
//! `Modifiers` and `Button` capture what the input source reports with each
//! pointer event. `Gesture` is the single active gesture tracked between
//! pointer-down and pointer-up; at most one controller is ever active because
//! the engine holds exactly one `Gesture` value.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{Document, ElementId};
use crate::drag::DragState;
use crate::resize::ResizeState;
use crate::rotate::RotateState;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether a click should toggle selection membership instead of replacing it.
    #[must_use]
    pub fn toggles_selection(self) -> bool {
        self.command() || self.shift
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, holding the key name as reported by the browser
/// (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive comparison against a key name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// The active gesture. Each non-idle variant carries the controller state
/// needed to compute updates and to commit or cancel on release.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// An element is being moved.
    Dragging(DragState),
    /// An element is being resized by one of its eight handles.
    Resizing(ResizeState),
    /// An element is being rotated around its centre.
    Rotating(RotateState),
}

impl Gesture {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The element the active gesture targets, if any.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging(s) => Some(s.id),
            Self::Resizing(s) => Some(s.id),
            Self::Rotating(s) => Some(s.id),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging(_) => "drag",
            Self::Resizing(_) => "resize",
            Self::Rotating(_) => "rotate",
        }
    }

    /// Undo the transient writes of the active gesture.
    pub fn cancel(&self, doc: &mut Document) {
        match self {
            Self::Idle => {}
            Self::Dragging(s) => s.cancel(doc),
            Self::Resizing(s) => s.cancel(doc),
            Self::Rotating(s) => s.cancel(doc),
        }
    }

    /// Whether the active gesture has changed its element since pointer-down.
    #[must_use]
    pub fn changed(&self, doc: &Document) -> bool {
        match self {
            Self::Idle => false,
            Self::Dragging(s) => s.changed(doc),
            Self::Resizing(s) => s.changed(doc),
            Self::Rotating(s) => s.changed(doc),
        }
    }
}
