//! Shared numeric constants for the canvas editing engine.

// ── Document ────────────────────────────────────────────────────

/// Default grid cell size in document pixels.
pub const DEFAULT_GRID_SIZE: i32 = 8;

/// Smallest width an element may be resized to.
pub const MIN_ELEMENT_WIDTH: i32 = 50;

/// Smallest height an element may be resized to.
pub const MIN_ELEMENT_HEIGHT: i32 = 30;

// ── Snapping ────────────────────────────────────────────────────

/// Distance (document pixels) within which an element centre snaps to the canvas centre.
pub const SNAP_THRESHOLD: i32 = 5;

/// Maximum difference between neighbour gaps for an equal-spacing snap.
pub const SPACING_SNAP_THRESHOLD: i32 = 5;

/// Rotation step applied while Shift is held, in degrees.
pub const ROTATION_SHIFT_STEP_DEG: f64 = 15.0;

// ── History ─────────────────────────────────────────────────────

/// Capacity of each of the undo and redo stacks.
pub const MAX_HISTORY_DEPTH: usize = 50;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance above the top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Commands ────────────────────────────────────────────────────

/// Grid cells a duplicated or pasted element is shifted from its source.
pub const CLONE_OFFSET_CELLS: i32 = 2;
