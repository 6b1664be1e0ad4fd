//! Resize controller: handle-based resizing with a minimum size.
//!
//! A handle touching the left (top) edge moves that edge and keeps the right
//! (bottom) edge anchored; a handle touching the right (bottom) edge moves it
//! and keeps the left (top) edge anchored. Axes a handle does not touch are
//! left alone. Sizes are floored at the configured minimum, and when the floor
//! is hit the anchored edge still does not move. The moving edge is also kept
//! inside the canvas.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::config::EditorConfig;
use crate::doc::{Document, ElementId};
use crate::geometry::{Point, Rect};
use crate::hit::ResizeHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    /// Element being resized.
    pub id: ElementId,
    /// Which corner/edge handle is being dragged.
    pub handle: ResizeHandle,
    /// Document-space pointer position at pointer-down.
    pub start_pointer: Point,
    /// Element geometry at pointer-down.
    pub origin: Rect,
}

impl ResizeState {
    /// Begin resizing `id` by `handle`. Returns `None` for unknown or locked elements.
    #[must_use]
    pub fn start(doc: &Document, id: &ElementId, handle: ResizeHandle, pointer: Point) -> Option<Self> {
        let element = doc.get(id).filter(|e| !e.is_locked)?;
        Some(Self { id: *id, handle, start_pointer: pointer, origin: element.rect() })
    }

    /// Recompute the element's box from the pointer's offset to the start point.
    #[allow(clippy::cast_possible_truncation)]
    pub fn update(&self, doc: &mut Document, pointer: Point, config: &EditorConfig) {
        let dx = (pointer.x - self.start_pointer.x).round() as i32;
        let dy = (pointer.y - self.start_pointer.y).round() as i32;
        let bounds = Bounds {
            min_width: config.min_width,
            min_height: config.min_height,
            canvas_width: doc.canvas_width(),
            canvas_height: doc.canvas_height(),
        };
        let rect = resize_rect(self.origin, self.handle, dx, dy, &bounds);
        if let Some(element) = doc.get_mut(&self.id) {
            element.set_rect(rect);
        }
    }

    pub fn cancel(&self, doc: &mut Document) {
        if let Some(element) = doc.get_mut(&self.id) {
            element.set_rect(self.origin);
        }
    }

    #[must_use]
    pub fn changed(&self, doc: &Document) -> bool {
        doc.get(&self.id).is_some_and(|e| e.rect() != self.origin)
    }
}

/// Limits applied to a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_width: i32,
    pub min_height: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

/// Compute the box produced by dragging `handle` of `origin` by `(dx, dy)`.
#[must_use]
pub fn resize_rect(origin: Rect, handle: ResizeHandle, dx: i32, dy: i32, bounds: &Bounds) -> Rect {
    let (x, width) = resize_axis(
        origin.x,
        origin.width,
        dx,
        edge(handle.touches_left(), handle.touches_right()),
        bounds.min_width,
        bounds.canvas_width,
    );
    let (y, height) = resize_axis(
        origin.y,
        origin.height,
        dy,
        edge(handle.touches_top(), handle.touches_bottom()),
        bounds.min_height,
        bounds.canvas_height,
    );
    Rect::new(x, y, width, height)
}

/// Which edge of an axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Leading,
    Trailing,
    None,
}

fn edge(leading: bool, trailing: bool) -> Edge {
    if leading {
        Edge::Leading
    } else if trailing {
        Edge::Trailing
    } else {
        Edge::None
    }
}

fn resize_axis(start_pos: i32, start_size: i32, delta: i32, edge: Edge, min: i32, extent: i32) -> (i32, i32) {
    match edge {
        Edge::None => (start_pos, start_size),
        Edge::Leading => {
            let anchor = start_pos + start_size;
            let mut size = (start_size - delta).max(min);
            if anchor - size < 0 {
                size = anchor.max(min);
            }
            ((anchor - size).max(0), size)
        }
        Edge::Trailing => {
            let mut size = (start_size + delta).max(min);
            if start_pos + size > extent {
                size = (extent - start_pos).max(min);
            }
            (start_pos, size)
        }
    }
}
