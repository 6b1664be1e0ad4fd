//! Drag controller: moves one element from pointer-down to pointer-up.
//!
//! Each update runs the full placement pipeline on the raw position:
//! grid snap, then alignment guides against every sibling, then canvas clamp.
//! The result is written straight into the document for live rendering; the
//! engine decides whether it becomes a committed snapshot on release.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::config::EditorConfig;
use crate::doc::{Document, Element, ElementId};
use crate::geometry::{Point, Rect, clamp_to_canvas, snap_to_grid};
use crate::guides::{self, Guide};

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Element being dragged.
    pub id: ElementId,
    /// Pointer position minus element top-left at pointer-down, in document space.
    pub offset: Point,
    /// Element geometry at pointer-down, restored on cancel.
    pub origin: Rect,
}

impl DragState {
    /// Begin dragging `id` with the pointer at `pointer` (document space).
    ///
    /// Returns `None` for unknown or locked elements. Does not touch the document.
    #[must_use]
    pub fn start(doc: &Document, id: &ElementId, pointer: Point) -> Option<Self> {
        let element = doc.get(id).filter(|e| !e.is_locked)?;
        Some(Self {
            id: *id,
            offset: Point::new(pointer.x - f64::from(element.x), pointer.y - f64::from(element.y)),
            origin: element.rect(),
        })
    }

    /// Move the element to follow `pointer` and return the active guide markers.
    pub fn update(&self, doc: &mut Document, pointer: Point, config: &EditorConfig) -> Vec<Guide> {
        let Some(target) = place(doc, &self.id, pointer, self.offset, config) else {
            return Vec::new();
        };
        if let Some(element) = doc.get_mut(&self.id) {
            element.x = target.x;
            element.y = target.y;
        }
        target.guides
    }

    /// Put the element back where it was at pointer-down.
    pub fn cancel(&self, doc: &mut Document) {
        if let Some(element) = doc.get_mut(&self.id) {
            element.set_rect(self.origin);
        }
    }

    /// Whether the element has moved since pointer-down.
    #[must_use]
    pub fn changed(&self, doc: &Document) -> bool {
        doc.get(&self.id).is_some_and(|e| e.rect() != self.origin)
    }
}

/// The final snapped position and markers for a candidate drag position.
struct Placement {
    x: i32,
    y: i32,
    guides: Vec<Guide>,
}

fn place(doc: &Document, id: &ElementId, pointer: Point, offset: Point, config: &EditorConfig) -> Option<Placement> {
    let element = doc.get(id)?;
    let grid = doc.grid_size();
    let x = snap_to_grid(pointer.x - offset.x, grid);
    let y = snap_to_grid(pointer.y - offset.y, grid);

    let siblings: Vec<Rect> = doc
        .elements()
        .iter()
        .filter(|e| e.id != *id)
        .map(Element::rect)
        .collect();
    let candidate = Rect::new(x, y, element.width, element.height);
    let snapped = guides::detect(candidate, &siblings, doc.canvas_width(), doc.canvas_height(), config);

    let (x, y) = clamp_to_canvas(
        snapped.x,
        snapped.y,
        element.width,
        element.height,
        doc.canvas_width(),
        doc.canvas_height(),
    );
    Some(Placement { x, y, guides: snapped.guides })
}
