//! Document model: form elements, their geometry envelope, and the ordered
//! in-memory store that owns them.
//!
//! This module defines what is on the canvas (`Element`, `ElementKind`), the
//! page the elements live on (`PageSize`), and the `Document` that owns the
//! ordered element list. Order is z-order: the last element is topmost.
//!
//! Only geometry (`x`, `y`, `width`, `height`, `rotation`) and the two flags
//! are interpreted here. `payload` is opaque per-kind content owned by the
//! properties panel and is carried through snapshots untouched.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_GRID_SIZE;
use crate::geometry::{Rect, clamp_to_canvas};

/// Unique identifier for a form element. Never reused.
pub type ElementId = Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocError {
    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),
    #[error("element not found: {0}")]
    NotFound(ElementId),
    #[error("z-index counter {next} is not above existing z-index {existing}")]
    StaleZIndex { next: i64, existing: i64 },
}

/// The kind of a form element.
///
/// The geometry engine never branches on this; it is carried for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    TextInput,
    Label,
    Checkbox,
    Image,
    RadioGroup,
    Dropdown,
    DatePicker,
    Signature,
    Table,
    TextArea,
    Divider,
    FileUpload,
}

/// Standard page sizes at 96 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageSize {
    /// 8.5in × 11in.
    #[default]
    Letter,
    /// 210mm × 297mm.
    A4,
    /// 8.5in × 14in.
    Legal,
    /// 297mm × 420mm.
    A3,
    Custom { width: i32, height: i32 },
}

impl PageSize {
    /// Canvas `(width, height)` in document pixels.
    #[must_use]
    pub fn dimensions(self) -> (i32, i32) {
        match self {
            Self::Letter => (816, 1056),
            Self::A4 => (794, 1123),
            Self::Legal => (816, 1344),
            Self::A3 => (1123, 1587),
            Self::Custom { width, height } => (width.max(1), height.max(1)),
        }
    }
}

/// A positioned, sized, rotatable element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Left edge in document pixels.
    pub x: i32,
    /// Top edge in document pixels.
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Clockwise rotation in degrees around the centre, in `[0, 360)`.
    pub rotation: f64,
    /// Draw order, assigned by the document on insert.
    pub z_index: i64,
    pub is_selected: bool,
    /// Locked elements cannot be moved, resized or rotated.
    pub is_locked: bool,
    /// Opaque per-kind properties (label text, font, colours, options...).
    pub payload: serde_json::Value,
}

impl Element {
    /// Create an unselected, unlocked element with a fresh id and empty payload.
    #[must_use]
    pub fn new(kind: ElementKind, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            z_index: 0,
            is_selected: false,
            is_locked: false,
            payload: serde_json::json!({}),
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Write a rotation, normalized into `[0, 360)`. Non-finite input is ignored.
    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation = normalize_degrees(degrees);
        }
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// The ordered element collection plus canvas dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    elements: Vec<Element>,
    page_size: PageSize,
    grid_size: i32,
    next_z_index: i64,
}

impl Document {
    /// Create an empty document on the given page.
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self { elements: Vec::new(), page_size, grid_size: DEFAULT_GRID_SIZE, next_z_index: 0 }
    }

    /// Build a document from existing elements, assigning z-indices in order.
    pub fn with_elements(page_size: PageSize, elements: Vec<Element>) -> Result<Self, DocError> {
        let mut doc = Self::new(page_size);
        for element in elements {
            doc.insert(element)?;
        }
        Ok(doc)
    }

    #[must_use]
    pub fn canvas_width(&self) -> i32 {
        self.page_size.dimensions().0
    }

    #[must_use]
    pub fn canvas_height(&self) -> i32 {
        self.page_size.dimensions().1
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Set the grid size. Non-positive values are ignored.
    pub fn set_grid_size(&mut self, grid_size: i32) {
        if grid_size > 0 {
            self.grid_size = grid_size;
        }
    }

    /// Switch page size and pull every element back inside the new canvas.
    /// Returns true if anything changed.
    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        let mut changed = self.page_size != page_size;
        self.page_size = page_size;
        let (cw, ch) = page_size.dimensions();
        for element in &mut self.elements {
            let (x, y) = clamp_to_canvas(element.x, element.y, element.width, element.height, cw, ch);
            if (x, y) != (element.x, element.y) {
                element.x = x;
                element.y = y;
                changed = true;
            }
        }
        changed
    }

    /// All elements in z-order (last = topmost).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == *id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Append an element on top of the stack.
    ///
    /// Assigns the next z-index and clamps the element into the canvas.
    pub fn insert(&mut self, mut element: Element) -> Result<ElementId, DocError> {
        if self.contains(&element.id) {
            return Err(DocError::DuplicateId(element.id));
        }
        element.z_index = self.next_z_index;
        self.next_z_index += 1;
        element.set_rotation(element.rotation);
        let (x, y) = clamp_to_canvas(
            element.x,
            element.y,
            element.width,
            element.height,
            self.canvas_width(),
            self.canvas_height(),
        );
        element.x = x;
        element.y = y;
        let id = element.id;
        self.elements.push(element);
        Ok(id)
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == *id)?;
        Some(self.elements.remove(index))
    }

    /// Merge keys into an element's payload. JSON `null` values delete keys.
    /// Returns false if the element doesn't exist or `patch` is not an object.
    pub fn merge_payload(&mut self, id: &ElementId, patch: &serde_json::Value) -> bool {
        let Some(incoming) = patch.as_object() else {
            return false;
        };
        let Some(element) = self.get_mut(id) else {
            return false;
        };

        if !element.payload.is_object() {
            element.payload = serde_json::json!({});
        }

        if let Some(existing) = element.payload.as_object_mut() {
            for (k, v) in incoming {
                if v.is_null() {
                    existing.remove(k);
                } else {
                    existing.insert(k.clone(), v.clone());
                }
            }
        }
        true
    }

    /// Check the structural invariants: unique ids and a z-index counter above
    /// every assigned z-index.
    pub fn validate(&self) -> Result<(), DocError> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !seen.insert(element.id) {
                return Err(DocError::DuplicateId(element.id));
            }
            if element.z_index >= self.next_z_index {
                return Err(DocError::StaleZIndex { next: self.next_z_index, existing: element.z_index });
            }
        }
        Ok(())
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the document contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
