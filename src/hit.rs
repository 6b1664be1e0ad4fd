//! Hit-testing: which element, handle, or rotate grip lies under a point.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::EditorConfig;
use crate::doc::{Document, Element, ElementId};
use crate::geometry::{CanvasRect, Point, rotate_about};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
    RotateHandle,
}

/// The eight resize grab points: four corners and four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// Parse the short handle name used by hosts (`"nw"`, `"e"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "n" => Some(Self::N),
            "ne" => Some(Self::Ne),
            "e" => Some(Self::E),
            "se" => Some(Self::Se),
            "s" => Some(Self::S),
            "sw" => Some(Self::Sw),
            "w" => Some(Self::W),
            "nw" => Some(Self::Nw),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    #[must_use]
    pub fn touches_left(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    #[must_use]
    pub fn touches_right(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    #[must_use]
    pub fn touches_top(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    #[must_use]
    pub fn touches_bottom(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// CSS cursor shown while this handle is dragged.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }

    /// Handle position in the element's unrotated frame.
    fn local_position(self, element: &Element) -> Point {
        let left = f64::from(element.x);
        let top = f64::from(element.y);
        let right = f64::from(element.x + element.width);
        let bottom = f64::from(element.y + element.height);
        let mid_x = (left + right) / 2.0;
        let mid_y = (top + bottom) / 2.0;
        match self {
            Self::N => Point::new(mid_x, top),
            Self::Ne => Point::new(right, top),
            Self::E => Point::new(right, mid_y),
            Self::Se => Point::new(right, bottom),
            Self::S => Point::new(mid_x, bottom),
            Self::Sw => Point::new(left, bottom),
            Self::W => Point::new(left, mid_y),
            Self::Nw => Point::new(left, top),
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under `doc_pt`.
///
/// Handles of selected, unlocked elements are checked first so a handle that
/// overlaps a neighbour still wins; then bodies from topmost to bottommost.
/// Points are tested in each element's unrotated frame.
#[must_use]
pub fn hit_test(doc_pt: Point, doc: &Document, canvas: &CanvasRect, config: &EditorConfig) -> Option<Hit> {
    let radius = canvas.screen_dist_to_document(config.handle_radius_px);
    let rotate_offset = canvas.screen_dist_to_document(config.rotate_handle_offset_px);

    for element in doc.elements().iter().rev().filter(|e| e.is_selected && !e.is_locked) {
        let local = to_local(doc_pt, element);
        let rotate_grip = Point::new(element.rect().center().x, f64::from(element.y) - rotate_offset);
        if distance(local, rotate_grip) <= radius {
            return Some(Hit { element_id: element.id, part: HitPart::RotateHandle });
        }
        for handle in ResizeHandle::ALL {
            if distance(local, handle.local_position(element)) <= radius {
                return Some(Hit { element_id: element.id, part: HitPart::ResizeHandle(handle) });
            }
        }
    }

    doc.elements()
        .iter()
        .rev()
        .find(|e| contains_local(to_local(doc_pt, e), e))
        .map(|e| Hit { element_id: e.id, part: HitPart::Body })
}

fn to_local(pt: Point, element: &Element) -> Point {
    if element.rotation.abs() < f64::EPSILON {
        return pt;
    }
    rotate_about(pt, element.rect().center(), -element.rotation)
}

fn contains_local(pt: Point, element: &Element) -> bool {
    pt.x >= f64::from(element.x)
        && pt.x <= f64::from(element.x + element.width)
        && pt.y >= f64::from(element.y)
        && pt.y <= f64::from(element.y + element.height)
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
