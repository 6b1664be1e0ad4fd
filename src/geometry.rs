//! Geometry utilities: points, rectangles, grid snapping, canvas clamping, and
//! the mapping from device pointer coordinates into document space.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either client (device) or document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned integer rectangle in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Geometric centre in document coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: f64::from(self.x) + f64::from(self.width) / 2.0,
            y: f64::from(self.y) + f64::from(self.height) / 2.0,
        }
    }
}

/// Placement of the canvas on screen, as reported by the renderer.
///
/// `left` / `top` are the client coordinates of the canvas origin.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub zoom: f64,
}

impl Default for CanvasRect {
    fn default() -> Self {
        Self { left: 0.0, top: 0.0, zoom: 1.0 }
    }
}

impl CanvasRect {
    /// Convert a document point back to client coordinates.
    #[must_use]
    pub fn document_to_client(&self, doc: Point) -> Point {
        Point {
            x: doc.x * self.effective_zoom() + self.left,
            y: doc.y * self.effective_zoom() + self.top,
        }
    }

    /// Convert a screen-space distance to a document-space distance.
    #[must_use]
    pub fn screen_dist_to_document(&self, screen_dist: f64) -> f64 {
        screen_dist / self.effective_zoom()
    }

    /// Zoom used for conversions; non-positive or non-finite zoom is treated as 1.
    fn effective_zoom(&self) -> f64 {
        if self.zoom.is_finite() && self.zoom > 0.0 { self.zoom } else { 1.0 }
    }
}

/// Round `value` to the nearest multiple of `grid_size`. Exact half cells go to
/// the even multiple, so `4.0` snaps to `0` and `12.0` to `16` on an 8px grid.
///
/// A non-positive `grid_size` disables snapping and only rounds to the nearest pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn snap_to_grid(value: f64, grid_size: i32) -> i32 {
    if grid_size <= 0 {
        return value.round_ties_even() as i32;
    }
    let g = f64::from(grid_size);
    ((value / g).round_ties_even() * g) as i32
}

/// Clamp a top-left position so a `width`×`height` box stays inside the canvas.
///
/// When the box is larger than the canvas the coordinate clamps to 0.
#[must_use]
pub fn clamp_to_canvas(x: i32, y: i32, width: i32, height: i32, canvas_width: i32, canvas_height: i32) -> (i32, i32) {
    (clamp_axis(x, width, canvas_width), clamp_axis(y, height, canvas_height))
}

fn clamp_axis(pos: i32, size: i32, extent: i32) -> i32 {
    pos.min(extent - size).max(0)
}

/// Map a client-space pointer position to document coordinates.
#[must_use]
pub fn pointer_to_document(pointer: Point, canvas: &CanvasRect) -> Point {
    let zoom = canvas.effective_zoom();
    Point {
        x: (pointer.x - canvas.left) / zoom,
        y: (pointer.y - canvas.top) / zoom,
    }
}

/// Rotate `p` around `pivot` by `degrees` clockwise (screen coordinates, y down).
#[must_use]
pub fn rotate_about(p: Point, pivot: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Point {
        x: pivot.x + dx * cos - dy * sin,
        y: pivot.y + dx * sin + dy * cos,
    }
}
