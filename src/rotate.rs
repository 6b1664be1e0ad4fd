//! Rotation controller: pivot-relative angle from pointer movement.

#[cfg(test)]
#[path = "rotate_test.rs"]
mod rotate_test;

use crate::consts::ROTATION_SHIFT_STEP_DEG;
use crate::doc::{Document, ElementId, normalize_degrees};
use crate::geometry::Point;

/// Compass angle of `p` around `pivot` in degrees, in `[0, 360)`.
///
/// 0° is straight above the pivot and angles grow clockwise. Returns `None`
/// when `p` coincides with `pivot`, where the angle is undefined.
#[must_use]
pub fn angle_of(p: Point, pivot: Point) -> Option<f64> {
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return None;
    }
    let deg = dy.atan2(dx).to_degrees() + 90.0;
    deg.is_finite().then(|| normalize_degrees(deg))
}

/// Round an angle to the nearest Shift-snap step.
#[must_use]
pub fn snap_angle(deg: f64) -> f64 {
    normalize_degrees((deg / ROTATION_SHIFT_STEP_DEG).round() * ROTATION_SHIFT_STEP_DEG)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotateState {
    /// Element being rotated.
    pub id: ElementId,
    /// Element centre in document space.
    pub pivot: Point,
    /// Most recently computed angle; held when the pointer sits on the pivot.
    pub angle: f64,
    /// Element rotation at pointer-down, restored on cancel.
    pub origin_rotation: f64,
}

impl RotateState {
    /// Begin rotating `id`. Returns `None` for unknown or locked elements.
    #[must_use]
    pub fn start(doc: &Document, id: &ElementId, pointer: Point) -> Option<Self> {
        let element = doc.get(id).filter(|e| !e.is_locked)?;
        let pivot = element.rect().center();
        Some(Self {
            id: *id,
            pivot,
            angle: angle_of(pointer, pivot).unwrap_or(element.rotation),
            origin_rotation: element.rotation,
        })
    }

    /// Recompute the angle from `pointer` and write it to the element.
    pub fn update(&mut self, doc: &mut Document, pointer: Point, snap: bool) {
        if let Some(angle) = angle_of(pointer, self.pivot) {
            self.angle = if snap { snap_angle(angle) } else { angle };
        }
        if let Some(element) = doc.get_mut(&self.id) {
            element.set_rotation(self.angle);
        }
    }

    pub fn cancel(&self, doc: &mut Document) {
        if let Some(element) = doc.get_mut(&self.id) {
            element.rotation = self.origin_rotation;
        }
    }

    #[must_use]
    pub fn changed(&self, doc: &Document) -> bool {
        doc.get(&self.id)
            .is_some_and(|e| (e.rotation - self.origin_rotation).abs() > f64::EPSILON)
    }
}
