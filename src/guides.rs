//! Alignment guide detection for a moving element.
//!
//! Each axis is evaluated independently, X then Y. A candidate coordinate is
//! overridden by at most one rule per axis:
//!
//! 1. **Centre guide**: the element centre lies within `snap_threshold` of the
//!    canvas centre; the element is centred exactly.
//! 2. **Equal-spacing guide**: with at least two siblings, the element sits
//!    between an adjacent pair (siblings sorted by leading edge) and its two
//!    gaps differ by less than `spacing_snap_threshold`; the element is moved
//!    so both gaps are equal.
//!
//! The centre rule is checked first and suppresses the spacing rule on that
//! axis. Detection is pure: callers apply the returned position themselves.

#[cfg(test)]
#[path = "guides_test.rs"]
mod guides_test;

use crate::config::EditorConfig;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis; guides are vertical lines at an x coordinate.
    X,
    /// Vertical axis; guides are horizontal lines at a y coordinate.
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKind {
    Center,
    Spacing,
}

/// A transient marker for the renderer: a line across `axis` at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guide {
    pub axis: Axis,
    pub kind: GuideKind,
    pub position: i32,
}

/// The detector's output: a possibly-overridden top-left plus guide markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapped {
    pub x: i32,
    pub y: i32,
    pub guides: Vec<Guide>,
}

/// Leading/trailing edges of a box along one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    leading: i32,
    trailing: i32,
}

impl Span {
    fn of(rect: &Rect, axis: Axis) -> Self {
        match axis {
            Axis::X => Self { leading: rect.x, trailing: rect.right() },
            Axis::Y => Self { leading: rect.y, trailing: rect.bottom() },
        }
    }
}

/// Run both guide rules on `candidate` against the non-moving `siblings`.
#[must_use]
pub fn detect(candidate: Rect, siblings: &[Rect], canvas_width: i32, canvas_height: i32, config: &EditorConfig) -> Snapped {
    let mut guides = Vec::new();
    let x = snap_axis(Axis::X, candidate, siblings, canvas_width, config, &mut guides);
    let y = snap_axis(Axis::Y, candidate, siblings, canvas_height, config, &mut guides);
    Snapped { x, y, guides }
}

fn snap_axis(
    axis: Axis,
    candidate: Rect,
    siblings: &[Rect],
    extent: i32,
    config: &EditorConfig,
    guides: &mut Vec<Guide>,
) -> i32 {
    let own = Span::of(&candidate, axis);
    let size = own.trailing - own.leading;

    if let Some((leading, guide)) = center_snap(axis, own.leading, size, extent, config.snap_threshold) {
        guides.push(guide);
        return leading;
    }

    if let Some((leading, pair)) = spacing_snap(axis, own.leading, size, siblings, config.spacing_snap_threshold) {
        guides.extend(pair);
        return leading;
    }

    own.leading
}

fn center_snap(axis: Axis, leading: i32, size: i32, extent: i32, threshold: i32) -> Option<(i32, Guide)> {
    let canvas_center = extent / 2;
    let own_center = leading + size / 2;
    if (own_center - canvas_center).abs() >= threshold {
        return None;
    }
    Some((canvas_center - size / 2, Guide { axis, kind: GuideKind::Center, position: canvas_center }))
}

fn spacing_snap(axis: Axis, leading: i32, size: i32, siblings: &[Rect], threshold: i32) -> Option<(i32, [Guide; 2])> {
    if siblings.len() < 2 {
        return None;
    }
    let mut spans: Vec<Span> = siblings.iter().map(|r| Span::of(r, axis)).collect();
    spans.sort_by(|a, b| a.leading.cmp(&b.leading).then(a.trailing.cmp(&b.trailing)));

    let trailing = leading + size;
    for pair in spans.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        let left_gap = leading - left.trailing;
        let right_gap = right.leading - trailing;
        if left_gap <= 0 || right_gap <= 0 {
            continue;
        }
        if (left_gap - right_gap).abs() >= threshold {
            continue;
        }
        let room = right.leading - left.trailing - size;
        let snapped = left.trailing + room / 2;
        let snapped_trailing = snapped + size;
        let markers = [
            Guide { axis, kind: GuideKind::Spacing, position: (left.trailing + snapped) / 2 },
            Guide { axis, kind: GuideKind::Spacing, position: (snapped_trailing + right.leading) / 2 },
        ];
        return Some((snapped, markers));
    }
    None
}
