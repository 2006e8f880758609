//! Selection handles and drag manipulation state.

use crate::mark::Mark;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Handle side length in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Extra hit slop around a handle, in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;

/// Corner positions.
///
/// Each corner names the coordinate pair it edits, not a spatial
/// position: TopLeft is (x1, y1), TopRight (x2, y1), BottomLeft
/// (x1, y2), BottomRight (x2, y2). On a flipped mark the names are
/// nominal but the pairing stays fixed, so a resize always writes the
/// same two coordinates it started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in image coordinates.
    pub position: Point,
    /// Which coordinate pair this handle edits.
    pub corner: Corner,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, corner: Corner) -> Self {
        Self { position, corner }
    }

    /// Check if a point (in image coordinates) hits this handle.
    ///
    /// Handles are squares, so the hit region is square as well.
    /// `extent` is the half-size of that region, already adjusted for
    /// the viewport scale.
    pub fn hit_test(&self, point: Point, extent: f64) -> bool {
        let dx = (point.x - self.position.x).abs();
        let dy = (point.y - self.position.y).abs();
        dx <= extent && dy <= extent
    }
}

/// Half-size of a handle's hit region in image units at the given scale.
pub fn handle_hit_extent(scale: f64) -> f64 {
    (HANDLE_SIZE / 2.0 + HANDLE_HIT_TOLERANCE) / scale
}

/// Get the four corner handles of a mark, at its raw corners.
pub fn corner_handles(mark: &Mark) -> [Handle; 4] {
    [
        Handle::new(Point::new(mark.x1, mark.y1), Corner::TopLeft),
        Handle::new(Point::new(mark.x2, mark.y1), Corner::TopRight),
        Handle::new(Point::new(mark.x1, mark.y2), Corner::BottomLeft),
        Handle::new(Point::new(mark.x2, mark.y2), Corner::BottomRight),
    ]
}

/// Find which handle (if any) is hit at the given image point.
pub fn hit_test_handles(mark: &Mark, point: Point, extent: f64) -> Option<Corner> {
    corner_handles(mark)
        .iter()
        .find(|handle| handle.hit_test(point, extent))
        .map(|handle| handle.corner)
}

/// Resize a mark by dragging one corner.
///
/// Only the dragged corner's two coordinates move, set to the captured
/// original plus the total drag delta. The opposite pair is untouched,
/// so dragging past it flips or degenerates the ellipse.
pub fn apply_corner_resize(original: &Mark, corner: Corner, delta: Vec2) -> Mark {
    let mut mark = original.clone();
    match corner {
        Corner::TopLeft => {
            mark.x1 = original.x1 + delta.x;
            mark.y1 = original.y1 + delta.y;
        }
        Corner::TopRight => {
            mark.x2 = original.x2 + delta.x;
            mark.y1 = original.y1 + delta.y;
        }
        Corner::BottomLeft => {
            mark.x1 = original.x1 + delta.x;
            mark.y2 = original.y2 + delta.y;
        }
        Corner::BottomRight => {
            mark.x2 = original.x2 + delta.x;
            mark.y2 = original.y2 + delta.y;
        }
    }
    mark
}

/// State of an active corner-resize drag.
#[derive(Debug, Clone)]
pub struct ResizeState {
    /// Index of the mark being resized.
    pub mark_index: usize,
    /// The corner being dragged.
    pub corner: Corner,
    /// Drag start in image coordinates.
    pub start_point: Point,
    /// Latest drag position in image coordinates.
    pub current_point: Point,
    /// Mark state captured at drag start.
    pub original: Mark,
}

impl ResizeState {
    /// Create a new resize state.
    pub fn new(mark_index: usize, corner: Corner, start_point: Point, original: Mark) -> Self {
        Self {
            mark_index,
            corner,
            start_point,
            current_point: start_point,
            original,
        }
    }

    /// Total drag delta since the start.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }
}

/// State of an active move drag over the selected marks.
#[derive(Debug, Clone)]
pub struct MoveState {
    /// Drag start in image coordinates.
    pub start_point: Point,
    /// Latest drag position in image coordinates.
    pub current_point: Point,
    /// Captured originals of every selected mark (index, mark).
    pub originals: Vec<(usize, Mark)>,
}

impl MoveState {
    /// Create a new move state.
    pub fn new(start_point: Point, originals: Vec<(usize, Mark)>) -> Self {
        Self {
            start_point,
            current_point: start_point,
            originals,
        }
    }

    /// Total drag delta since the start.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }
}
