//! Viewport module for pan/zoom transforms.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed scale.
pub const MAX_SCALE: f64 = 10.0;

/// Multiplier applied per zoom step (wheel notch).
pub const ZOOM_STEP: f64 = 1.1;

/// Direction of a zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Viewport manages the view transform for the editor surface.
///
/// It converts between screen coordinates and image coordinates. The
/// offset is the image origin's position in screen space, so panning
/// adds screen-space deltas directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the image origin.
    pub offset: Vec2,
    /// Current scale (screen pixels per image pixel).
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Create a new viewport at identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to image coordinates.
    pub fn screen_to_image(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.scale,
            (screen_point.y - self.offset.y) / self.scale,
        )
    }

    /// Convert an image point to screen coordinates.
    pub fn image_to_screen(&self, image_point: Point) -> Point {
        Point::new(
            image_point.x * self.scale + self.offset.x,
            image_point.y * self.scale + self.offset.y,
        )
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Apply one zoom step, keeping the given screen point fixed.
    ///
    /// The image point under `screen_point` maps to the same screen
    /// position before and after the step.
    pub fn zoom_at(&mut self, screen_point: Point, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        };
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        // Keep the point under the cursor fixed:
        // offset' = screen - (screen - offset) * (scale' / scale)
        let ratio = new_scale / self.scale;
        self.offset = Vec2::new(
            screen_point.x - (screen_point.x - self.offset.x) * ratio,
            screen_point.y - (screen_point.y - self.offset.y) * ratio,
        );
        self.scale = new_scale;
    }

    /// Fit the image inside the container and center it.
    ///
    /// The fit never upscales past 1:1; a small image sits centered at
    /// its native size.
    pub fn fit_to_container(&mut self, container: Size, image: Size) {
        if image.width <= 0.0 || image.height <= 0.0 {
            self.offset = Vec2::ZERO;
            self.scale = 1.0;
            return;
        }

        let scale_x = container.width / image.width;
        let scale_y = container.height / image.height;
        self.scale = scale_x.min(scale_y).min(1.0).clamp(MIN_SCALE, MAX_SCALE);

        self.offset = Vec2::new(
            (container.width - image.width * self.scale) / 2.0,
            (container.height - image.height * self.scale) / 2.0,
        );
    }
}
