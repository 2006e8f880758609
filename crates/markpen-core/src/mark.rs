//! Mark record and ellipse geometry.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Stroke color for newly created marks.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Stroke width for newly created marks, in image pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 3.0;

/// Pen settings applied to the next created mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    /// Stroke color as a hex RGB string, e.g. "#ff0000".
    pub color: String,
    /// Stroke width in image pixels.
    pub line_width: f64,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl MarkStyle {
    /// Get the color as RGB components.
    pub fn rgb(&self) -> [u8; 3] {
        parse_hex_rgb(&self.color).unwrap_or([255, 0, 0])
    }

    /// Set the color from RGB components.
    pub fn set_rgb(&mut self, rgb: [u8; 3]) {
        self.color = format_hex_rgb(rgb);
    }
}

/// An elliptical annotation over the image.
///
/// The four coordinates are the bounding-box corners of an axis-aligned
/// ellipse, stored raw: (x1, y1) need not be the min corner, and resizing
/// past the opposite side flips them. Geometry queries normalize
/// transiently and never write the normalization back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// First corner, image space.
    pub x1: f64,
    pub y1: f64,
    /// Opposite corner, image space.
    pub x2: f64,
    pub y2: f64,
    /// Stroke color as a hex RGB string.
    pub color: String,
    /// Stroke width in image pixels.
    pub line_width: f64,
    /// Whether the mark is part of the current selection.
    pub is_selected: bool,
}

impl Mark {
    /// Create a mark spanning two drag endpoints, in the given style.
    pub fn new(start: Point, end: Point, style: &MarkStyle) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            color: style.color.clone(),
            line_width: style.line_width,
            is_selected: false,
        }
    }

    /// Center of the ellipse.
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Horizontal and vertical radii (always non-negative).
    pub fn radii(&self) -> (f64, f64) {
        ((self.x2 - self.x1).abs() / 2.0, (self.y2 - self.y1).abs() / 2.0)
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    /// Extent along the y axis.
    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// Normalized bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }

    /// Whether a point lies inside the ellipse.
    ///
    /// Evaluates the normalized ellipse equation for the bounding box, so
    /// the result is independent of corner ordering. Degenerate marks
    /// (zero extent on either axis) contain nothing.
    pub fn contains(&self, point: Point) -> bool {
        let (radius_x, radius_y) = self.radii();
        if radius_x < f64::EPSILON || radius_y < f64::EPSILON {
            return false;
        }
        let center = self.center();
        let dx = (point.x - center.x) / radius_x;
        let dy = (point.y - center.y) / radius_y;
        dx * dx + dy * dy <= 1.0
    }

    /// Shift all four coordinates by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.x1 += delta.x;
        self.y1 += delta.y;
        self.x2 += delta.x;
        self.y2 += delta.y;
    }

    /// Get the stroke color as RGB components.
    pub fn rgb(&self) -> [u8; 3] {
        parse_hex_rgb(&self.color).unwrap_or([255, 0, 0])
    }

    /// Set the stroke color from RGB components.
    pub fn set_rgb(&mut self, rgb: [u8; 3]) {
        self.color = format_hex_rgb(rgb);
    }
}

/// Parse a "#rrggbb" hex color string.
pub fn parse_hex_rgb(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    // The length check counts bytes, so multibyte input must be ruled
    // out before slicing digit pairs.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Format RGB components as a "#rrggbb" hex color string.
pub fn format_hex_rgb(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
