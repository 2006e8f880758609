//! Canvas painting for the editor view.
//!
//! Everything is painted in screen space: mark geometry goes through
//! the viewport, stroke widths and handle sizes do not, so they stay
//! constant on screen at every zoom level.

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, TextureId};
use kurbo::{Point, Size};
use markpen_core::mark::Mark;
use markpen_core::selection::{HANDLE_SIZE, corner_handles};
use markpen_core::viewport::Viewport;

/// Accent color for selection decoration.
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(0, 120, 212);

/// Backdrop behind the image.
const BACKGROUND_COLOR: Color32 = Color32::from_gray(40);

/// Dash pattern for selection and preview outlines, screen pixels.
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

/// Segments in an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 64;

/// Stroke width of the dashed selection outline.
const SELECTION_STROKE_WIDTH: f32 = 1.5;

/// Everything needed to paint one frame of the canvas.
pub struct SceneParams<'a> {
    /// Texture holding the loaded image.
    pub texture: TextureId,
    /// Native image size in pixels.
    pub image_size: Size,
    /// Current viewport.
    pub viewport: &'a Viewport,
    /// Committed marks, in stacking order.
    pub marks: &'a [Mark],
    /// In-progress creation preview, if any.
    pub preview: Option<&'a Mark>,
}

/// Paint one frame of the canvas into the painter's clip rect.
///
/// The viewport works in canvas-local coordinates; the clip rect's
/// origin anchors them on screen.
pub fn paint_scene(painter: &Painter, params: &SceneParams) {
    let canvas = painter.clip_rect();
    let origin = canvas.min.to_vec2();
    painter.rect_filled(canvas, CornerRadius::ZERO, BACKGROUND_COLOR);

    painter.image(
        params.texture,
        image_screen_rect(params.viewport, params.image_size).translate(origin),
        Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        Color32::WHITE,
    );

    for mark in params.marks {
        paint_mark(painter, mark, params.viewport, origin);
    }
    for mark in params.marks.iter().filter(|m| m.is_selected) {
        paint_selection(painter, mark, params.viewport, origin);
    }

    // The preview sits on top of everything.
    if let Some(preview) = params.preview {
        paint_preview(painter, preview, params.viewport, origin);
    }
}

/// Screen rect covered by the image under the current viewport.
fn image_screen_rect(viewport: &Viewport, image_size: Size) -> Rect {
    let top_left = viewport.image_to_screen(Point::ZERO);
    let bottom_right =
        viewport.image_to_screen(Point::new(image_size.width, image_size.height));
    Rect::from_min_max(to_pos2(top_left), to_pos2(bottom_right))
}

fn paint_mark(painter: &Painter, mark: &Mark, viewport: &Viewport, origin: egui::Vec2) {
    let [r, g, b] = mark.rgb();
    let stroke = Stroke::new(mark.line_width as f32, Color32::from_rgb(r, g, b));
    let points = ellipse_points(mark, viewport, origin);
    painter.add(Shape::closed_line(points, stroke));
}

fn paint_selection(painter: &Painter, mark: &Mark, viewport: &Viewport, origin: egui::Vec2) {
    let mut outline = ellipse_points(mark, viewport, origin);
    if let Some(first) = outline.first().copied() {
        outline.push(first);
    }
    painter.extend(Shape::dashed_line(
        &outline,
        Stroke::new(SELECTION_STROKE_WIDTH, ACCENT_COLOR),
        DASH_LENGTH,
        GAP_LENGTH,
    ));

    for handle in corner_handles(mark) {
        let center = to_pos2(viewport.image_to_screen(handle.position)) + origin;
        let rect = Rect::from_center_size(
            center,
            egui::vec2(HANDLE_SIZE as f32, HANDLE_SIZE as f32),
        );
        painter.rect_filled(rect, CornerRadius::ZERO, Color32::WHITE);
        painter.rect_stroke(
            rect,
            CornerRadius::ZERO,
            Stroke::new(1.0, ACCENT_COLOR),
            StrokeKind::Inside,
        );
    }
}

fn paint_preview(painter: &Painter, mark: &Mark, viewport: &Viewport, origin: egui::Vec2) {
    let [r, g, b] = mark.rgb();
    let mut outline = ellipse_points(mark, viewport, origin);
    if let Some(first) = outline.first().copied() {
        outline.push(first);
    }
    painter.extend(Shape::dashed_line(
        &outline,
        Stroke::new(mark.line_width as f32, Color32::from_rgb(r, g, b)),
        DASH_LENGTH,
        GAP_LENGTH,
    ));
}

/// Approximate a mark's ellipse as a screen-space polyline.
fn ellipse_points(mark: &Mark, viewport: &Viewport, origin: egui::Vec2) -> Vec<Pos2> {
    let center = viewport.image_to_screen(mark.center());
    let (radius_x, radius_y) = mark.radii();
    let rx = (radius_x * viewport.scale) as f32;
    let ry = (radius_y * viewport.scale) as f32;

    let mut points = Vec::with_capacity(ELLIPSE_SEGMENTS);
    for i in 0..ELLIPSE_SEGMENTS {
        let t = (i as f32 / ELLIPSE_SEGMENTS as f32) * std::f32::consts::TAU;
        points.push(
            Pos2::new(
                center.x as f32 + rx * t.cos(),
                center.y as f32 + ry * t.sin(),
            ) + origin,
        );
    }
    points
}

fn to_pos2(point: Point) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}
