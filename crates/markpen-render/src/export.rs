//! Flattened PNG export.
//!
//! Renders the image at native resolution with every mark burned in.
//! The viewport and selection decoration never appear in the output.

use image::{DynamicImage, ImageFormat, RgbaImage};
use markpen_core::mark::Mark;
use thiserror::Error;
use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot allocate pixel surface: {0}")]
    Surface(String),
    #[error("Cannot build mark path: {0}")]
    Path(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Render the image with all marks applied, at native resolution.
pub fn render_flattened(image: &DynamicImage, marks: &[Mark]) -> ExportResult<DynamicImage> {
    let mut pixmap = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        ExportError::Surface(format!("{}x{} pixmap", image.width(), image.height()))
    })?;

    copy_image_to_pixmap(image, &mut pixmap)?;

    for mark in marks {
        draw_mark(&mut pixmap, mark)?;
    }

    let output = RgbaImage::from_raw(image.width(), image.height(), pixmap.data().to_vec())
        .ok_or_else(|| ExportError::Surface("output image".to_string()))?;

    log::debug!(
        "flattened {} marks into {}x{} export",
        marks.len(),
        image.width(),
        image.height()
    );
    Ok(DynamicImage::ImageRgba8(output))
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> ExportResult<Vec<u8>> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    Ok(buffer.into_inner())
}

/// Render and encode in one step.
pub fn export_png(image: &DynamicImage, marks: &[Mark]) -> ExportResult<Vec<u8>> {
    encode_png(&render_flattened(image, marks)?)
}

fn copy_image_to_pixmap(image: &DynamicImage, pixmap: &mut Pixmap) -> ExportResult<()> {
    let rgba = image.to_rgba8();
    let data = pixmap.data_mut();
    if data.len() != rgba.len() {
        return Err(ExportError::Surface(
            "source image and pixmap size mismatch".to_string(),
        ));
    }
    data.copy_from_slice(rgba.as_raw());
    Ok(())
}

fn draw_mark(pixmap: &mut Pixmap, mark: &Mark) -> ExportResult<()> {
    let [r, g, b] = mark.rgb();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: mark.line_width as f32,
        ..Stroke::default()
    };

    let center = mark.center();
    let (radius_x, radius_y) = mark.radii();
    let rx = (radius_x as f32).max(1.0);
    let ry = (radius_y as f32).max(1.0);
    let cx = center.x as f32;
    let cy = center.y as f32;

    // The stroke width applies in path coordinates, so the oval is built
    // at image scale and drawn untransformed to keep the width in pixels.
    let oval = Rect::from_ltrb(cx - rx, cy - ry, cx + rx, cy + ry)
        .ok_or_else(|| ExportError::Path("ellipse bounds".to_string()))?;
    let mut pb = PathBuilder::new();
    pb.push_oval(oval);
    let path = pb
        .finish()
        .ok_or_else(|| ExportError::Path("ellipse outline".to_string()))?;
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);

    Ok(())
}
