//! MarkPen Render Library
//!
//! Screen-space canvas painting for the editor and flattened PNG
//! export for the host.

pub mod export;
pub mod scene;

pub use export::{ExportError, ExportResult, encode_png, export_png, render_flattened};
pub use scene::{ACCENT_COLOR, SceneParams, paint_scene};
