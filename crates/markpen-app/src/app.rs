//! Application state and the main update loop.

use std::path::PathBuf;

use image::DynamicImage;
use kurbo::{Point, Size};
use markpen_core::input::{Key, Modifiers, MouseButton};
use markpen_core::mark::format_hex_rgb;
use markpen_core::message::HostMessage;
use markpen_core::session::EditorSession;
use markpen_core::store::MarkStore;
use markpen_core::viewport::{Viewport, ZoomDirection};
use markpen_render::export::export_png;
use markpen_render::scene::{SceneParams, paint_scene};

use crate::save::{SaveEvent, SaveWorker};
use crate::ui::{ToolbarAction, ToolbarState, toolbar};

/// The MarkPen application.
pub struct MarkPenApp {
    image_path: PathBuf,
    image: DynamicImage,
    image_size: Size,
    texture: Option<egui::TextureHandle>,
    store: MarkStore,
    viewport: Viewport,
    session: EditorSession,
    /// In-flight saves, each on its own thread.
    saves: Vec<SaveWorker>,
    status: String,
    needs_fit: bool,
}

impl MarkPenApp {
    pub fn new(image_path: PathBuf, image: DynamicImage) -> Self {
        let image_size = Size::new(image.width() as f64, image.height() as f64);
        Self {
            image_path,
            image,
            image_size,
            texture: None,
            store: MarkStore::new(),
            viewport: Viewport::new(),
            session: EditorSession::new(image_size),
            saves: Vec::new(),
            status: String::new(),
            needs_fit: true,
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        let rgba = self.image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = rgba.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
        self.texture = Some(ctx.load_texture("image", color_image, egui::TextureOptions::LINEAR));
    }

    fn poll_saves(&mut self) {
        let mut i = 0;
        while i < self.saves.len() {
            match self.saves[i].try_recv() {
                Some(event) => {
                    self.saves.remove(i);
                    self.handle_save_event(event);
                }
                None => i += 1,
            }
        }
    }

    fn handle_save_event(&mut self, event: SaveEvent) {
        match event {
            SaveEvent::Finished(path) => {
                self.status = format!("Saved {}", path.display());
            }
            SaveEvent::Cancelled => {
                self.status = "Save cancelled".to_string();
            }
            SaveEvent::Failed(message) => {
                log::error!("save failed: {message}");
                self.status = format!("Save failed: {message}");
            }
        }
    }

    fn start_save(&mut self) {
        match export_png(&self.image, &self.store.marks) {
            Ok(png_bytes) => {
                let message = HostMessage::save_image(&png_bytes);
                if let Ok(json) = message.to_json() {
                    log::debug!("save-image message: {} bytes", json.len());
                }
                let stem = self
                    .image_path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("image");
                let default_name = format!("{stem}-marked.png");
                self.saves.push(SaveWorker::spawn(message, default_name));
                self.status = "Saving...".to_string();
            }
            Err(err) => {
                log::error!("export failed: {err}");
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::SetMode(mode) => self.session.set_mode(&mut self.store, mode),
            ToolbarAction::SetColor(rgb) => {
                let color = format_hex_rgb(rgb);
                self.session.apply_style(&mut self.store, Some(&color), None);
            }
            ToolbarAction::SetLineWidth(width) => {
                self.session.apply_style(&mut self.store, None, Some(width));
            }
            ToolbarAction::Undo => {
                self.store.undo();
            }
            ToolbarAction::Redo => {
                self.store.redo();
            }
            ToolbarAction::Fit => self.needs_fit = true,
            ToolbarAction::Save => self.start_save(),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let typing = ctx.wants_keyboard_input();

        ctx.input(|i| {
            // Undo and redo go straight to the store, whatever the mode.
            if i.modifiers.command && i.key_pressed(egui::Key::Z) {
                if i.modifiers.shift {
                    self.store.redo();
                } else {
                    self.store.undo();
                }
            }
            if i.modifiers.command && i.key_pressed(egui::Key::Y) {
                self.store.redo();
            }
            if i.modifiers.command && i.key_pressed(egui::Key::S) {
                self.start_save();
            }

            if !typing {
                if i.key_pressed(egui::Key::Escape) {
                    self.session.key_down(&mut self.store, Key::Escape);
                }
                if i.key_pressed(egui::Key::Delete) {
                    self.session.key_down(&mut self.store, Key::Delete);
                }
                if i.key_pressed(egui::Key::Backspace) {
                    self.session.key_down(&mut self.store, Key::Backspace);
                }
            }
        });
    }

    fn canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        if self.needs_fit {
            self.viewport.fit_to_container(
                Size::new(canvas_rect.width() as f64, canvas_rect.height() as f64),
                self.image_size,
            );
            self.needs_fit = false;
        }

        // The wheel zooms in every mode, even mid-gesture.
        if response.hovered() {
            if let Some(cursor) = response.hover_pos() {
                let point = to_canvas_point(cursor, canvas_rect);
                ctx.input(|i| wheel_zoom(&mut self.viewport, i, point));
            }
        }

        let pointer = response
            .hover_pos()
            .or_else(|| ctx.input(|i| i.pointer.latest_pos()));
        if let Some(pos) = pointer {
            let point = to_canvas_point(pos, canvas_rect);
            if response.hovered() && ctx.input(|i| i.pointer.primary_pressed()) {
                let modifiers = to_modifiers(ctx.input(|i| i.modifiers));
                self.session.pointer_down(
                    &mut self.store,
                    &self.viewport,
                    point,
                    MouseButton::Left,
                    modifiers,
                );
            }
            if self.session.is_active() {
                self.session
                    .pointer_move(&mut self.store, &mut self.viewport, point);
            }
            if ctx.input(|i| i.pointer.primary_released()) {
                self.session.pointer_up(
                    &mut self.store,
                    &mut self.viewport,
                    point,
                    MouseButton::Left,
                );
            }
        }

        if let Some(texture) = &self.texture {
            let preview = self.session.preview_mark();
            paint_scene(
                &painter,
                &SceneParams {
                    texture: texture.id(),
                    image_size: self.image_size,
                    viewport: &self.viewport,
                    marks: &self.store.marks,
                    preview: preview.as_ref(),
                },
            );
        }
    }
}

impl eframe::App for MarkPenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);
        self.poll_saves();
        self.handle_keys(ctx);

        let action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar(
                    ui,
                    &ToolbarState {
                        mode: self.session.mode,
                        color: self.session.style.rgb(),
                        line_width: self.session.style.line_width,
                        can_undo: self.store.can_undo(),
                        can_redo: self.store.can_redo(),
                        scale: self.viewport.scale,
                        status: &self.status,
                    },
                )
            })
            .inner;
        if let Some(action) = action {
            self.apply_toolbar_action(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ctx, ui);
        });

        // Keep polling while a save is in flight.
        if !self.saves.is_empty() {
            ctx.request_repaint();
        }
    }
}

fn to_canvas_point(pos: egui::Pos2, canvas_rect: egui::Rect) -> Point {
    Point::new(
        (pos.x - canvas_rect.min.x) as f64,
        (pos.y - canvas_rect.min.y) as f64,
    )
}

fn to_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
    }
}

/// One zoom step per wheel event at the cursor. Reads the raw delta:
/// the smoothed delta repeats over several frames for a single notch.
fn wheel_zoom(viewport: &mut Viewport, input: &egui::InputState, cursor: Point) {
    let delta = input.raw_scroll_delta.y;
    if delta > 0.0 {
        viewport.zoom_at(cursor, ZoomDirection::In);
    } else if delta < 0.0 {
        viewport.zoom_at(cursor, ZoomDirection::Out);
    }
}
