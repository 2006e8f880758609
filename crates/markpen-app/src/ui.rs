//! Toolbar UI.

use markpen_core::session::Mode;

use crate::shortcuts::ShortcutRegistry;

/// Actions emitted by the toolbar, applied by the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    SetMode(Mode),
    SetColor([u8; 3]),
    SetLineWidth(f64),
    Undo,
    Redo,
    Fit,
    Save,
}

/// Read-only view of the app state the toolbar renders from.
pub struct ToolbarState<'a> {
    pub mode: Mode,
    pub color: [u8; 3],
    pub line_width: f64,
    pub can_undo: bool,
    pub can_redo: bool,
    pub scale: f64,
    pub status: &'a str,
}

pub fn toolbar(ui: &mut egui::Ui, state: &ToolbarState) -> Option<ToolbarAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        let mut mode = state.mode;
        ui.selectable_value(&mut mode, Mode::Move, "Move");
        ui.selectable_value(&mut mode, Mode::Select, "Select");
        ui.selectable_value(&mut mode, Mode::Mark, "Mark");
        if mode != state.mode {
            action = Some(ToolbarAction::SetMode(mode));
        }

        ui.separator();

        ui.label("Color:");
        let mut color = state.color;
        if ui.color_edit_button_srgb(&mut color).changed() {
            action = Some(ToolbarAction::SetColor(color));
        }

        ui.label("Width:");
        let mut line_width = state.line_width;
        if ui
            .add(egui::Slider::new(&mut line_width, 1.0..=20.0))
            .changed()
        {
            action = Some(ToolbarAction::SetLineWidth(line_width));
        }

        ui.separator();

        if ui
            .add_enabled(state.can_undo, egui::Button::new("Undo"))
            .clicked()
        {
            action = Some(ToolbarAction::Undo);
        }
        if ui
            .add_enabled(state.can_redo, egui::Button::new("Redo"))
            .clicked()
        {
            action = Some(ToolbarAction::Redo);
        }

        ui.separator();

        if ui.button("Fit").clicked() {
            action = Some(ToolbarAction::Fit);
        }
        if ui.button("Save PNG").clicked() {
            action = Some(ToolbarAction::Save);
        }

        ui.separator();

        ui.label(format!("Zoom: {:.0}%", state.scale * 100.0));
        if !state.status.is_empty() {
            ui.label(state.status);
        }

        ui.label("?").on_hover_ui(|ui| {
            for shortcut in ShortcutRegistry::all() {
                ui.label(format!("{:14} {}", shortcut.format(), shortcut.description));
            }
        });
    });

    action
}
