//! Interaction state machine for editing gestures.

use crate::input::{Key, Modifiers, MouseButton};
use crate::mark::{Mark, MarkStyle};
use crate::selection::{
    MoveState, ResizeState, apply_corner_resize, handle_hit_extent, hit_test_handles,
};
use crate::store::MarkStore;
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Minimum extent a creation drag must exceed on both axes, in image units.
pub const MIN_MARK_SIZE: f64 = 2.0;

/// Persistent editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    #[default]
    Move,
    Select,
    Mark,
}

/// Transient gesture state.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging out a new mark.
    Creating {
        /// Anchor corner in image coordinates.
        start: Point,
        /// Far corner in image coordinates.
        current: Point,
    },
    /// Dragging the canvas.
    Panning {
        /// Last pointer position in screen coordinates.
        last_screen: Point,
    },
    /// Dragging the selected marks.
    Moving(MoveState),
    /// Dragging a corner handle of a selected mark.
    Resizing(ResizeState),
}

/// The interaction session: persistent mode, transient gesture, and the
/// active pen style.
///
/// Pointer methods take screen coordinates and convert through the
/// viewport themselves; drag origins are captured in image space so a
/// zoom mid-drag keeps the anchoring intact.
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// Persistent mode, user- or auto-selected.
    pub mode: Mode,
    /// Gesture in progress.
    pub gesture: Gesture,
    /// Style applied to newly created marks.
    pub style: MarkStyle,
    /// Native size of the image being annotated.
    image_size: Size,
}

impl EditorSession {
    /// Create a session for an image of the given native size.
    pub fn new(image_size: Size) -> Self {
        Self {
            mode: Mode::default(),
            gesture: Gesture::default(),
            style: MarkStyle::default(),
            image_size,
        }
    }

    /// The mode pointer-downs dispatch on: a held modifier forces mark
    /// creation without changing the persistent mode.
    pub fn effective_mode(&self, modifiers: Modifiers) -> Mode {
        if modifiers.forces_mark() {
            Mode::Mark
        } else {
            self.mode
        }
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// The in-progress creation preview, if any.
    pub fn preview_mark(&self) -> Option<Mark> {
        if let Gesture::Creating { start, current } = &self.gesture {
            Some(Mark::new(*start, *current, &self.style))
        } else {
            None
        }
    }

    /// Switch the persistent mode.
    ///
    /// Abandons any gesture in progress (a creation preview is
    /// discarded; a drag returns the marks to their captured originals)
    /// and, when leaving select mode, clears all selections. Never
    /// pushes undo.
    pub fn set_mode(&mut self, store: &mut MarkStore, mode: Mode) {
        self.cancel_gesture(store);
        if self.mode == Mode::Select && mode != Mode::Select {
            store.clear_selection();
        }
        if self.mode != mode {
            log::debug!("mode switched to {mode:?}");
        }
        self.mode = mode;
    }

    /// Abandon the gesture in progress without committing.
    fn cancel_gesture(&mut self, store: &mut MarkStore) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Moving(state) => {
                for (index, original) in &state.originals {
                    if let Some(mark) = store.get_mark_mut(*index) {
                        *mark = original.clone();
                    }
                }
            }
            Gesture::Resizing(state) => {
                if let Some(mark) = store.get_mark_mut(state.mark_index) {
                    *mark = state.original.clone();
                }
            }
            Gesture::Idle | Gesture::Creating { .. } | Gesture::Panning { .. } => {}
        }
    }

    /// Handle a pointer press.
    pub fn pointer_down(
        &mut self,
        store: &mut MarkStore,
        viewport: &Viewport,
        screen_point: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) {
        if button != MouseButton::Left || self.is_active() {
            return;
        }
        let image_point = viewport.screen_to_image(screen_point);

        match self.effective_mode(modifiers) {
            Mode::Mark => {
                if self.in_image_bounds(image_point) {
                    self.gesture = Gesture::Creating {
                        start: image_point,
                        current: image_point,
                    };
                }
            }
            Mode::Select => {
                // Handles take priority over body hits.
                let extent = handle_hit_extent(viewport.scale);
                for index in store.selected_indices() {
                    let Some(mark) = store.get_mark(index) else {
                        continue;
                    };
                    if let Some(corner) = hit_test_handles(mark, image_point, extent) {
                        self.gesture = Gesture::Resizing(ResizeState::new(
                            index,
                            corner,
                            image_point,
                            mark.clone(),
                        ));
                        return;
                    }
                }

                if let Some(index) = store.mark_at_point(image_point) {
                    store.select_only(index);
                    let originals = store
                        .selected_indices()
                        .into_iter()
                        .filter_map(|i| store.get_mark(i).map(|mark| (i, mark.clone())))
                        .collect();
                    self.gesture = Gesture::Moving(MoveState::new(image_point, originals));
                } else {
                    store.clear_selection();
                }
            }
            Mode::Move => {
                if let Some(index) = store.mark_at_point(image_point) {
                    // Select on this click; the drag starts on the next one.
                    store.select_only(index);
                    self.mode = Mode::Select;
                    log::debug!("mode switched to Select");
                } else {
                    self.gesture = Gesture::Panning {
                        last_screen: screen_point,
                    };
                }
            }
        }
    }

    /// Handle a pointer move.
    pub fn pointer_move(
        &mut self,
        store: &mut MarkStore,
        viewport: &mut Viewport,
        screen_point: Point,
    ) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Creating { current, .. } => {
                *current = viewport.screen_to_image(screen_point);
            }
            Gesture::Panning { last_screen } => {
                viewport.pan(screen_point - *last_screen);
                *last_screen = screen_point;
            }
            Gesture::Moving(state) => {
                state.current_point = viewport.screen_to_image(screen_point);
                apply_move_drag(store, state);
            }
            Gesture::Resizing(state) => {
                state.current_point = viewport.screen_to_image(screen_point);
                apply_resize_drag(store, state);
            }
        }
    }

    /// Handle a pointer release.
    ///
    /// Finalizes the gesture: commits a creation above the minimum
    /// size, pushes one undo snapshot for finished move/resize drags,
    /// and never pushes for a pan.
    pub fn pointer_up(
        &mut self,
        store: &mut MarkStore,
        viewport: &mut Viewport,
        screen_point: Point,
        button: MouseButton,
    ) {
        if button != MouseButton::Left {
            return;
        }

        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Creating { start, .. } => {
                let end = viewport.screen_to_image(screen_point);
                let mark = Mark::new(start, end, &self.style);
                if mark.width() > MIN_MARK_SIZE && mark.height() > MIN_MARK_SIZE {
                    log::debug!("created mark at {:?}", mark.bounds());
                    store.add_mark(mark);
                    store.push_undo();
                }
                if self.mode == Mode::Mark {
                    self.set_mode(store, Mode::Move);
                }
            }
            Gesture::Panning { last_screen } => {
                viewport.pan(screen_point - last_screen);
            }
            Gesture::Moving(mut state) => {
                state.current_point = viewport.screen_to_image(screen_point);
                apply_move_drag(store, &state);
                store.push_undo();
            }
            Gesture::Resizing(mut state) => {
                state.current_point = viewport.screen_to_image(screen_point);
                apply_resize_drag(store, &state);
                store.push_undo();
            }
        }
    }

    /// Handle an editing key.
    pub fn key_down(&mut self, store: &mut MarkStore, key: Key) {
        match key {
            Key::Escape => self.set_mode(store, Mode::Move),
            Key::Delete | Key::Backspace => {
                if self.mode == Mode::Select && store.delete_selected() {
                    log::debug!("deleted selection");
                    store.push_undo();
                }
            }
        }
    }

    /// Update the active style and restyle the selection.
    ///
    /// Passing `None` leaves that attribute alone. When at least one
    /// mark is selected the edit is committed with an undo snapshot;
    /// otherwise only the pen changes.
    pub fn apply_style(
        &mut self,
        store: &mut MarkStore,
        color: Option<&str>,
        line_width: Option<f64>,
    ) {
        if let Some(color) = color {
            self.style.color = color.to_string();
        }
        if let Some(line_width) = line_width {
            self.style.line_width = line_width;
        }
        if store.update_selected_style(color, line_width) {
            store.push_undo();
        }
    }

    fn in_image_bounds(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.image_size.width
            && point.y <= self.image_size.height
    }
}

/// Reposition every dragged mark from its own captured origin.
fn apply_move_drag(store: &mut MarkStore, state: &MoveState) {
    let delta = state.delta();
    for (index, original) in &state.originals {
        if let Some(mark) = store.get_mark_mut(*index) {
            let mut updated = original.clone();
            updated.translate(delta);
            *mark = updated;
        }
    }
}

/// Reshape the dragged mark from its captured origin.
fn apply_resize_drag(store: &mut MarkStore, state: &ResizeState) {
    if let Some(mark) = store.get_mark_mut(state.mark_index) {
        *mark = apply_corner_resize(&state.original, state.corner, state.delta());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::{DEFAULT_COLOR, DEFAULT_LINE_WIDTH};

    fn setup() -> (EditorSession, MarkStore, Viewport) {
        (
            EditorSession::new(Size::new(1000.0, 800.0)),
            MarkStore::new(),
            Viewport::new(),
        )
    }

    fn press(
        session: &mut EditorSession,
        store: &mut MarkStore,
        viewport: &Viewport,
        x: f64,
        y: f64,
    ) {
        session.pointer_down(
            store,
            viewport,
            Point::new(x, y),
            MouseButton::Left,
            Modifiers::default(),
        );
    }

    fn drag_to(
        session: &mut EditorSession,
        store: &mut MarkStore,
        viewport: &mut Viewport,
        x: f64,
        y: f64,
    ) {
        session.pointer_move(store, viewport, Point::new(x, y));
    }

    fn release(
        session: &mut EditorSession,
        store: &mut MarkStore,
        viewport: &mut Viewport,
        x: f64,
        y: f64,
    ) {
        session.pointer_up(store, viewport, Point::new(x, y), MouseButton::Left);
    }

    fn create_mark(
        session: &mut EditorSession,
        store: &mut MarkStore,
        viewport: &mut Viewport,
        from: (f64, f64),
        to: (f64, f64),
    ) {
        session.set_mode(store, Mode::Mark);
        press(session, store, viewport, from.0, from.1);
        drag_to(session, store, viewport, to.0, to.1);
        release(session, store, viewport, to.0, to.1);
    }

    #[test]
    fn test_create_mark_by_drag() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));

        assert_eq!(store.len(), 1);
        let mark = &store.marks[0];
        assert!((mark.x1 - 10.0).abs() < f64::EPSILON);
        assert!((mark.y1 - 10.0).abs() < f64::EPSILON);
        assert!((mark.x2 - 50.0).abs() < f64::EPSILON);
        assert!((mark.y2 - 40.0).abs() < f64::EPSILON);
        assert_eq!(mark.color, DEFAULT_COLOR);
        assert!((mark.line_width - DEFAULT_LINE_WIDTH).abs() < f64::EPSILON);
        assert!(store.can_undo());
        // Mark mode reverts to move after the drag.
        assert_eq!(session.mode, Mode::Move);
    }

    #[test]
    fn test_tiny_drag_commits_nothing() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (11.0, 11.0));

        assert!(store.is_empty());
        assert!(!store.can_undo());
        assert_eq!(session.mode, Mode::Move);
    }

    #[test]
    fn test_threshold_requires_both_axes() {
        let (mut session, mut store, mut viewport) = setup();
        // Wide enough, not tall enough.
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 11.5));
        assert!(store.is_empty());
    }

    #[test]
    fn test_modifier_forces_creation_without_mode_change() {
        let (mut session, mut store, mut viewport) = setup();
        assert_eq!(session.mode, Mode::Move);

        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        session.pointer_down(
            &mut store,
            &viewport,
            Point::new(10.0, 10.0),
            MouseButton::Left,
            shift,
        );
        assert!(matches!(session.gesture, Gesture::Creating { .. }));
        drag_to(&mut session, &mut store, &mut viewport, 40.0, 40.0);
        release(&mut session, &mut store, &mut viewport, 40.0, 40.0);

        assert_eq!(store.len(), 1);
        // The persistent mode never changed, so there is nothing to revert.
        assert_eq!(session.mode, Mode::Move);
    }

    #[test]
    fn test_creation_outside_image_ignored() {
        let (mut session, mut store, mut viewport) = setup();
        session.set_mode(&mut store, Mode::Mark);
        press(&mut session, &mut store, &viewport, 1200.0, 40.0);
        assert!(!session.is_active());
        release(&mut session, &mut store, &mut viewport, 1300.0, 80.0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_preview_follows_drag() {
        let (mut session, mut store, mut viewport) = setup();
        session.set_mode(&mut store, Mode::Mark);
        assert!(session.preview_mark().is_none());

        press(&mut session, &mut store, &viewport, 10.0, 10.0);
        drag_to(&mut session, &mut store, &mut viewport, 30.0, 20.0);
        let preview = session.preview_mark().unwrap();
        assert!((preview.x2 - 30.0).abs() < f64::EPSILON);
        assert!((preview.y2 - 20.0).abs() < f64::EPSILON);
        // Previews never touch the store.
        assert!(store.is_empty());
    }

    #[test]
    fn test_resize_handle_drag() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        store.select_only(0);
        session.set_mode(&mut store, Mode::Select);

        press(&mut session, &mut store, &viewport, 50.0, 40.0);
        assert!(matches!(session.gesture, Gesture::Resizing(_)));
        drag_to(&mut session, &mut store, &mut viewport, 70.0, 45.0);
        release(&mut session, &mut store, &mut viewport, 70.0, 45.0);

        let mark = &store.marks[0];
        assert!((mark.x1 - 10.0).abs() < f64::EPSILON);
        assert!((mark.y1 - 10.0).abs() < f64::EPSILON);
        assert!((mark.x2 - 70.0).abs() < f64::EPSILON);
        assert!((mark.y2 - 45.0).abs() < f64::EPSILON);

        // Exactly one snapshot from the resize: one undo returns to the
        // pre-resize mark, a second to the empty baseline.
        assert!(store.undo());
        assert!((store.marks[0].x2 - 50.0).abs() < f64::EPSILON);
        assert!(store.undo());
        assert!(store.is_empty());
        assert!(!store.undo());
    }

    #[test]
    fn test_resize_flips_past_opposite_corner() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        store.select_only(0);
        session.set_mode(&mut store, Mode::Select);

        press(&mut session, &mut store, &viewport, 10.0, 10.0);
        drag_to(&mut session, &mut store, &mut viewport, 80.0, 70.0);
        release(&mut session, &mut store, &mut viewport, 80.0, 70.0);

        let mark = &store.marks[0];
        assert!((mark.x1 - 80.0).abs() < f64::EPSILON);
        assert!((mark.y1 - 70.0).abs() < f64::EPSILON);
        assert!((mark.x2 - 50.0).abs() < f64::EPSILON);
        assert!((mark.y2 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_drag_shifts_selection() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        session.set_mode(&mut store, Mode::Select);

        // Grab the body at the center, away from any handle.
        press(&mut session, &mut store, &viewport, 30.0, 25.0);
        assert!(matches!(session.gesture, Gesture::Moving(_)));
        drag_to(&mut session, &mut store, &mut viewport, 35.0, 30.0);
        drag_to(&mut session, &mut store, &mut viewport, 40.0, 35.0);
        release(&mut session, &mut store, &mut viewport, 40.0, 35.0);

        let mark = &store.marks[0];
        assert!((mark.x1 - 20.0).abs() < f64::EPSILON);
        assert!((mark.y1 - 20.0).abs() < f64::EPSILON);
        assert!((mark.x2 - 60.0).abs() < f64::EPSILON);
        assert!((mark.y2 - 50.0).abs() < f64::EPSILON);

        // Intermediate frames never pushed: one undo reaches the
        // unmoved mark.
        assert!(store.undo());
        assert!((store.marks[0].x1 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_is_idempotent_from_origins() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        session.set_mode(&mut store, Mode::Select);

        press(&mut session, &mut store, &viewport, 30.0, 25.0);
        // Repeating the same target point must not accumulate.
        drag_to(&mut session, &mut store, &mut viewport, 45.0, 40.0);
        drag_to(&mut session, &mut store, &mut viewport, 45.0, 40.0);
        release(&mut session, &mut store, &mut viewport, 45.0, 40.0);

        assert!((store.marks[0].x1 - 25.0).abs() < f64::EPSILON);
        assert!((store.marks[0].y1 - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_click_selects_topmost() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (0.0, 0.0), (100.0, 100.0));
        create_mark(&mut session, &mut store, &mut viewport, (20.0, 20.0), (80.0, 80.0));
        session.set_mode(&mut store, Mode::Select);

        press(&mut session, &mut store, &viewport, 50.0, 50.0);
        release(&mut session, &mut store, &mut viewport, 50.0, 50.0);

        assert!(!store.marks[0].is_selected);
        assert!(store.marks[1].is_selected);
    }

    #[test]
    fn test_select_click_miss_clears_selection() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        store.select_only(0);
        session.set_mode(&mut store, Mode::Select);

        press(&mut session, &mut store, &viewport, 500.0, 500.0);
        assert!(!session.is_active());
        assert!(!store.has_selection());
    }

    #[test]
    fn test_move_click_on_mark_switches_to_select() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        assert_eq!(session.mode, Mode::Move);

        press(&mut session, &mut store, &viewport, 30.0, 25.0);
        // Selection happens on this click; no drag starts.
        assert_eq!(session.mode, Mode::Select);
        assert!(store.marks[0].is_selected);
        assert!(!session.is_active());
    }

    #[test]
    fn test_move_drag_on_empty_pans() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));

        press(&mut session, &mut store, &viewport, 500.0, 500.0);
        assert!(matches!(session.gesture, Gesture::Panning { .. }));
        drag_to(&mut session, &mut store, &mut viewport, 520.0, 490.0);
        release(&mut session, &mut store, &mut viewport, 530.0, 480.0);

        assert!((viewport.offset.x - 30.0).abs() < f64::EPSILON);
        assert!((viewport.offset.y - -20.0).abs() < f64::EPSILON);
        // Panning never enters history.
        assert!(store.undo());
        assert!(store.is_empty());
    }

    #[test]
    fn test_escape_cancels_creation_and_returns_to_move() {
        let (mut session, mut store, mut viewport) = setup();
        session.set_mode(&mut store, Mode::Mark);
        press(&mut session, &mut store, &viewport, 10.0, 10.0);
        drag_to(&mut session, &mut store, &mut viewport, 60.0, 60.0);

        session.key_down(&mut store, Key::Escape);
        assert_eq!(session.mode, Mode::Move);
        assert!(session.preview_mark().is_none());

        // The release of the abandoned drag commits nothing.
        release(&mut session, &mut store, &mut viewport, 60.0, 60.0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_leaving_select_clears_selection_without_push() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        store.select_only(0);
        session.set_mode(&mut store, Mode::Select);

        session.set_mode(&mut store, Mode::Move);
        assert!(!store.has_selection());
        // One undo steps over the creation; the deselection was not a
        // separate snapshot.
        assert!(store.undo());
        assert!(store.is_empty());
    }

    #[test]
    fn test_mode_switch_mid_drag_restores_originals() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        session.set_mode(&mut store, Mode::Select);

        press(&mut session, &mut store, &viewport, 30.0, 25.0);
        drag_to(&mut session, &mut store, &mut viewport, 90.0, 85.0);
        session.key_down(&mut store, Key::Escape);

        let mark = &store.marks[0];
        assert!((mark.x1 - 10.0).abs() < f64::EPSILON);
        assert!((mark.y1 - 10.0).abs() < f64::EPSILON);
        assert!(!session.is_active());
    }

    #[test]
    fn test_delete_key_in_select_mode() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        store.select_only(0);
        session.set_mode(&mut store, Mode::Select);

        session.key_down(&mut store, Key::Delete);
        assert!(store.is_empty());

        assert!(store.undo());
        assert_eq!(store.len(), 1);
        assert!((store.marks[0].x2 - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_key_outside_select_mode_is_noop() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        store.select_only(0);
        assert_eq!(session.mode, Mode::Move);

        session.key_down(&mut store, Key::Backspace);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_style_edit_with_selection_pushes_once() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        store.select_only(0);

        session.apply_style(&mut store, Some("#00ff00"), None);
        assert_eq!(store.marks[0].color, "#00ff00");
        assert_eq!(session.style.color, "#00ff00");

        assert!(store.undo());
        assert_eq!(store.marks[0].color, DEFAULT_COLOR);
    }

    #[test]
    fn test_style_edit_without_selection_changes_pen_only() {
        let (mut session, mut store, mut viewport) = setup();
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));

        session.apply_style(&mut store, None, Some(7.0));
        assert!((session.style.line_width - 7.0).abs() < f64::EPSILON);
        assert!((store.marks[0].line_width - DEFAULT_LINE_WIDTH).abs() < f64::EPSILON);
        // No snapshot was pushed: a single undo reaches the baseline.
        assert!(store.undo());
        assert!(store.is_empty());
    }

    #[test]
    fn test_pointer_down_with_zoomed_viewport() {
        let (mut session, mut store, mut viewport) = setup();
        viewport.scale = 2.0;
        viewport.offset = kurbo::Vec2::new(100.0, 50.0);

        session.set_mode(&mut store, Mode::Mark);
        // Screen (120, 70) maps to image (10, 10).
        press(&mut session, &mut store, &viewport, 120.0, 70.0);
        drag_to(&mut session, &mut store, &mut viewport, 200.0, 130.0);
        release(&mut session, &mut store, &mut viewport, 200.0, 130.0);

        let mark = &store.marks[0];
        assert!((mark.x1 - 10.0).abs() < f64::EPSILON);
        assert!((mark.y1 - 10.0).abs() < f64::EPSILON);
        assert!((mark.x2 - 50.0).abs() < f64::EPSILON);
        assert!((mark.y2 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_handle_priority_over_body() {
        let (mut session, mut store, mut viewport) = setup();
        // Two overlapping marks; the lower one is selected and its
        // handle sits inside the upper one's body.
        create_mark(&mut session, &mut store, &mut viewport, (10.0, 10.0), (50.0, 40.0));
        create_mark(&mut session, &mut store, &mut viewport, (40.0, 30.0), (90.0, 70.0));
        store.select_only(0);
        session.set_mode(&mut store, Mode::Select);

        press(&mut session, &mut store, &viewport, 50.0, 40.0);
        match &session.gesture {
            Gesture::Resizing(state) => assert_eq!(state.mark_index, 0),
            other => panic!("expected resize, got {other:?}"),
        }
    }
}
