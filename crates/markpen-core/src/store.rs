//! Mark store and snapshot history.

use crate::mark::Mark;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Maximum number of undo snapshots to keep.
const MAX_UNDO_HISTORY: usize = 100;

/// A full, independent copy of the mark collection.
type Snapshot = Vec<Mark>;

/// The mark collection plus its undo/redo history.
///
/// Marks are kept in insertion order, which is also z-order: later
/// marks draw on top and are hit-tested first. The undo stack always
/// holds at least the baseline snapshot taken at creation, and the top
/// of the undo stack always equals the last committed state, so
/// committed mutations must be followed by exactly one `push_undo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkStore {
    /// All marks, back to front.
    pub marks: Vec<Mark>,
    /// Undo history, oldest first. Index 0 is the baseline.
    #[serde(skip)]
    undo_stack: Vec<Snapshot>,
    /// Redo history, most recently undone last.
    #[serde(skip)]
    redo_stack: Vec<Snapshot>,
}

impl Default for MarkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkStore {
    /// Create an empty store with its baseline snapshot.
    pub fn new() -> Self {
        Self {
            marks: Vec::new(),
            undo_stack: vec![Vec::new()],
            redo_stack: Vec::new(),
        }
    }

    /// Snapshot the current marks onto the undo stack.
    ///
    /// Call once after every committed mutation, never per drag frame.
    /// Clears the redo stack and evicts the oldest snapshot past the
    /// history cap.
    pub fn push_undo(&mut self) {
        self.undo_stack.push(self.marks.clone());
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last committed mutation.
    ///
    /// Returns false when only the baseline remains. The popped
    /// snapshot moves to the redo stack and the previous one becomes
    /// current.
    pub fn undo(&mut self) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        if let Some(current) = self.undo_stack.pop() {
            self.redo_stack.push(current);
        }
        if let Some(previous) = self.undo_stack.last() {
            self.marks = previous.clone();
        }
        true
    }

    /// Redo the most recently undone mutation.
    ///
    /// Returns false if the redo stack is empty. The restored snapshot
    /// goes back onto the undo stack and becomes current.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            self.marks = snapshot.clone();
            self.undo_stack.push(snapshot);
            true
        } else {
            false
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Append a mark on top of the z-order.
    pub fn add_mark(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Get a mark by index.
    pub fn get_mark(&self, index: usize) -> Option<&Mark> {
        self.marks.get(index)
    }

    /// Get a mark by index, mutably.
    pub fn get_mark_mut(&mut self, index: usize) -> Option<&mut Mark> {
        self.marks.get_mut(index)
    }

    /// Find the topmost mark containing the given image point.
    pub fn mark_at_point(&self, point: Point) -> Option<usize> {
        self.marks
            .iter()
            .enumerate()
            .rev()
            .find(|(_, mark)| mark.contains(point))
            .map(|(index, _)| index)
    }

    /// Indices of all selected marks, back to front.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, mark)| mark.is_selected)
            .map(|(index, _)| index)
            .collect()
    }

    /// Check if any mark is selected.
    pub fn has_selection(&self) -> bool {
        self.marks.iter().any(|mark| mark.is_selected)
    }

    /// Select exactly one mark, clearing every other selection.
    pub fn select_only(&mut self, index: usize) {
        for (i, mark) in self.marks.iter_mut().enumerate() {
            mark.is_selected = i == index;
        }
    }

    /// Clear all selections.
    pub fn clear_selection(&mut self) {
        for mark in &mut self.marks {
            mark.is_selected = false;
        }
    }

    /// Apply color and/or width to every selected mark.
    ///
    /// Returns true if at least one mark changed; callers must not push
    /// an undo snapshot otherwise.
    pub fn update_selected_style(&mut self, color: Option<&str>, line_width: Option<f64>) -> bool {
        let mut changed = false;
        for mark in self.marks.iter_mut().filter(|mark| mark.is_selected) {
            if let Some(color) = color {
                mark.color = color.to_string();
            }
            if let Some(line_width) = line_width {
                mark.line_width = line_width;
            }
            changed = true;
        }
        changed
    }

    /// Remove every selected mark.
    ///
    /// Returns true if any mark was removed.
    pub fn delete_selected(&mut self) -> bool {
        let before = self.marks.len();
        self.marks.retain(|mark| !mark.is_selected);
        self.marks.len() != before
    }

    /// Check if the store holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }
}
