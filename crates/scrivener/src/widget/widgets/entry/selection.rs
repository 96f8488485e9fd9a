//! Selection state machine.
//!
//! A selection is an anchor, where it started, and an active end, which
//! follows the pointer or the keyboard. Reads are normalised so callers never
//! care which end came first. A selection whose ends meet is no selection.

use std::ops::Range;

use scrivener_core::logging::targets;

use super::text_model::TextBuffer;

/// A caret location: row, then codepoint column within that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CursorPosition {
    pub row: usize,
    pub column: usize,
}

impl CursorPosition {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Whether a pointer drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting,
}

/// Tracks the selection of a text entry.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    /// `(anchor, active)`.
    ends: Option<(CursorPosition, CursorPosition)>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Pointer transitions
    // =========================================================================

    /// Start a drag at `pos`, dropping any previous selection.
    pub fn pointer_down(&mut self, pos: CursorPosition) {
        self.state = SelectionState::Selecting;
        self.ends = Some((pos, pos));
        tracing::trace!(target: targets::ENTRY, ?pos, "selection drag started");
    }

    /// Start a drag that keeps the current anchor and moves the active end to `pos`.
    ///
    /// Without a selection, `before` becomes the anchor.
    pub fn pointer_extend(&mut self, before: CursorPosition, pos: CursorPosition) {
        let anchor = self.ends.map_or(before, |(anchor, _)| anchor);
        self.state = SelectionState::Selecting;
        self.ends = Some((anchor, pos));
        tracing::trace!(target: targets::ENTRY, ?anchor, ?pos, "selection drag extended");
    }

    /// Move the active end of a drag. Returns `false` when no drag is in progress.
    pub fn pointer_drag(&mut self, pos: CursorPosition) -> bool {
        if self.state != SelectionState::Selecting {
            return false;
        }
        let anchor = self.ends.map_or(pos, |(anchor, _)| anchor);
        self.ends = Some((anchor, pos));
        true
    }

    /// Finish a drag. A drag that never left its anchor leaves no selection.
    pub fn pointer_up(&mut self) {
        if self.state != SelectionState::Selecting {
            return;
        }
        self.state = SelectionState::Idle;
        self.drop_if_empty();
        tracing::trace!(target: targets::ENTRY, range = ?self.range(), "selection drag finished");
    }

    // =========================================================================
    // Programmatic transitions
    // =========================================================================

    /// Replace the selection with `[start, end)` and stop any drag.
    pub fn select_region(&mut self, start: CursorPosition, end: CursorPosition) {
        self.state = SelectionState::Idle;
        self.ends = Some((start, end));
        self.drop_if_empty();
    }

    /// Move the active end to `after`. Without a selection, `before` becomes the anchor.
    pub fn extend(&mut self, before: CursorPosition, after: CursorPosition) {
        let anchor = self.ends.map_or(before, |(anchor, _)| anchor);
        self.ends = Some((anchor, after));
        if self.state == SelectionState::Idle {
            self.drop_if_empty();
        }
        tracing::trace!(target: targets::ENTRY, ?anchor, active = ?after, "selection extended");
    }

    /// Select from the start of the text to `end`.
    pub fn select_all(&mut self, end: CursorPosition) {
        self.select_region(CursorPosition::default(), end);
    }

    /// Drop the selection and stop any drag.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
        self.ends = None;
    }

    fn drop_if_empty(&mut self) {
        if matches!(self.ends, Some((anchor, active)) if anchor == active) {
            self.ends = None;
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Whether a pointer drag is in progress.
    pub fn is_selecting(&self) -> bool {
        self.state == SelectionState::Selecting
    }

    pub fn anchor(&self) -> Option<CursorPosition> {
        self.ends.map(|(anchor, _)| anchor)
    }

    pub fn active(&self) -> Option<CursorPosition> {
        self.ends.map(|(_, active)| active)
    }

    /// The selected span as `(low, high)`, or `None` when nothing is selected.
    pub fn range(&self) -> Option<(CursorPosition, CursorPosition)> {
        let (anchor, active) = self.ends?;
        match anchor.cmp(&active) {
            std::cmp::Ordering::Less => Some((anchor, active)),
            std::cmp::Ordering::Greater => Some((active, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.range().is_some()
    }

    // =========================================================================
    // Buffer operations
    // =========================================================================

    /// The selection as a codepoint range of `buffer`.
    pub fn index_range(&self, buffer: &TextBuffer) -> Option<Range<usize>> {
        let (low, high) = self.range()?;
        Some(buffer.index_of(low)..buffer.index_of(high))
    }

    /// The selected text, line breaks included. Empty when nothing is selected.
    pub fn selected_text(&self, buffer: &TextBuffer) -> String {
        self.index_range(buffer)
            .map(|range| buffer.slice(range))
            .unwrap_or_default()
    }

    /// Delete the selected text and clear the selection.
    ///
    /// Returns where the caret belongs afterwards, or `None` if nothing was selected.
    pub fn erase_selection(&mut self, buffer: &mut TextBuffer) -> Option<CursorPosition> {
        let range = self.index_range(buffer)?;
        let start = range.start;
        buffer.remove(range);
        self.clear();
        Some(buffer.position_of(start))
    }

    /// Clamp both ends onto `buffer` after its text changed underneath.
    pub fn clamp_to(&mut self, buffer: &TextBuffer) {
        if let Some((anchor, active)) = self.ends {
            self.ends = Some((buffer.clamp(anchor), buffer.clamp(active)));
            if self.state == SelectionState::Idle {
                self.drop_if_empty();
            }
        }
    }
}
