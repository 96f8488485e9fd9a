//! Text entry widget.
//!
//! [`Entry`] edits plain text in one row or many. The pointer places the
//! caret, drags out selections and double-click selects words or runs of
//! whitespace; the keyboard moves by grapheme, word and row, edits, and drives
//! clipboard shortcuts.
//!
//! # Example
//!
//! ```ignore
//! use scrivener::widget::{WidgetContext, widgets::Entry};
//!
//! let ctx = WidgetContext::default();
//! let mut entry = Entry::multi_line(&ctx).with_placeholder("Notes");
//!
//! entry.text_changed.connect(|text| {
//!     println!("now {} chars", text.chars().count());
//! });
//!
//! entry.set_text("Testing\nTesting");
//! entry.select_all();
//! assert_eq!(entry.selected_text(), "Testing\nTesting");
//! ```
//!
//! # Signals
//!
//! - `text_changed(String)`: the text was edited or replaced
//! - `cursor_changed(CursorPosition)`: the caret moved
//! - `selection_changed(Option<(usize, usize)>)`: the selected codepoint range changed
//! - `submitted(String)`: Enter was pressed in a single-line entry

pub mod position;
pub mod region;
mod render;
pub mod selection;
pub mod text_model;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use scrivener_core::logging::targets;
use scrivener_core::{Object, ObjectId, Signal};
use scrivener_render::{Point, Size};

pub use position::{LayoutMetrics, pixel_to_position, position_to_pixel};
pub use region::{RegionKind, TextRegion, WordSeparators, text_region_at};
pub use render::PASSWORD_CHAR;
pub use selection::{CursorPosition, SelectionController, SelectionState};
pub use text_model::TextBuffer;

use self::render::EntryLayout;
use self::text_model::is_line_break;
use crate::platform::{Clipboard, ClipboardError};
use crate::widget::base::WidgetBase;
use crate::widget::context::WidgetContext;
use crate::widget::cursor::CursorShape;
use crate::widget::events::{
    Key, KeyPressEvent, KeyReleaseEvent, MouseButton, MouseDoubleClickEvent, MouseMoveEvent,
    MousePressEvent, MouseReleaseEvent, WidgetEvent,
};
use crate::widget::geometry::SizeHint;
use crate::widget::traits::{PaintContext, Widget};

/// How the text is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoMode {
    /// Show the text as typed.
    #[default]
    Normal,
    /// Mask every codepoint with [`PASSWORD_CHAR`]. Copy and cut are refused.
    Password,
}

/// Clipboard and selection shortcuts an entry understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Copy,
    Cut,
    Paste,
    SelectAll,
}

/// Caret movements driven by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Left,
    Right,
    WordLeft,
    WordRight,
    Up,
    Down,
    RowStart,
    RowEnd,
    FirstRow,
    LastRow,
    TextStart,
    TextEnd,
}

/// State compared before and after an operation to decide what to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    revision: u64,
    cursor: CursorPosition,
    selection: Option<(usize, usize)>,
}

/// A single- or multi-line text entry.
pub struct Entry {
    base: WidgetBase,
    ctx: WidgetContext,
    buffer: TextBuffer,
    /// Bumped on every edit of `buffer`.
    revision: u64,
    cursor: CursorPosition,
    selection: SelectionController,
    separators: WordSeparators,
    multi_line: bool,
    echo_mode: EchoMode,
    read_only: bool,
    placeholder: String,
    /// A Shift key is down, as reported by key press/release events.
    shift_held: bool,
    layout: RwLock<Option<EntryLayout>>,

    /// Emitted with the full text after it changes.
    pub text_changed: Signal<String>,
    /// Emitted when the caret moves.
    pub cursor_changed: Signal<CursorPosition>,
    /// Emitted with the selected codepoint range when it changes.
    pub selection_changed: Signal<Option<(usize, usize)>>,
    /// Emitted with the text when Enter is pressed in a single-line entry.
    pub submitted: Signal<String>,
}

impl Entry {
    /// Create an empty single-line entry.
    pub fn new(ctx: &WidgetContext) -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        Self {
            base,
            ctx: ctx.clone(),
            buffer: TextBuffer::new(),
            revision: 0,
            cursor: CursorPosition::default(),
            selection: SelectionController::new(),
            separators: WordSeparators::default(),
            multi_line: false,
            echo_mode: EchoMode::Normal,
            read_only: false,
            placeholder: String::new(),
            shift_held: false,
            layout: RwLock::new(None),
            text_changed: Signal::new(),
            cursor_changed: Signal::new(),
            selection_changed: Signal::new(),
            submitted: Signal::new(),
        }
    }

    /// Create an empty multi-line entry.
    pub fn multi_line(ctx: &WidgetContext) -> Self {
        let mut entry = Self::new(ctx);
        entry.multi_line = true;
        entry
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_echo_mode(mut self, mode: EchoMode) -> Self {
        self.set_echo_mode(mode);
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Use `separators` to split words on double-click.
    pub fn with_separators(mut self, separators: WordSeparators) -> Self {
        self.separators = separators;
        self
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn is_multi_line(&self) -> bool {
        self.multi_line
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
        self.base.update();
    }

    pub fn echo_mode(&self) -> EchoMode {
        self.echo_mode
    }

    pub fn set_echo_mode(&mut self, mode: EchoMode) {
        if self.echo_mode != mode {
            self.echo_mode = mode;
            self.invalidate_layout();
            self.base.update();
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn separators(&self) -> &WordSeparators {
        &self.separators
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// The full text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replace the text.
    ///
    /// Line breaks are kept even in single-line entries. The selection is
    /// dropped and the caret clamped onto the new text.
    pub fn set_text(&mut self, text: &str) {
        let before = self.snapshot();
        self.buffer.set_text(text);
        self.revision += 1;
        self.selection.clear();
        self.cursor = self.buffer.clamp(self.cursor);
        tracing::debug!(target: targets::ENTRY, len = self.buffer.len_chars(), "text replaced");
        self.finish(before);
    }

    /// Insert `text` at the caret, replacing the selection.
    ///
    /// Single-line entries turn line breaks into spaces. Returns `false` for
    /// read-only entries.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if self.read_only {
            return false;
        }
        let text = if self.multi_line {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(flatten_line_breaks(text))
        };

        let before = self.snapshot();
        if let Some(caret) = self.selection.erase_selection(&mut self.buffer) {
            self.cursor = caret;
        }
        self.selection.clear();
        let index = self.buffer.index_of(self.cursor);
        let inserted = self.buffer.insert(index, &text);
        self.cursor = self.buffer.position_of(index + inserted);
        self.revision += 1;
        self.finish(before);
        true
    }

    // =========================================================================
    // Caret
    // =========================================================================

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor.row
    }

    pub fn cursor_column(&self) -> usize {
        self.cursor.column
    }

    /// Move the caret. The position is clamped; the selection is left alone.
    pub fn set_cursor(&mut self, pos: CursorPosition) {
        let before = self.snapshot();
        self.cursor = self.buffer.clamp(pos);
        self.finish(before);
    }

    /// The text position under a widget-local point.
    pub fn position_at(&self, point: Point) -> CursorPosition {
        self.with_layout(|layout| {
            pixel_to_position(point, &layout.rows, self.ctx.measurer.as_ref(), &layout.metrics)
        })
    }

    /// The widget-local top-left corner of the caret.
    pub fn caret_position(&self) -> Point {
        self.with_layout(|layout| {
            position_to_pixel(self.cursor, &layout.rows, self.ctx.measurer.as_ref(), &layout.metrics)
        })
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selected text, or an empty string.
    pub fn selected_text(&self) -> String {
        self.selection.selected_text(&self.buffer)
    }

    /// The selected codepoint range `(start, end)`.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
            .index_range(&self.buffer)
            .map(|range| (range.start, range.end))
    }

    /// Whether a pointer drag selection is in progress.
    pub fn is_selecting(&self) -> bool {
        self.selection.is_selecting()
    }

    /// Select all text and put the caret at the end.
    pub fn select_all(&mut self) {
        let before = self.snapshot();
        let end = self.buffer.end_position();
        self.selection.select_all(end);
        self.cursor = end;
        self.finish(before);
    }

    pub fn clear_selection(&mut self) {
        let before = self.snapshot();
        self.selection.clear();
        self.finish(before);
    }

    /// Delete the selected text. Returns `false` if nothing was erased.
    pub fn erase_selection(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        let before = self.snapshot();
        let Some(caret) = self.selection.erase_selection(&mut self.buffer) else {
            return false;
        };
        self.cursor = caret;
        self.revision += 1;
        self.finish(before);
        true
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    /// Insert the clipboard's text at the caret.
    ///
    /// An empty or unreadable clipboard leaves the entry untouched.
    pub fn paste_from_clipboard(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        match clipboard.content() {
            Ok(text) if text.is_empty() => false,
            Ok(text) => self.insert_text(&text),
            Err(ClipboardError::Empty) => false,
            Err(err) => {
                tracing::warn!(target: targets::CLIPBOARD, %err, "paste failed");
                false
            }
        }
    }

    /// Copy the selection. Password entries never copy.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> bool {
        if self.echo_mode == EchoMode::Password || !self.selection.has_selection() {
            return false;
        }
        match clipboard.set_content(&self.selected_text()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(target: targets::CLIPBOARD, %err, "copy failed");
                false
            }
        }
    }

    /// Copy the selection, then erase it.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.read_only || !self.copy(clipboard) {
            return false;
        }
        self.erase_selection()
    }

    /// Run a clipboard or selection shortcut against `clipboard`.
    pub fn typed_shortcut(&mut self, shortcut: Shortcut, clipboard: &mut dyn Clipboard) -> bool {
        match shortcut {
            Shortcut::Copy => self.copy(clipboard),
            Shortcut::Cut => self.cut(clipboard),
            Shortcut::Paste => self.paste_from_clipboard(clipboard),
            Shortcut::SelectAll => {
                self.select_all();
                true
            }
        }
    }

    fn run_shortcut(&mut self, shortcut: Shortcut) -> bool {
        let clipboard = Arc::clone(&self.ctx.clipboard);
        let mut clipboard = clipboard.lock();
        self.typed_shortcut(shortcut, &mut *clipboard)
    }

    // =========================================================================
    // Change tracking
    // =========================================================================

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            cursor: self.cursor,
            selection: self.selection(),
        }
    }

    /// Announce whatever changed since `before` and schedule a repaint.
    fn finish(&mut self, before: Snapshot) {
        let after = self.snapshot();
        if after == before {
            return;
        }
        if after.revision != before.revision {
            self.invalidate_layout();
            self.text_changed.emit(self.buffer.text());
        }
        if after.cursor != before.cursor {
            self.cursor_changed.emit(after.cursor);
        }
        if after.selection != before.selection {
            self.selection_changed.emit(after.selection);
        }
        self.base.update();
    }

    // =========================================================================
    // Keyboard navigation and editing
    // =========================================================================

    fn target_of(&self, motion: Motion) -> CursorPosition {
        let CursorPosition { row, column } = self.cursor;
        let buffer = &self.buffer;
        let row_len = buffer.row_len(row);
        match motion {
            Motion::Left | Motion::WordLeft if column == 0 => match row.checked_sub(1) {
                Some(prev) => CursorPosition::new(prev, buffer.row_len(prev)),
                None => self.cursor,
            },
            Motion::Right | Motion::WordRight if column >= row_len => {
                if row < buffer.last_row() {
                    CursorPosition::new(row + 1, 0)
                } else {
                    self.cursor
                }
            }
            Motion::Left => CursorPosition::new(row, buffer.prev_grapheme_column(row, column)),
            Motion::Right => CursorPosition::new(row, buffer.next_grapheme_column(row, column)),
            Motion::WordLeft => CursorPosition::new(row, buffer.prev_word_column(row, column)),
            Motion::WordRight => CursorPosition::new(row, buffer.next_word_column(row, column)),
            Motion::Up if row == 0 => CursorPosition::new(0, 0),
            Motion::Down if row >= buffer.last_row() => CursorPosition::new(row, row_len),
            Motion::Up | Motion::Down => {
                let target = if motion == Motion::Up { row - 1 } else { row + 1 };
                self.with_layout(|layout| {
                    let metrics = &layout.metrics;
                    let caret = position_to_pixel(
                        self.cursor,
                        &layout.rows,
                        self.ctx.measurer.as_ref(),
                        metrics,
                    );
                    let y = metrics.padding + (target as f32 + 0.5) * metrics.row_height;
                    pixel_to_position(
                        Point::new(caret.x, y),
                        &layout.rows,
                        self.ctx.measurer.as_ref(),
                        metrics,
                    )
                })
            }
            Motion::RowStart => CursorPosition::new(row, 0),
            Motion::RowEnd => CursorPosition::new(row, row_len),
            Motion::FirstRow => buffer.clamp(CursorPosition::new(0, column)),
            Motion::LastRow => buffer.clamp(CursorPosition::new(buffer.last_row(), column)),
            Motion::TextStart => CursorPosition::new(0, 0),
            Motion::TextEnd => buffer.end_position(),
        }
    }

    /// Move the caret, extending the selection when `extend` is set.
    fn move_cursor(&mut self, motion: Motion, extend: bool) {
        let before = self.snapshot();
        if !extend
            && matches!(motion, Motion::Left | Motion::Right)
            && let Some((low, high)) = self.selection.range()
        {
            // A plain arrow collapses the selection onto the matching edge.
            self.cursor = if motion == Motion::Left { low } else { high };
            self.selection.clear();
            self.finish(before);
            return;
        }

        let from = self.cursor;
        let to = self.target_of(motion);
        if extend {
            self.selection.extend(from, to);
        } else {
            self.selection.clear();
        }
        self.cursor = to;
        self.finish(before);
    }

    /// Remove the range between the caret and `motion`'s target.
    fn delete_towards(&mut self, motion: Motion) -> bool {
        if self.read_only {
            return false;
        }
        if self.selection.has_selection() {
            return self.erase_selection();
        }
        let target = self.target_of(motion);
        let a = self.buffer.index_of(self.cursor);
        let b = self.buffer.index_of(target);
        if a == b {
            return true;
        }

        let before = self.snapshot();
        let start = a.min(b);
        self.buffer.remove(start..a.max(b));
        self.cursor = self.buffer.position_of(start);
        self.revision += 1;
        self.selection.clear();
        self.finish(before);
        true
    }

    fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        if event.key.is_shift() {
            self.shift_held = true;
            return true;
        }
        let shift = event.modifiers.shift || self.shift_held;
        let ctrl = event.modifiers.control || event.modifiers.meta;

        if ctrl {
            match event.key {
                Key::A => return self.run_shortcut(Shortcut::SelectAll),
                Key::C => return self.run_shortcut(Shortcut::Copy),
                Key::X => return self.run_shortcut(Shortcut::Cut),
                Key::V => return self.run_shortcut(Shortcut::Paste),
                _ => {}
            }
        }

        let motion = match event.key {
            Key::ArrowLeft if ctrl => Some(Motion::WordLeft),
            Key::ArrowRight if ctrl => Some(Motion::WordRight),
            Key::ArrowLeft => Some(Motion::Left),
            Key::ArrowRight => Some(Motion::Right),
            Key::ArrowUp => Some(Motion::Up),
            Key::ArrowDown => Some(Motion::Down),
            Key::Home if ctrl => Some(Motion::TextStart),
            Key::End if ctrl => Some(Motion::TextEnd),
            Key::Home => Some(Motion::RowStart),
            Key::End => Some(Motion::RowEnd),
            Key::PageUp => Some(Motion::FirstRow),
            Key::PageDown => Some(Motion::LastRow),
            _ => None,
        };
        if let Some(motion) = motion {
            self.move_cursor(motion, shift);
            return true;
        }

        match event.key {
            Key::Backspace if ctrl => self.delete_towards(Motion::WordLeft),
            Key::Backspace => self.delete_towards(Motion::Left),
            Key::Delete if ctrl => self.delete_towards(Motion::WordRight),
            Key::Delete => self.delete_towards(Motion::Right),
            Key::Enter if self.multi_line => self.insert_text("\n"),
            Key::Enter => {
                self.submitted.emit(self.buffer.text());
                true
            }
            Key::Tab | Key::Escape => false,
            Key::Space if event.text.is_empty() && !ctrl => self.insert_text(" "),
            _ if ctrl || event.text.is_empty() => false,
            _ if event.text.chars().all(char::is_control) => false,
            _ => self.insert_text(&event.text),
        }
    }

    fn handle_key_release(&mut self, event: &KeyReleaseEvent) -> bool {
        if event.key.is_shift() {
            self.shift_held = false;
            return true;
        }
        false
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        let pos = self.position_at(event.local_pos);
        let before = self.snapshot();
        if event.modifiers.shift || self.shift_held {
            self.selection.pointer_extend(self.cursor, pos);
        } else {
            self.selection.pointer_down(pos);
        }
        self.cursor = pos;
        self.finish(before);
        true
    }

    fn handle_mouse_move(&mut self, event: &MouseMoveEvent) -> bool {
        if !self.selection.is_selecting() {
            return false;
        }
        let pos = self.position_at(event.local_pos);
        let before = self.snapshot();
        self.selection.pointer_drag(pos);
        self.cursor = pos;
        self.finish(before);
        true
    }

    fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left || !self.selection.is_selecting() {
            return false;
        }
        let before = self.snapshot();
        self.selection.pointer_up();
        self.finish(before);
        true
    }

    /// Select the word or whitespace run under the pointer.
    fn handle_double_click(&mut self, event: &MouseDoubleClickEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        let pos = self.position_at(event.local_pos);
        let chars = self.buffer.row_chars(pos.row);
        let index = isize::try_from(pos.column).unwrap_or(isize::MAX);
        let Some(region) = text_region_at(&chars, index, &self.separators) else {
            return false;
        };

        let before = self.snapshot();
        let start = CursorPosition::new(pos.row, region.start);
        let end = CursorPosition::new(pos.row, region.end);
        self.selection.select_region(start, end);
        self.cursor = end;
        tracing::trace!(target: targets::ENTRY, ?start, ?end, kind = ?region.kind, "region selected");
        self.finish(before);
        true
    }

    fn handle_focus_out(&mut self) {
        let before = self.snapshot();
        self.selection.pointer_up();
        self.shift_held = false;
        self.finish(before);
        self.base.update();
    }
}

/// Replace every line break with a space, CRLF counting as one break.
fn flatten_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ")
        .chars()
        .map(|c| if is_line_break(c) { ' ' } else { c })
        .collect()
}

impl Object for Entry {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for Entry {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        self.with_layout(|layout| {
            let metrics = &layout.metrics;
            let measurer = self.ctx.measurer.as_ref();
            let min_width = metrics.width_of(measurer, &"M".repeat(10));
            let widest = layout
                .rows
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(self.placeholder.as_str()))
                .map(|text| metrics.width_of(measurer, text))
                .fold(min_width, f32::max);

            let min_rows = if self.multi_line {
                self.ctx.theme.metrics().multi_line_rows.max(1) as usize
            } else {
                1
            };
            let rows = if self.multi_line {
                layout.rows.len().max(min_rows)
            } else {
                1
            };
            let inset = metrics.padding * 2.0;
            let height = |rows: usize| rows as f32 * metrics.row_height + inset;

            SizeHint::new(Size::new(widest + inset, height(rows)))
                .with_minimum_dimensions(min_width + inset, height(min_rows))
        })
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        self.paint_entry(ctx);
    }

    fn cursor_shape(&self) -> CursorShape {
        CursorShape::IBeam
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        let consumed = match event {
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
            WidgetEvent::KeyRelease(e) => self.handle_key_release(e),
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::MouseMove(e) => self.handle_mouse_move(e),
            WidgetEvent::MouseRelease(e) => self.handle_mouse_release(e),
            WidgetEvent::DoubleClick(e) => self.handle_double_click(e),
            WidgetEvent::FocusIn(_) => {
                self.base.update();
                true
            }
            WidgetEvent::FocusOut(_) => {
                self.handle_focus_out();
                true
            }
        };
        if consumed {
            event.accept();
        }
        consumed
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.base.object_id())
            .field("text", &self.buffer.text())
            .field("cursor", &self.cursor)
            .field("selection", &self.selection())
            .field("multi_line", &self.multi_line)
            .field("echo_mode", &self.echo_mode)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Entry: Send, Sync);
