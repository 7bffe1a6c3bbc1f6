//! # Text editing engine
//!
//! `TextModel` is the caret + selection state machine behind both the
//! single-line input and the multi-line area. It stores an ordered list of
//! lines, a caret as `(row, byte column)`, and an optional selection anchor.
//! Column offsets always sit on grapheme boundaries; horizontal movement
//! and deletion step by grapheme, not by byte or code point.
//!
//! The engine never measures glyphs itself. Anything that needs pixel
//! positions (mouse-to-offset mapping, caret x, selection rectangles) takes
//! a `TextMeasure` supplied by the drawing collaborator. `MonospaceMeasure`
//! covers tests and headless use.
//!
//! Invariants:
//! - `lines` is never empty.
//! - `0 <= caret.row < lines.len()` and `0 <= caret.col <= lines[row].len()`
//!   after every operation.
//! - The anchor, when set, is a valid position; operations that mutate the
//!   buffer either keep it consistent or clear it.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::TextFilterError;
use crate::{Rect, Vec2};

/// Width and line metrics for the font the collaborator renders with.
pub trait TextMeasure {
    /// Rendered advance of `text` in pixels.
    fn advance(&self, text: &str) -> f32;
    fn line_height(&self) -> f32;
}

/// Fixed-advance measure; every grapheme is one cell wide.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        MonospaceMeasure {
            char_width: 8.0,
            line_height: 16.0,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn advance(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.char_width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Insertion point: row index and byte offset within that row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Caret {
    pub row: usize,
    pub col: usize,
}

impl Caret {
    pub fn new(row: usize, col: usize) -> Self {
        Caret { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

/// Largest grapheme boundary not past `byte` (row-change column clamping).
fn snap_to_boundary(text: &str, byte: usize) -> usize {
    let byte = byte.min(text.len());
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return last;
        }
        last = i;
    }
    if byte == text.len() { byte } else { last }
}

#[derive(Clone, Debug)]
pub struct TextModel {
    lines: Vec<String>,
    caret: Caret,
    anchor: Option<Caret>,
    scroll_row: usize,
}

impl Default for TextModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TextModel {
    pub fn new() -> Self {
        TextModel {
            lines: vec![String::new()],
            caret: Caret::default(),
            anchor: None,
            scroll_row: 0,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut m = Self::new();
        m.set_text(text);
        m
    }

    /// Replace the buffer; caret moves to the end, selection is cleared.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_owned).collect();
        debug_assert!(!self.lines.is_empty()); // split always yields one piece
        self.caret = Caret::new(self.lines.len() - 1, self.lines[self.lines.len() - 1].len());
        self.anchor = None;
        self.scroll_row = self.scroll_row.min(self.lines.len() - 1);
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> &str {
        &self.lines[row]
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn anchor(&self) -> Option<Caret> {
        self.anchor
    }

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn set_scroll_row(&mut self, row: usize) {
        self.scroll_row = row.min(self.lines.len() - 1);
    }

    /// Ordered selection bounds; `None` when the selection is empty.
    pub fn selection_range(&self) -> Option<(Caret, Caret)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(Caret::new(0, 0));
        let last = self.lines.len() - 1;
        self.caret = Caret::new(last, self.lines[last].len());
    }

    /// Anchor the selection at the caret (pointer press).
    pub fn begin_selection(&mut self) {
        self.anchor = Some(self.caret);
    }

    /// Remove the selected span; caret collapses to its lower bound.
    /// Returns false when there was nothing to delete.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            return false;
        };
        if start.row == end.row {
            self.lines[start.row].replace_range(start.col..end.col, "");
        } else {
            let tail = self.lines[end.row][end.col..].to_owned();
            self.lines[start.row].truncate(start.col);
            self.lines[start.row].push_str(&tail);
            self.lines.drain(start.row + 1..=end.row);
        }
        self.caret = start;
        self.anchor = None;
        self.scroll_row = self.scroll_row.min(self.lines.len() - 1);
        true
    }

    /// Insert at the caret, replacing any selection first. `text` must not
    /// contain newlines; use `newline` for line breaks.
    pub fn insert_str(&mut self, text: &str) {
        debug_assert!(!text.contains('\n'));
        self.delete_selection();
        self.lines[self.caret.row].insert_str(self.caret.col, text);
        self.caret.col += text.len();
        self.anchor = None;
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Delete before the caret: selection first, then the previous grapheme,
    /// then (at column 0) merge this line onto the previous one.
    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.caret.col > 0 {
            let prev = prev_grapheme_boundary(&self.lines[self.caret.row], self.caret.col);
            self.lines[self.caret.row].replace_range(prev..self.caret.col, "");
            self.caret.col = prev;
        } else if self.caret.row > 0 {
            let merged = self.lines.remove(self.caret.row);
            self.caret.row -= 1;
            self.caret.col = self.lines[self.caret.row].len();
            self.lines[self.caret.row].push_str(&merged);
            self.scroll_row = self.scroll_row.min(self.lines.len() - 1);
        }
        self.anchor = None;
    }

    /// Delete after the caret: selection first, then the next grapheme, then
    /// (at end of line) merge the next line upward.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let line_len = self.lines[self.caret.row].len();
        if self.caret.col < line_len {
            let next = next_grapheme_boundary(&self.lines[self.caret.row], self.caret.col);
            self.lines[self.caret.row].replace_range(self.caret.col..next, "");
        } else if self.caret.row + 1 < self.lines.len() {
            let merged = self.lines.remove(self.caret.row + 1);
            self.lines[self.caret.row].push_str(&merged);
            self.scroll_row = self.scroll_row.min(self.lines.len() - 1);
        }
        self.anchor = None;
    }

    /// Split the current line at the caret; caret moves to column 0 of the
    /// new line. Replaces any selection first.
    pub fn newline(&mut self) {
        self.delete_selection();
        let rest = self.lines[self.caret.row].split_off(self.caret.col);
        self.lines.insert(self.caret.row + 1, rest);
        self.caret = Caret::new(self.caret.row + 1, 0);
        self.anchor = None;
    }

    /// Move the caret one step. With `extend` the anchor is pinned (set from
    /// the caret if unset) and the caret moves, growing the selection. Without
    /// it, an existing selection collapses to its near edge (left/up: start,
    /// right/down: end) instead of moving.
    pub fn move_caret(&mut self, dir: Direction, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
            self.step(dir);
            return;
        }
        if let Some((start, end)) = self.selection_range() {
            self.caret = match dir {
                Direction::Left | Direction::Up => start,
                Direction::Right | Direction::Down => end,
            };
        } else {
            self.step(dir);
        }
        self.anchor = None;
    }

    /// Jump the caret to an absolute position (Home/End, programmatic
    /// placement), clamping to valid rows and snapping the column to a
    /// grapheme boundary. With `extend` the selection grows from the
    /// current caret.
    pub fn move_to(&mut self, target: Caret, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else {
            self.anchor = None;
        }
        let row = target.row.min(self.lines.len() - 1);
        self.caret = Caret::new(row, snap_to_boundary(&self.lines[row], target.col));
    }

    fn step(&mut self, dir: Direction) {
        match dir {
            Direction::Left => {
                if self.caret.col > 0 {
                    self.caret.col =
                        prev_grapheme_boundary(&self.lines[self.caret.row], self.caret.col);
                } else if self.caret.row > 0 {
                    self.caret.row -= 1;
                    self.caret.col = self.lines[self.caret.row].len();
                }
            }
            Direction::Right => {
                if self.caret.col < self.lines[self.caret.row].len() {
                    self.caret.col =
                        next_grapheme_boundary(&self.lines[self.caret.row], self.caret.col);
                } else if self.caret.row + 1 < self.lines.len() {
                    self.caret.row += 1;
                    self.caret.col = 0;
                }
            }
            Direction::Up => {
                if self.caret.row > 0 {
                    self.caret.row -= 1;
                    self.caret.col = snap_to_boundary(&self.lines[self.caret.row], self.caret.col);
                }
            }
            Direction::Down => {
                if self.caret.row + 1 < self.lines.len() {
                    self.caret.row += 1;
                    self.caret.col = snap_to_boundary(&self.lines[self.caret.row], self.caret.col);
                }
            }
        }
    }

    /// Map a position in content-local pixels (origin at the top-left of the
    /// first visible line) to the nearest caret. The row comes from the line
    /// height and scroll offset, clamped to the addressable area; the column
    /// is the grapheme boundary whose rendered x is closest to the pointer.
    pub fn caret_from_point(
        &self,
        measure: &dyn TextMeasure,
        pos: Vec2,
        viewport_h: f32,
    ) -> Caret {
        let line_h = measure.line_height().max(1.0);
        let visible = self.visible_lines(viewport_h, measure);
        let max_idx = visible.len().saturating_sub(1);
        let idx = if pos.y <= 0.0 {
            0
        } else {
            ((pos.y / line_h) as usize).min(max_idx)
        };
        let row = (self.scroll_row + idx).min(self.lines.len() - 1);

        let line = &self.lines[row];
        let mut best_col = 0usize;
        let mut best_dist = f32::INFINITY;
        for i in line
            .grapheme_indices(true)
            .map(|(i, _)| i)
            .chain(std::iter::once(line.len()))
        {
            let d = (measure.advance(&line[..i]) - pos.x).abs();
            if d < best_dist {
                best_dist = d;
                best_col = i;
            }
        }
        Caret::new(row, best_col)
    }

    /// Place the caret from a pointer press and anchor a selection there.
    pub fn caret_to_point(&mut self, measure: &dyn TextMeasure, pos: Vec2, viewport_h: f32) {
        self.caret = self.caret_from_point(measure, pos, viewport_h);
        self.anchor = Some(self.caret);
    }

    /// Extend the in-progress selection toward the pointer (drag).
    pub fn extend_to_point(&mut self, measure: &dyn TextMeasure, pos: Vec2, viewport_h: f32) {
        self.caret = self.caret_from_point(measure, pos, viewport_h);
    }

    /// Rows the collaborator should draw for the given viewport height.
    pub fn visible_lines(&self, viewport_h: f32, measure: &dyn TextMeasure) -> std::ops::Range<usize> {
        let line_h = measure.line_height().max(1.0);
        let max_rows = ((viewport_h / line_h) as usize).max(1);
        let start = self.scroll_row.min(self.lines.len() - 1);
        start..(start + max_rows).min(self.lines.len())
    }

    /// Caret position in content-local pixels, relative to the scroll origin.
    pub fn caret_position(&self, measure: &dyn TextMeasure) -> Vec2 {
        let x = measure.advance(&self.lines[self.caret.row][..self.caret.col]);
        let y = (self.caret.row as f32 - self.scroll_row as f32) * measure.line_height();
        Vec2::new(x, y)
    }

    /// Highlight rectangles covering the selection across visible rows.
    pub fn selection_rects(&self, viewport_h: f32, measure: &dyn TextMeasure) -> Vec<Rect> {
        let Some((start, end)) = self.selection_range() else {
            return Vec::new();
        };
        let line_h = measure.line_height();
        let mut rects = Vec::new();
        for row in self.visible_lines(viewport_h, measure) {
            if row < start.row || row > end.row {
                continue;
            }
            let line = &self.lines[row];
            let from = if row == start.row { start.col } else { 0 };
            let to = if row == end.row { end.col } else { line.len() };
            let x1 = measure.advance(&line[..from]);
            let x2 = measure.advance(&line[..to]);
            rects.push(Rect::new(
                x1.min(x2),
                (row - self.scroll_row) as f32 * line_h,
                (x2 - x1).abs(),
                line_h,
            ));
        }
        rects
    }

    /// Scroll just enough to bring the caret row into the viewport.
    pub fn scroll_to_caret(&mut self, viewport_h: f32, measure: &dyn TextMeasure) {
        let line_h = measure.line_height().max(1.0);
        let max_rows = ((viewport_h / line_h) as usize).max(1);
        if self.caret.row < self.scroll_row {
            self.scroll_row = self.caret.row;
        } else if self.caret.row >= self.scroll_row + max_rows {
            self.scroll_row = self.caret.row + 1 - max_rows;
        }
    }
}

/// Commit-time validation for text widgets. The policy is deliberate: a
/// committed buffer that does not match the pattern is cleared, not
/// rejected; the widget still reports the final (possibly empty) text.
#[derive(Clone, Debug)]
pub struct TextFilter {
    pattern: regex::Regex,
}

impl TextFilter {
    pub fn new(pattern: &str) -> Result<Self, TextFilterError> {
        Ok(TextFilter {
            pattern: regex::Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}
