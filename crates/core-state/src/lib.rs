//! Editor state: the line buffer plus grid geometry, cursor, and scroll
//! bookkeeping.
//!
//! Everything that used to be implicit global state in a windowed pad lives
//! in one [`EditorState`] passed `&mut` to every operation. The two index
//! spaces, viewport-relative cursor row and absolute buffer row, meet in
//! exactly one place, [`EditorState::absolute_line`], so navigation, wrap
//! relocation, and deletion all share the same mapping instead of each
//! re-deriving it.
//!
//! The vertical-advance rule and scroll normalization live here because they
//! are viewport policy, not buffer content policy; `core-lines` never sees a
//! cursor.

use anyhow::{Result, ensure};
use core_lines::{Line, LineBuffer};
use std::ops::Range;
use std::path::PathBuf;

/// Fixed grid dimensions derived from the configured window and character
/// cell, exactly as the pad has always derived them: one column is reserved,
/// so `wrap_width = window_width / cell_width - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Columns a display row may hold; content length must stay under this.
    pub wrap_width: usize,
    /// Display rows visible at once.
    pub viewport_rows: usize,
    /// Pixel width of one character cell (pointer mapping and caret).
    pub cell_width: u32,
    /// Pixel height of one character cell.
    pub cell_height: u32,
}

impl Geometry {
    pub fn new(
        wrap_width: usize,
        viewport_rows: usize,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self> {
        ensure!(wrap_width >= 2, "wrap width {wrap_width} leaves no room to break");
        ensure!(viewport_rows >= 1, "viewport needs at least one row");
        ensure!(cell_width > 0 && cell_height > 0, "character cell must be nonzero");
        Ok(Self {
            wrap_width,
            viewport_rows,
            cell_width,
            cell_height,
        })
    }

    pub fn from_window(
        window_width: u32,
        window_height: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self> {
        ensure!(cell_width > 0 && cell_height > 0, "character cell must be nonzero");
        Self::new(
            (window_width / cell_width).saturating_sub(1) as usize,
            (window_height / cell_height) as usize,
            cell_width,
            cell_height,
        )
    }
}

/// The whole editable state of the pad.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub buffer: LineBuffer,
    pub geometry: Geometry,
    /// Cursor column within the current visible line, in `char` cells.
    pub cursor_col: usize,
    /// Cursor row relative to the viewport, `< geometry.viewport_rows`.
    pub cursor_row: usize,
    /// Index of the first visible buffer row.
    pub scroll: usize,
    /// Unsaved modifications present.
    pub dirty: bool,
    /// Backing document path, when one is bound.
    pub file_name: Option<PathBuf>,
}

impl EditorState {
    pub fn new(buffer: LineBuffer, geometry: Geometry) -> Self {
        Self {
            buffer,
            geometry,
            cursor_col: 0,
            cursor_row: 0,
            scroll: 0,
            dirty: false,
            file_name: None,
        }
    }

    /// The single relative-to-absolute mapping: buffer row under the cursor.
    pub fn absolute_line(&self) -> usize {
        self.cursor_row + self.scroll
    }

    pub fn current_line(&self) -> &Line {
        self.buffer.line(self.absolute_line())
    }

    pub fn current_line_len(&self) -> usize {
        self.current_line().char_len()
    }

    pub fn total_lines(&self) -> usize {
        self.buffer.len()
    }

    /// Vertical-advance rule shared by line splitting and wrap relocation:
    /// a document taller than the viewport, or a cursor already on the last
    /// visible row, grows by scrolling; otherwise the cursor moves down.
    pub fn advance_vertical(&mut self) {
        if self.buffer.len() > self.geometry.viewport_rows
            || self.cursor_row >= self.geometry.viewport_rows - 1
        {
            self.scroll += 1;
        } else {
            self.cursor_row += 1;
        }
    }

    /// Clamp the cursor column to the current line's content length.
    pub fn clamp_cursor_col(&mut self) {
        let len = self.current_line_len();
        if self.cursor_col > len {
            self.cursor_col = len;
        }
    }

    /// Largest valid scroll offset for the current line count.
    pub fn max_scroll(&self) -> usize {
        self.buffer.len().saturating_sub(self.geometry.viewport_rows)
    }

    /// Pull the scroll offset back into range after rows were removed or the
    /// viewport advanced past the end, transferring the excess to the cursor
    /// row so the absolute cursor line is unchanged.
    pub fn normalize_scroll(&mut self) {
        let max = self.max_scroll();
        if self.scroll > max {
            let excess = self.scroll - max;
            self.scroll = max;
            self.cursor_row += excess;
            tracing::trace!(
                target: "state",
                excess,
                scroll = self.scroll,
                row = self.cursor_row,
                "scroll_renormalized"
            );
        }
    }

    /// Buffer rows currently visible, clipped to the available lines.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.scroll.min(self.buffer.len());
        let end = (self.scroll + self.geometry.viewport_rows).min(self.buffer.len());
        start..end
    }

    /// Invariant checks at operation boundaries. Debug builds only; a failure
    /// here is a core bug, not a user-reachable condition.
    pub fn debug_validate(&self) {
        debug_assert!(self.cursor_row < self.geometry.viewport_rows, "cursor row off viewport");
        debug_assert!(self.scroll <= self.max_scroll(), "scroll past end");
        debug_assert!(self.absolute_line() < self.buffer.len(), "cursor past last row");
        debug_assert!(
            self.cursor_col <= self.current_line_len(),
            "cursor column past line end"
        );
        #[cfg(debug_assertions)]
        for (index, line) in self.buffer.iter().enumerate() {
            debug_assert!(
                line.char_len() < self.geometry.wrap_width,
                "row {index} at or over the wrap width"
            );
        }
    }
}
