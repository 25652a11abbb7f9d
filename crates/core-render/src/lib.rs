//! Read-only render contract.
//!
//! The rendering surface draws two things: the visible slice of display
//! rows and a caret. Both are pure reads of [`EditorState`]; nothing here
//! mutates, schedules, or caches. Blink timing belongs to the surface.

use core_lines::Line;
use core_state::EditorState;

/// Caret position in window pixels, derived from the cursor cell and the
/// configured character cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPixel {
    pub x: u32,
    pub y: u32,
}

/// The display rows currently inside the viewport, clipped to the available
/// lines. Row `i` of the slice renders at viewport row `i`.
pub fn visible_lines(state: &EditorState) -> &[Line] {
    &state.buffer.lines()[state.visible_range()]
}

/// Cursor cell as (column, viewport row).
pub fn cursor_cell(state: &EditorState) -> (usize, usize) {
    (state.cursor_col, state.cursor_row)
}

pub fn cursor_pixel(state: &EditorState) -> CursorPixel {
    CursorPixel {
        x: state.cursor_col as u32 * state.geometry.cell_width,
        y: state.cursor_row as u32 * state.geometry.cell_height,
    }
}
