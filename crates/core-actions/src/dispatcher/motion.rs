//! Cursor movement. Motions never change the buffer; they only move the
//! cursor and scroll the viewport, clamping the column to the target line.

use core_state::EditorState;
use tracing::trace;

use super::DispatchResult;
use crate::MotionKind;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) -> DispatchResult {
    let moved = match kind {
        MotionKind::Up => move_up(state),
        MotionKind::Down => move_down(state),
        MotionKind::Left => move_left(state),
        MotionKind::Right => move_right(state),
    };
    if moved {
        trace!(
            target: "actions.dispatch",
            op = "motion",
            ?kind,
            line = state.absolute_line(),
            col = state.cursor_col,
            "applied"
        );
        state.debug_validate();
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

fn move_up(state: &mut EditorState) -> bool {
    if state.cursor_row > 0 {
        state.cursor_row -= 1;
    } else if state.scroll > 0 {
        state.scroll -= 1;
    } else {
        return false;
    }
    state.clamp_cursor_col();
    true
}

fn move_down(state: &mut EditorState) -> bool {
    let last_visible = state.geometry.viewport_rows - 1;
    if state.cursor_row < last_visible && state.absolute_line() + 1 < state.total_lines() {
        state.cursor_row += 1;
    } else if state.cursor_row >= last_visible && state.scroll < state.max_scroll() {
        state.scroll += 1;
    } else {
        return false;
    }
    state.clamp_cursor_col();
    true
}

fn move_left(state: &mut EditorState) -> bool {
    if state.cursor_col > 0 {
        state.cursor_col -= 1;
        return true;
    }
    // wrap to the end of the previous line
    let moved = move_up(state);
    if moved {
        state.cursor_col = state.current_line_len();
    }
    moved
}

fn move_right(state: &mut EditorState) -> bool {
    if state.cursor_col < state.current_line_len() {
        state.cursor_col += 1;
        return true;
    }
    // wrap to the start of the next line
    let moved = move_down(state);
    if moved {
        state.cursor_col = 0;
    }
    moved
}
