//! Pointer placement: map a window pixel press to a viewport cell and park
//! the cursor on the nearest valid position.

use core_state::EditorState;
use tracing::trace;

use super::DispatchResult;

pub(crate) fn handle_pointer(pixel_x: u32, pixel_y: u32, state: &mut EditorState) -> DispatchResult {
    let geometry = state.geometry;
    let visible = state
        .total_lines()
        .saturating_sub(state.scroll)
        .min(geometry.viewport_rows);
    if visible == 0 {
        return DispatchResult::clean();
    }
    let row = ((pixel_y / geometry.cell_height) as usize).min(visible - 1);
    state.cursor_row = row;
    let col = (pixel_x / geometry.cell_width) as usize;
    state.cursor_col = col.min(state.current_line_len());
    trace!(
        target: "actions.dispatch",
        op = "pointer",
        line = state.absolute_line(),
        col = state.cursor_col,
        "applied"
    );
    state.debug_validate();
    DispatchResult::dirty()
}
