//! Content-changing handlers: insert, backspace, newline.
//!
//! Every edit follows the same shape: mutate the buffer at the cursor's
//! absolute line, rewrap from that line if it reached the wrap width, carry
//! the cursor across any splits that crossed it, then renormalize the scroll
//! offset so removed rows never strand the viewport past the end.

use core_lines::Split;
use core_state::EditorState;
use tracing::trace;

use super::DispatchResult;
use crate::EditKind;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    let result = match kind {
        EditKind::InsertText(text) => insert_text(state, &text),
        EditKind::Backspace => backspace(state),
        EditKind::InsertNewline => insert_newline(state),
    };
    if result.dirty {
        state.dirty = true;
    }
    state.debug_validate();
    result
}

fn insert_text(state: &mut EditorState, text: &str) -> DispatchResult {
    if text.is_empty() {
        return DispatchResult::clean();
    }
    let line = state.absolute_line();
    state.buffer.insert_text(line, state.cursor_col, text);
    state.cursor_col += text.chars().count();
    if state.current_line_len() >= state.geometry.wrap_width {
        let splits = state.buffer.rewrap_from(line, state.geometry.wrap_width);
        relocate_through_splits(state, &splits);
    }
    state.normalize_scroll();
    trace!(
        target: "actions.dispatch",
        op = "insert_text",
        line = state.absolute_line(),
        col = state.cursor_col,
        "applied"
    );
    DispatchResult::dirty()
}

/// Walk the cursor through a rewrap pass. A split at a space carries the
/// cursor to the spilled text when the cursor sat at or past the cut; a
/// forced mid-word split only when it sat strictly past it, since the
/// character at the cut stays on the upper row there.
fn relocate_through_splits(state: &mut EditorState, splits: &[Split]) {
    for split in splits {
        if state.absolute_line() != split.index {
            continue;
        }
        let crosses = if split.at_space {
            state.cursor_col >= split.cut
        } else {
            state.cursor_col > split.cut
        };
        if crosses {
            state.cursor_col -= split.cut;
            state.advance_vertical();
        }
    }
}

/// Where the cursor sits relative to its line start, which determines the
/// backspace flavor.
enum DeletePosition {
    MidLine,
    LineStartInView,
    LineStartAtViewTop,
    DocumentStart,
}

fn classify_delete_position(state: &EditorState) -> DeletePosition {
    if state.cursor_col > 0 {
        DeletePosition::MidLine
    } else if state.cursor_row > 0 {
        DeletePosition::LineStartInView
    } else if state.scroll > 0 {
        DeletePosition::LineStartAtViewTop
    } else {
        DeletePosition::DocumentStart
    }
}

fn backspace(state: &mut EditorState) -> DispatchResult {
    match classify_delete_position(state) {
        DeletePosition::DocumentStart => return DispatchResult::clean(),
        DeletePosition::MidLine => backspace_mid_line(state),
        DeletePosition::LineStartInView => backspace_line_start(state, false),
        DeletePosition::LineStartAtViewTop => backspace_line_start(state, true),
    }
    state.normalize_scroll();
    trace!(
        target: "actions.dispatch",
        op = "backspace",
        line = state.absolute_line(),
        col = state.cursor_col,
        "applied"
    );
    DispatchResult::dirty()
}

/// Delete one character and let later rows flow backward into the slack.
/// When the reflow removes rows and that brings a scrolled document back
/// within the viewport, give the viewport one row back so the visible text
/// does not jump.
fn backspace_mid_line(state: &mut EditorState) {
    let line = state.absolute_line();
    state.buffer.delete_char_before(line, state.cursor_col);
    state.cursor_col -= 1;
    let before_total = state.total_lines();
    let removed = state.buffer.pull_forward(line, state.geometry.wrap_width);
    if removed > 0
        && state.scroll > 0
        && before_total > state.geometry.viewport_rows
        && state.total_lines() <= state.geometry.viewport_rows
    {
        state.scroll -= 1;
        state.cursor_row += 1;
    }
}

/// Backspace at column zero: the cursor leaves this row for the previous
/// one, taking the row's content with it unless the row is an empty
/// fragment, in which case only the break it represents is removed.
fn backspace_line_start(state: &mut EditorState, at_view_top: bool) {
    let line = state.absolute_line();
    let empty_fragment = state.buffer.line(line).is_empty_fragment();
    if at_view_top {
        state.scroll -= 1;
    } else {
        state.cursor_row -= 1;
    }
    if empty_fragment {
        state.cursor_col = state.buffer.remove_empty_fragment(line);
    } else {
        state.cursor_col = state.buffer.merge_with_previous(line);
        let target = line - 1;
        if state.buffer.char_len(target) >= state.geometry.wrap_width {
            let splits = state.buffer.rewrap_from(target, state.geometry.wrap_width);
            relocate_through_splits(state, &splits);
        }
    }
    if !at_view_top && state.scroll > 0 {
        state.scroll -= 1;
        state.cursor_row += 1;
    }
}

fn insert_newline(state: &mut EditorState) -> DispatchResult {
    let line = state.absolute_line();
    state.buffer.split_line(line, state.cursor_col);
    state.cursor_col = 0;
    state.advance_vertical();
    trace!(
        target: "actions.dispatch",
        op = "insert_newline",
        line = state.absolute_line(),
        "applied"
    );
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_lines::{Line, LineBuffer};
    use core_state::Geometry;

    fn setup(lines: Vec<Line>, wrap_width: usize, viewport_rows: usize) -> EditorState {
        let geometry = Geometry::new(wrap_width, viewport_rows, 12, 20).unwrap();
        EditorState::new(LineBuffer::from_lines(lines), geometry)
    }

    fn rows(state: &EditorState) -> Vec<(&str, bool)> {
        state
            .buffer
            .iter()
            .map(|l| (l.text.as_str(), l.terminated))
            .collect()
    }

    #[test]
    fn typing_within_width_only_moves_the_column() {
        let mut state = setup(vec![Line::logical("ab")], 10, 5);
        state.cursor_col = 2;
        handle_edit(EditKind::InsertText("c".into()), &mut state);
        assert_eq!(rows(&state), vec![("abc", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 3));
        assert!(state.dirty);
    }

    #[test]
    fn typing_past_the_width_wraps_at_the_last_space() {
        let mut state = setup(vec![Line::logical("one two")], 8, 5);
        state.cursor_col = 7;
        handle_edit(EditKind::InsertText("x".into()), &mut state);
        assert_eq!(rows(&state), vec![("one ", false), ("twox", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (1, 4));
    }

    #[test]
    fn typing_a_solid_word_forces_a_mid_word_break() {
        let mut state = setup(vec![Line::logical("")], 5, 5);
        for c in ["a", "b", "c", "d", "e"] {
            handle_edit(EditKind::InsertText((*c).into()), &mut state);
        }
        assert_eq!(rows(&state), vec![("abcd", false), ("e", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (1, 1));
    }

    #[test]
    fn cursor_before_the_cut_stays_on_the_upper_row() {
        let mut state = setup(vec![Line::logical("aa ccdd")], 8, 5);
        state.cursor_col = 1;
        handle_edit(EditKind::InsertText("a".into()), &mut state);
        assert_eq!(rows(&state), vec![("aaa ", false), ("ccdd", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 2));
    }

    #[test]
    fn wrap_scrolls_instead_of_moving_when_viewport_is_full() {
        let lines = vec![
            Line::logical("one two"),
            Line::logical("x"),
            Line::logical("y"),
        ];
        let mut state = setup(lines, 8, 3);
        state.cursor_row = 0;
        state.cursor_col = 7;
        handle_edit(EditKind::InsertText("z".into()), &mut state);
        // four rows now exceed the three-row viewport, so the relocation
        // scrolls and the cursor row is unchanged
        assert_eq!(state.total_lines(), 4);
        assert_eq!((state.cursor_row, state.scroll), (0, 1));
        assert_eq!(state.current_line().text, "twoz");
    }

    #[test]
    fn backspace_mid_line_deletes_one_char() {
        let mut state = setup(vec![Line::logical("abc")], 10, 5);
        state.cursor_col = 2;
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(rows(&state), vec![("ac", true)]);
        assert_eq!(state.cursor_col, 1);
    }

    #[test]
    fn backspace_pulls_following_fragment_back() {
        let lines = vec![Line::fragment("abcd"), Line::logical("ef")];
        let mut state = setup(lines, 7, 5);
        state.cursor_col = 4;
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(rows(&state), vec![("abcef", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 3));
    }

    #[test]
    fn backspace_leaves_tail_that_would_fill_the_row() {
        // pulling "ef" back would put the merged row at the wrap width, so
        // the fragment stays where it is
        let lines = vec![Line::fragment("abcd"), Line::logical("ef")];
        let mut state = setup(lines, 5, 5);
        state.cursor_col = 4;
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(rows(&state), vec![("abc", false), ("ef", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 3));
    }

    #[test]
    fn backspace_at_line_start_merges_with_previous() {
        let lines = vec![Line::logical("ab"), Line::logical("cd")];
        let mut state = setup(lines, 10, 5);
        state.cursor_row = 1;
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(rows(&state), vec![("abcd", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 2));
    }

    #[test]
    fn backspace_on_an_empty_fragment_removes_only_the_break() {
        let lines = vec![Line::fragment("ab "), Line::fragment("")];
        let mut state = setup(lines, 10, 5);
        state.cursor_row = 1;
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(rows(&state), vec![("ab", false)]);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 2));
    }

    #[test]
    fn backspace_at_view_top_scrolls_up_a_row() {
        let lines = vec![
            Line::logical("aa"),
            Line::logical("bb"),
            Line::logical("cc"),
            Line::logical("dd"),
        ];
        let mut state = setup(lines, 10, 3);
        state.scroll = 1;
        state.cursor_row = 0;
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(rows(&state), vec![("aabb", true), ("cc", true), ("dd", true)]);
        assert_eq!((state.cursor_row, state.scroll), (0, 0));
        assert_eq!(state.cursor_col, 2);
    }

    #[test]
    fn backspace_merge_in_scrolled_view_keeps_cursor_line() {
        let lines = vec![
            Line::logical("aa"),
            Line::logical("bb"),
            Line::logical("cc"),
            Line::logical("dd"),
            Line::logical("ee"),
        ];
        let mut state = setup(lines, 10, 3);
        state.scroll = 2;
        state.cursor_row = 1;
        let before = state.absolute_line();
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(rows(&state).len(), 4);
        // the row above the cursor absorbed the cursor line
        assert_eq!(state.absolute_line(), before - 1);
        assert_eq!(state.current_line().text, "ccdd");
    }

    #[test]
    fn backspace_at_document_start_is_a_no_op() {
        let mut state = setup(vec![Line::logical("ab")], 10, 5);
        let result = handle_edit(EditKind::Backspace, &mut state);
        assert!(!result.dirty);
        assert_eq!(rows(&state), vec![("ab", true)]);
    }

    #[test]
    fn backspace_reflow_returns_a_viewport_row() {
        // four rows over a three-row viewport, scrolled by one; removing a
        // character pulls the tail row back and the viewport follows
        let lines = vec![
            Line::fragment("aaa "),
            Line::fragment("bbb "),
            Line::fragment("ccc "),
            Line::logical("d"),
        ];
        let mut state = setup(lines, 6, 3);
        state.scroll = 1;
        state.cursor_row = 1;
        state.cursor_col = 4;
        handle_edit(EditKind::Backspace, &mut state);
        assert_eq!(
            rows(&state),
            vec![("aaa ", false), ("bbb ", false), ("cccd", true)]
        );
        assert_eq!((state.cursor_row, state.scroll), (2, 0));
        assert_eq!(state.cursor_col, 3);
    }

    #[test]
    fn newline_splits_the_line_under_the_cursor() {
        let mut state = setup(vec![Line::logical("hello")], 10, 5);
        state.cursor_col = 2;
        handle_edit(EditKind::InsertNewline, &mut state);
        assert_eq!(rows(&state), vec![("he", true), ("llo", true)]);
        assert_eq!((state.cursor_row, state.cursor_col), (1, 0));
    }

    #[test]
    fn newline_on_last_visible_row_scrolls() {
        let lines = vec![Line::logical("aa"), Line::logical("bb")];
        let mut state = setup(lines, 10, 2);
        state.cursor_row = 1;
        state.cursor_col = 2;
        handle_edit(EditKind::InsertNewline, &mut state);
        assert_eq!(state.total_lines(), 3);
        assert_eq!((state.cursor_row, state.scroll), (1, 1));
        assert_eq!(state.current_line().text, "");
    }
}
