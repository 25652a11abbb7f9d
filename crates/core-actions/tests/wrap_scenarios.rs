//! End-to-end scenarios driven through the dispatcher, the way the frontend
//! drives it: one action at a time against a live editor state.

use core_actions::dispatcher::dispatch;
use core_actions::{Action, EditKind, MotionKind};
use core_lines::{Line, LineBuffer};
use core_state::{EditorState, Geometry};

fn state(lines: Vec<Line>, wrap_width: usize, viewport_rows: usize) -> EditorState {
    let geometry = Geometry::new(wrap_width, viewport_rows, 12, 20).unwrap();
    EditorState::new(LineBuffer::from_lines(lines), geometry)
}

fn type_str(state: &mut EditorState, text: &str) {
    for c in text.chars() {
        dispatch(Action::Edit(EditKind::InsertText(c.to_string())), state);
    }
}

fn rows(state: &EditorState) -> Vec<(&str, bool)> {
    state
        .buffer
        .iter()
        .map(|l| (l.text.as_str(), l.terminated))
        .collect()
}

#[test]
fn typing_a_solid_word_breaks_mid_word() {
    let mut state = state(vec![Line::logical("")], 5, 10);
    type_str(&mut state, "abcdefgh");
    assert_eq!(rows(&state), vec![("abcd", false), ("efgh", true)]);
    assert_eq!((state.cursor_row, state.cursor_col), (1, 4));
}

#[test]
fn typing_prose_wraps_at_spaces() {
    let mut state = state(vec![Line::logical("")], 10, 10);
    type_str(&mut state, "hello there world");
    assert_eq!(
        rows(&state),
        vec![("hello ", false), ("there ", false), ("world", true)]
    );
    assert_eq!((state.cursor_row, state.cursor_col), (2, 5));
}

#[test]
fn backspacing_across_a_break_remerges_the_word() {
    let mut state = state(vec![Line::logical("ab"), Line::logical("cd")], 10, 10);
    dispatch(Action::Motion(MotionKind::Down), &mut state);
    dispatch(Action::Edit(EditKind::Backspace), &mut state);
    assert_eq!(rows(&state), vec![("abcd", true)]);
    assert_eq!((state.cursor_row, state.cursor_col), (0, 2));
}

#[test]
fn enter_splits_and_moves_to_the_new_line() {
    let mut state = state(vec![Line::logical("hello")], 10, 10);
    state.cursor_col = 2;
    dispatch(Action::Edit(EditKind::InsertNewline), &mut state);
    assert_eq!(rows(&state), vec![("he", true), ("llo", true)]);
    assert_eq!((state.cursor_row, state.cursor_col), (1, 0));
}

#[test]
fn moving_past_the_viewport_scrolls_and_stops_at_the_end() {
    let lines = (0..5).map(|i| Line::logical(format!("l{i}"))).collect();
    let mut state = state(lines, 10, 3);
    for _ in 0..2 {
        dispatch(Action::Motion(MotionKind::Down), &mut state);
    }
    assert_eq!((state.cursor_row, state.scroll), (2, 0));
    for _ in 0..2 {
        dispatch(Action::Motion(MotionKind::Down), &mut state);
    }
    assert_eq!((state.cursor_row, state.scroll), (2, 2));
    let result = dispatch(Action::Motion(MotionKind::Down), &mut state);
    assert!(!result.dirty);
    assert_eq!((state.cursor_row, state.scroll), (2, 2));
}

#[test]
fn cursor_stays_valid_through_a_mixed_session() {
    let mut state = state(vec![Line::logical("")], 8, 4);
    type_str(&mut state, "the quick brown fox jumps");
    dispatch(Action::Edit(EditKind::InsertNewline), &mut state);
    type_str(&mut state, "over");
    for _ in 0..6 {
        dispatch(Action::Motion(MotionKind::Up), &mut state);
    }
    for _ in 0..3 {
        dispatch(Action::Edit(EditKind::Backspace), &mut state);
    }
    for _ in 0..8 {
        dispatch(Action::Motion(MotionKind::Right), &mut state);
    }
    assert!(state.cursor_row < 4);
    assert!(state.scroll <= state.max_scroll());
    assert!(state.absolute_line() < state.total_lines());
    assert!(state.cursor_col <= state.current_line_len());
    for line in state.buffer.iter() {
        assert!(line.char_len() < 8);
    }
}

#[test]
fn pointer_press_parks_the_cursor_on_the_cell() {
    let lines = vec![Line::logical("abcdef"), Line::logical("gh")];
    let mut state = state(lines, 10, 5);
    dispatch(
        Action::Pointer {
            pixel_x: 48,
            pixel_y: 0,
        },
        &mut state,
    );
    assert_eq!((state.cursor_row, state.cursor_col), (0, 4));
}

#[test]
fn reload_remerges_mid_word_fragments_differently() {
    // a forced mid-word break carries no marker in the flat file, so the
    // reloaded document re-wraps at the earlier space instead
    let original = LineBuffer::from_lines(vec![Line::fragment("ab cd"), Line::logical("ef")]);
    let flat = original.serialize();
    assert_eq!(flat, "ab cdef\n");
    let reloaded = LineBuffer::from_content(&flat, 6);
    let rows: Vec<_> = reloaded
        .iter()
        .map(|l| (l.text.as_str(), l.terminated))
        .collect();
    assert_eq!(rows, vec![("ab ", false), ("cdef", true)]);
}

#[test]
fn reload_reproduces_space_wrapped_rows() {
    let original = LineBuffer::from_content("hello there world\nsecond line\n", 10);
    let reloaded = LineBuffer::from_content(&original.serialize(), 10);
    assert_eq!(original.lines(), reloaded.lines());
}
