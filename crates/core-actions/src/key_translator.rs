//! Key and mouse translation into [`Action`]s.
//!
//! Stateless: the pad has no modes, counts, or chords. Ctrl-modified keys
//! are swallowed so terminal chords (and the classic Ctrl-C/Ctrl-V guard)
//! never insert text.

use crate::{Action, EditKind, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};

pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Edit(EditKind::InsertNewline)),
        KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Up => Some(Action::Motion(MotionKind::Up)),
        KeyCode::Down => Some(Action::Motion(MotionKind::Down)),
        KeyCode::Left => Some(Action::Motion(MotionKind::Left)),
        KeyCode::Right => Some(Action::Motion(MotionKind::Right)),
        KeyCode::Char(c) => Some(Action::Edit(EditKind::InsertText(c.to_string()))),
    }
}

pub fn translate_mouse(mouse: &MouseEvent) -> Option<Action> {
    match mouse.button {
        MouseButton::Left => Some(Action::Pointer {
            pixel_x: mouse.pixel_x,
            pixel_y: mouse.pixel_y,
        }),
        _ => None,
    }
}
