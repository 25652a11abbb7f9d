//! Action vocabulary and dispatch for gridpad.
//!
//! The frontend translates raw input events into [`Action`]s and feeds them
//! to [`dispatcher::dispatch`], which applies them to a `&mut EditorState`.
//! One action per call, fully synchronous; the returned
//! [`dispatcher::DispatchResult`] tells the caller whether to redraw or quit.

pub mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use key_translator::{translate_key, translate_mouse};

/// A discrete intent applied to the editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(EditKind),
    Motion(MotionKind),
    /// Pointer press at window pixel coordinates.
    Pointer { pixel_x: u32, pixel_y: u32 },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Splice text at the cursor (a single keystroke's worth in practice,
    /// but any length wraps correctly).
    InsertText(String),
    Backspace,
    InsertNewline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Up,
    Down,
    Left,
    Right,
}
