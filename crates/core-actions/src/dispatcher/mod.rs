//! Applies [`Action`]s to the editor state.
//!
//! Each handler mutates the state in place and reports whether anything
//! visible changed. Handlers live in submodules by action family.

mod edit;
mod motion;
mod pointer;

use core_state::EditorState;

use crate::Action;

/// What the frontend should do after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The viewport contents or cursor changed; redraw.
    pub dirty: bool,
    /// The session is over; tear down and exit the loop.
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }

    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
        }
    }
}

pub fn dispatch(action: Action, state: &mut EditorState) -> DispatchResult {
    match action {
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Motion(kind) => motion::handle_motion(kind, state),
        Action::Pointer { pixel_x, pixel_y } => pointer::handle_pointer(pixel_x, pixel_y, state),
        Action::Quit => DispatchResult::quit(),
    }
}
