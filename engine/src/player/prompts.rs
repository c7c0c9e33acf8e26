//! UI prompt visibility flags. Purely observational: nothing in the
//! controller reads them back.

use crate::interaction::GazeTarget;

use super::state::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptFlags {
    pub ground: bool,
    pub flying: bool,
    pub ship: bool,
    pub interact: bool,
}

impl PromptFlags {
    /// Exactly one of the context prompts is shown; the interact prompt
    /// follows the gaze target independently.
    pub fn from_state(state: PlayerState, gaze: GazeTarget) -> Self {
        Self {
            ground: state.has_reference_frame(),
            flying: state == PlayerState::Flying,
            ship: state == PlayerState::Seated,
            interact: gaze.is_some(),
        }
    }
}
