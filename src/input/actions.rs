//! Game action definitions
//!
//! Input is consumed as discrete named actions, never raw keys. Movement
//! actions report pressed for as long as the key is held; one-shot
//! actions (heal, debug damage, exit) fire once per press-release cycle.

use super::state::Behavior;

/// All game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // One-shot
    Heal,
    /// Debug action: self-inflict damage
    TakeDamage,
    Exit,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Heal,
        Action::TakeDamage,
        Action::Exit,
    ];

    /// How presses of this action are reported.
    pub fn behavior(self) -> Behavior {
        match self {
            Action::MoveUp | Action::MoveDown | Action::MoveLeft | Action::MoveRight => {
                Behavior::Normal
            }
            Action::Heal | Action::TakeDamage | Action::Exit => Behavior::InitialPressOnly,
        }
    }

    pub(super) fn index(self) -> usize {
        match self {
            Action::MoveUp => 0,
            Action::MoveDown => 1,
            Action::MoveLeft => 2,
            Action::MoveRight => 3,
            Action::Heal => 4,
            Action::TakeDamage => 5,
            Action::Exit => 6,
        }
    }
}
