//! Input handling: named actions, their press/release state machines, and
//! the key bindings that feed them.

pub mod actions;
pub mod state;

pub use actions::Action;
pub use state::{poll_keys, ActionSet, ActionState, Behavior, KeyBindings};
