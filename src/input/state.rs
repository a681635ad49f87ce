//! Input state management
//!
//! Each action carries a small press/release state machine. Normal
//! actions report pressed while the key is held; initial-press-only
//! actions report pressed once and then wait for the key to be released
//! before they can fire again. The world reads a per-tick snapshot
//! through [`ActionSet`]; key bindings are an associative map, and the
//! macroquad polling glue lives at the bottom of this module.

use std::collections::HashMap;

use macroquad::prelude::{is_key_pressed, is_key_released, KeyCode};

use super::actions::Action;

/// How presses of an action are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Pressed for as long as the key is held
    Normal,
    /// Pressed once per press-release cycle
    InitialPressOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Released,
    Pressed,
    /// Initial press consumed; ignore further presses until release
    WaitingForRelease,
}

/// Press/release state for one action.
#[derive(Debug, Clone)]
pub struct ActionState {
    behavior: Behavior,
    state: PressState,
    /// Presses not yet consumed by a query
    amount: u32,
}

impl ActionState {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            state: PressState::Released,
            amount: 0,
        }
    }

    /// Signal that the mapped key went down.
    pub fn press(&mut self) {
        if self.state != PressState::WaitingForRelease {
            self.amount += 1;
            self.state = PressState::Pressed;
        }
    }

    /// Signal that the mapped key went up.
    pub fn release(&mut self) {
        self.state = PressState::Released;
    }

    /// Signal a full press-release in one step.
    pub fn tap(&mut self) {
        self.press();
        self.release();
    }

    /// Whether the action counts as pressed for this query.
    ///
    /// Consumes the press for initial-press-only actions: the next query
    /// reports false until the key is released and pressed again.
    pub fn is_pressed(&mut self) -> bool {
        self.poll_amount() != 0
    }

    fn poll_amount(&mut self) -> u32 {
        let amount = self.amount;
        if amount != 0 {
            if self.state == PressState::Released {
                self.amount = 0;
            } else if self.behavior == Behavior::InitialPressOnly {
                self.state = PressState::WaitingForRelease;
                self.amount = 0;
            }
        }
        amount
    }

    /// Forget any pending presses.
    pub fn reset(&mut self) {
        self.state = PressState::Released;
        self.amount = 0;
    }
}

/// The per-tick action snapshot the world reads.
#[derive(Debug, Clone)]
pub struct ActionSet {
    states: [ActionState; Action::ALL.len()],
}

impl ActionSet {
    pub fn new() -> Self {
        Self {
            states: Action::ALL.map(|action| ActionState::new(action.behavior())),
        }
    }

    pub fn press(&mut self, action: Action) {
        self.states[action.index()].press();
    }

    pub fn release(&mut self, action: Action) {
        self.states[action.index()].release();
    }

    /// Signal a full press-release of `action` in one step.
    pub fn tap(&mut self, action: Action) {
        self.states[action.index()].tap();
    }

    pub fn is_pressed(&mut self, action: Action) -> bool {
        self.states[action.index()].is_pressed()
    }

    pub fn reset_all(&mut self) {
        for state in &mut self.states {
            state.reset();
        }
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Key-to-action bindings. Binding a key that is already mapped
/// overwrites the old binding.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The default layout: arrows to move, H to heal, E to self-damage,
    /// Escape to quit.
    pub fn defaults() -> Self {
        let mut bindings = Self::new();
        bindings.bind(KeyCode::Up, Action::MoveUp);
        bindings.bind(KeyCode::Down, Action::MoveDown);
        bindings.bind(KeyCode::Left, Action::MoveLeft);
        bindings.bind(KeyCode::Right, Action::MoveRight);
        bindings.bind(KeyCode::H, Action::Heal);
        bindings.bind(KeyCode::E, Action::TakeDamage);
        bindings.bind(KeyCode::Escape, Action::Exit);
        bindings
    }

    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Remove every key bound to `action`.
    pub fn clear_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    pub fn action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// All keys currently bound to `action`.
    pub fn keys_for(&self, action: Action) -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| *key as u32);
        keys
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Feed this frame's key edges into the action states.
/// Call once per rendered frame, before the update pass.
pub fn poll_keys(bindings: &KeyBindings, actions: &mut ActionSet) {
    for (&key, &action) in bindings.bindings.iter() {
        if is_key_pressed(key) {
            actions.press(action);
        }
        if is_key_released(key) {
            actions.release(action);
        }
    }
}
