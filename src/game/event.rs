//! Event queues
//!
//! Spells and combat report outcomes as events instead of mutating actors
//! directly; the world is the sole mutator and applies queued events at a
//! known point in the frame. This keeps spell advancement borrow-free and
//! makes the apply order deterministic.

use super::actor::ActorId;
use super::spell::SpellEffect;

/// Holds events of one type until the world applies them.
///
/// Arrival order is preserved, so effects resolve in the order the
/// spells completed.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

// Not derived: the derive would demand T: Default
impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Queue an event for later application.
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Look at pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Consume every pending event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop pending events unprocessed.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// The queues the world drains each frame.
#[derive(Debug, Default)]
pub struct Events {
    /// An actor's health reached zero
    pub death: EventQueue<DeathEvent>,

    /// A spell finished its cast cycle and its effect is due
    pub spell_effect: EventQueue<SpellEffect>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            death: EventQueue::new(),
            spell_effect: EventQueue::new(),
        }
    }

    /// Drop everything still pending in every queue.
    pub fn clear_all(&mut self) {
        self.death.clear();
        self.spell_effect.clear();
    }
}

/// An actor died
#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Who died
    pub actor: ActorId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::spell::EffectKind;

    #[test]
    fn test_queue_drains_in_arrival_order() {
        let mut queue = EventQueue::new();
        queue.send(DeathEvent { actor: ActorId(7) });
        queue.send(DeathEvent { actor: ActorId(2) });
        assert_eq!(queue.len(), 2);

        let order: Vec<usize> = queue.drain().map(|event| event.actor.0).collect();
        assert_eq!(order, vec![7, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_all_empties_every_queue() {
        let mut events = Events::new();
        events.death.send(DeathEvent { actor: ActorId(0) });
        events.spell_effect.send(SpellEffect {
            caster: ActorId(0),
            target: ActorId(0),
            kind: EffectKind::Heal {
                restore: 10,
                mana_cost: 10,
            },
        });

        events.clear_all();
        assert!(events.death.is_empty());
        assert!(events.spell_effect.is_empty());
    }
}
