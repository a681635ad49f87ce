//! Actors
//!
//! An actor is a positioned, oriented entity with combat stats. The player
//! is an actor pinned to the center of the viewport; the world scrolls
//! underneath it. Non-player actors share the same type.

use super::direction::Direction;

/// Health is clamped to this upper bound for every actor.
pub const MAX_HEALTH: i32 = 100;

/// Identifies an actor inside the world's actor storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub usize);

/// The fixed combat attribute triple every actor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub strength: i32,
    pub defense: i32,
    pub magic_defense: i32,
}

impl Attributes {
    /// The attributes in display order (strength, defense, magic defense).
    pub fn as_array(&self) -> [i32; 3] {
        [self.strength, self.defense, self.magic_defense]
    }
}

/// A positioned, oriented entity with combat stats.
#[derive(Debug, Clone)]
pub struct Actor {
    x: i32,
    y: i32,
    facing: Direction,
    prev_facing: Direction,
    health: i32,
    /// Mana has no upper bound; only the zero floor is enforced. Whether a
    /// cap symmetric with MAX_HEALTH should exist is an open product
    /// question.
    mana: i32,
    attributes: Attributes,
    dead: bool,
}

impl Actor {
    pub fn new(
        x: i32,
        y: i32,
        facing: Direction,
        health: i32,
        mana: i32,
        attributes: Attributes,
    ) -> Self {
        Self {
            x,
            y,
            facing,
            prev_facing: facing,
            health: health.clamp(0, MAX_HEALTH),
            mana: mana.max(0),
            attributes,
            dead: health <= 0,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// The facing before the most recent direction change.
    pub fn prev_facing(&self) -> Direction {
        self.prev_facing
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Change the facing. A request for the current facing is a no-op:
    /// the previous facing is only recorded on an actual change, so the
    /// renderer's turn animation never sees a zero-degree "turn".
    pub fn change_dir(&mut self, direction: Direction) {
        if direction == self.facing {
            return;
        }
        self.prev_facing = self.facing;
        self.facing = direction;
    }

    /// Apply damage, clamping health at zero.
    ///
    /// Returns true exactly once: on the call that drives health to zero.
    /// Further damage after death only clamps and never re-reports it.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        if self.health == 0 && !self.dead {
            self.dead = true;
            return true;
        }
        false
    }

    /// Restore health, clamping at MAX_HEALTH.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    /// Spend mana, flooring at zero. There is no upper clamp.
    pub fn drain_mana(&mut self, amount: i32) {
        self.mana = (self.mana - amount).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_actor() -> Actor {
        Actor::new(
            320,
            240,
            Direction::North,
            100,
            100,
            Attributes {
                strength: 10,
                defense: 10,
                magic_defense: 10,
            },
        )
    }

    #[test]
    fn test_health_stays_in_bounds() {
        let mut actor = test_actor();
        actor.take_damage(30);
        assert_eq!(actor.health(), 70);
        actor.take_damage(1000);
        assert_eq!(actor.health(), 0);
        actor.heal(5);
        assert_eq!(actor.health(), 5);
        actor.heal(1000);
        assert_eq!(actor.health(), MAX_HEALTH);
    }

    #[test]
    fn test_mana_floors_at_zero() {
        let mut actor = test_actor();
        actor.drain_mana(40);
        assert_eq!(actor.mana(), 60);
        actor.drain_mana(1000);
        assert_eq!(actor.mana(), 0);
    }

    #[test]
    fn test_death_reported_exactly_once() {
        let mut actor = test_actor();
        assert!(!actor.take_damage(50));
        assert!(actor.take_damage(50)); // transition to zero
        assert!(actor.is_dead());
        // Clamp only, no second death
        assert!(!actor.take_damage(10));
        assert_eq!(actor.health(), 0);
    }

    #[test]
    fn test_exact_kill_triggers_death() {
        // Damage that lands exactly on zero still counts as dying.
        let mut actor = test_actor();
        assert!(actor.take_damage(100));
    }

    #[test]
    fn test_change_dir_same_direction_is_noop() {
        let mut actor = test_actor();
        actor.change_dir(Direction::East);
        assert_eq!(actor.facing(), Direction::East);
        assert_eq!(actor.prev_facing(), Direction::North);

        // Re-facing East keeps the previous facing untouched
        actor.change_dir(Direction::East);
        assert_eq!(actor.facing(), Direction::East);
        assert_eq!(actor.prev_facing(), Direction::North);
    }

    #[test]
    fn test_change_dir_tracks_previous_facing() {
        let mut actor = test_actor();
        actor.change_dir(Direction::South);
        actor.change_dir(Direction::West);
        assert_eq!(actor.facing(), Direction::West);
        assert_eq!(actor.prev_facing(), Direction::South);
    }
}
