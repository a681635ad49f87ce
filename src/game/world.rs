//! The game world
//!
//! The world owns the tile grid, the actors, the spells, and the event
//! queues, and is the only place any of them are mutated. The player is
//! pinned to the center of the viewport; movement actions scroll the grid
//! underneath it by exactly one tile per tick, all-or-nothing per axis.
//!
//! Each frame runs two passes. The update pass consumes the action
//! snapshot: movement, cast requests, the debug self-damage, and exit.
//! The render pass draws the grid, the player, and any in-flight spell
//! frames, advances the spells by the frame's elapsed time, and applies
//! completed spell effects and the deaths they cause.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::input::{Action, ActionSet};
use crate::map::{Axis, MapData, TileGrid};
use crate::render::RenderSurface;

use super::actor::{Actor, ActorId, Attributes, MAX_HEALTH};
use super::direction::Direction;
use super::event::{DeathEvent, Events};
use super::spell::{EffectKind, Spell, SpellEffect};

/// Damage dealt by the debug self-damage action.
const DEBUG_DAMAGE: i32 = 10;

pub struct World {
    grid: TileGrid,
    actors: Vec<Actor>,
    spells: Vec<Spell>,
    events: Events,
    running: Arc<AtomicBool>,
    tile_width: i32,
    tile_height: i32,
}

impl World {
    /// The player is always the first actor.
    pub const PLAYER: ActorId = ActorId(0);

    /// Build the world for one session. The grid's origin sits a quarter
    /// frame in from the top-left and the player at the frame center, so
    /// the player's offset from the origin stays a whole number of tiles
    /// as long as the quarter-frame is tile-aligned.
    pub fn new(map: &MapData, frame_width: i32, frame_height: i32) -> Self {
        let origin = (frame_width / 4, frame_height / 4);
        let player = Actor::new(
            frame_width / 2,
            frame_height / 2,
            Direction::North,
            MAX_HEALTH,
            100,
            Attributes {
                strength: 10,
                defense: 8,
                magic_defense: 6,
            },
        );
        Self {
            grid: TileGrid::new(map, origin),
            actors: vec![player],
            spells: vec![Spell::heal()],
            events: Events::new(),
            running: Arc::new(AtomicBool::new(true)),
            tile_width: map.tile_width,
            tile_height: map.tile_height,
        }
    }

    pub fn player(&self) -> &Actor {
        &self.actors[Self::PLAYER.0]
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Shared stop flag; the scheduler polls this between frames.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Request a cooperative shutdown at the end of the current frame.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// The update pass: consume the frame's action snapshot.
    pub fn update(&mut self, actions: &mut ActionSet) {
        if actions.is_pressed(Action::Exit) {
            self.stop();
        }

        // Movement scrolls the world opposite to the player's heading,
        // one tile per tick. Facing turns even when the scroll is
        // blocked, so the player can face a wall.
        let player_pos = self.player().position();
        if actions.is_pressed(Action::MoveLeft) {
            self.grid.translate(Axis::X, self.tile_width, player_pos);
            self.actors[Self::PLAYER.0].change_dir(Direction::West);
        }
        if actions.is_pressed(Action::MoveRight) {
            self.grid.translate(Axis::X, -self.tile_width, player_pos);
            self.actors[Self::PLAYER.0].change_dir(Direction::East);
        }
        if actions.is_pressed(Action::MoveUp) {
            self.grid.translate(Axis::Y, self.tile_height, player_pos);
            self.actors[Self::PLAYER.0].change_dir(Direction::North);
        }
        if actions.is_pressed(Action::MoveDown) {
            self.grid.translate(Axis::Y, -self.tile_height, player_pos);
            self.actors[Self::PLAYER.0].change_dir(Direction::South);
        }

        // Damage lands before the heal gate looks at health, so a
        // same-tick damage-plus-heal pair casts instead of refusing.
        if actions.is_pressed(Action::TakeDamage) {
            self.damage_actor(Self::PLAYER, DEBUG_DAMAGE);
        }
        if actions.is_pressed(Action::Heal) {
            self.request_heal();
        }
    }

    /// The render pass: draw everything, then advance the spells by the
    /// frame's elapsed time and apply whatever completed.
    pub fn render(&mut self, elapsed: Duration, surface: &mut impl RenderSurface) {
        surface.clear();
        for tile in self.grid.iter() {
            surface.draw_tile(tile.code(), tile.x(), tile.y());
        }

        let player = self.player();
        surface.draw_player(player.x(), player.y(), player.facing());
        surface.draw_stats(
            player.health(),
            player.mana(),
            player.attributes().as_array(),
        );

        for spell in &mut self.spells {
            if let Some(effect) = spell.advance(elapsed) {
                self.events.spell_effect.send(effect);
            }
            if let (Some(frame), Some(target)) = (spell.current_frame(), spell.target()) {
                let target = &self.actors[target.0];
                surface.draw_effect(frame, target.x(), target.y());
            }
        }

        self.apply_spell_effects();
        self.report_deaths();
    }

    /// Arm the heal spell on the player. Refused without feedback when the
    /// player is dead, already at full health, or short on mana; a cast
    /// already in flight is ignored by the spell itself.
    fn request_heal(&mut self) {
        let spell = &mut self.spells[0];
        let EffectKind::Heal { mana_cost, .. } = spell.kind();
        let player = &self.actors[Self::PLAYER.0];
        if player.is_dead() || player.health() >= MAX_HEALTH || player.mana() < mana_cost {
            return;
        }
        spell.cast(Self::PLAYER, Self::PLAYER);
    }

    fn damage_actor(&mut self, id: ActorId, amount: i32) {
        if self.actors[id.0].take_damage(amount) {
            self.events.death.send(DeathEvent { actor: id });
        }
    }

    /// Apply every completed spell effect in completion order. The caster
    /// pays the mana cost whether or not the effect changes anything.
    fn apply_spell_effects(&mut self) {
        let effects: Vec<SpellEffect> = self.events.spell_effect.drain().collect();
        for effect in effects {
            let EffectKind::Heal { restore, mana_cost } = effect.kind;
            self.actors[effect.caster.0].drain_mana(mana_cost);
            self.actors[effect.target.0].heal(restore);
        }
    }

    fn report_deaths(&mut self) {
        for event in self.events.death.drain() {
            println!("Actor {} died", event.actor.0);
        }
    }
}
