//! Simulation core: the scheduler, the actors, the spells, and the world
//! that ties them together. Nothing in here talks to the windowing layer;
//! rendering goes through the `RenderSurface` trait.

pub mod actor;
pub mod direction;
pub mod event;
pub mod scheduler;
pub mod spell;
pub mod world;

pub use actor::{Actor, ActorId, Attributes, MAX_HEALTH};
pub use direction::{Direction, Rotation};
pub use event::{DeathEvent, EventQueue, Events};
pub use scheduler::{Pace, Scheduler, Simulation, MAX_FRAME_SKIPS, NO_DELAYS_PER_YIELD};
pub use spell::{Animation, EffectKind, Frame, FrameId, Spell, SpellEffect, SpellState};
pub use world::World;
