//! A small real-time engine for 2D tile-scrolling games.
//!
//! The player is pinned to the center of the screen and the world scrolls
//! underneath it, one tile per input tick, with all-or-nothing collision
//! per axis. A fixed-period scheduler keeps simulation time from drifting
//! behind wall time by skipping renders, never updates. Spells are timed
//! state machines whose one-shot effects are applied through event
//! queues.

pub mod config;
pub mod game;
pub mod input;
pub mod map;
pub mod render;
