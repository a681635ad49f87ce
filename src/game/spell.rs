//! Spells
//!
//! A spell is a timed action with a strictly linear state sequence:
//!
//!   Standby -> Casting -> Cast -> Standby
//!
//! `cast()` arms the spell (Standby only; anything else is silently
//! ignored, there is no queuing). The render pass then drives it with
//! elapsed-time deltas: the first advance restarts the animation, later
//! advances play it, and once the accumulated timer exceeds the
//! animation's total duration the spell's effect is emitted exactly once
//! and the spell returns to Standby for reuse.
//!
//! Spells are constructed once at world creation and live for the whole
//! session. They reference their caster and target by [`ActorId`], valid
//! only while a cast is in flight; the world applies emitted effects to
//! the actual actors.

use std::time::Duration;

use super::actor::ActorId;

/// Index of an effect frame image in the effect atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(pub u16);

/// One animation frame: an image and how long it stays on screen.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub image: FrameId,
    pub duration: Duration,
}

/// An ordered sequence of timed frames with a cumulative total duration.
///
/// Advances linearly by elapsed time and loops past the end; `start()`
/// rewinds it for a fresh playback.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    frames: Vec<Frame>,
    total: Duration,
    position: Duration,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame shown for `duration_ms` milliseconds.
    pub fn add_frame(&mut self, image: FrameId, duration_ms: u64) {
        let duration = Duration::from_millis(duration_ms);
        self.frames.push(Frame { image, duration });
        self.total += duration;
    }

    /// Restart playback from the first frame.
    pub fn start(&mut self) {
        self.position = Duration::ZERO;
    }

    /// Advance playback by `elapsed`, wrapping past the total duration.
    pub fn update(&mut self, elapsed: Duration) {
        if self.frames.len() <= 1 || self.total.is_zero() {
            return;
        }
        let wrapped = (self.position.as_nanos() + elapsed.as_nanos()) % self.total.as_nanos();
        self.position = Duration::from_nanos(wrapped as u64);
    }

    /// The image for the current playback position.
    pub fn current_image(&self) -> Option<FrameId> {
        let mut end = Duration::ZERO;
        for frame in &self.frames {
            end += frame.duration;
            if self.position < end {
                return Some(frame.image);
            }
        }
        self.frames.last().map(|frame| frame.image)
    }

    /// Sum of all frame durations.
    pub fn total_duration(&self) -> Duration {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Where a spell is in its cast cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellState {
    /// Idle, ready to be cast
    Standby,
    /// Cast requested, waiting for the first render tick
    Casting,
    /// Animation playing, timer accumulating
    Cast,
}

/// What a completed spell does to its caster and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Restore `restore` health on the target for `mana_cost` of the
    /// caster's mana.
    Heal { restore: i32, mana_cost: i32 },
}

/// A completed cast, ready to be applied to the actors by the world.
#[derive(Debug, Clone, Copy)]
pub struct SpellEffect {
    pub caster: ActorId,
    pub target: ActorId,
    pub kind: EffectKind,
}

/// A timed, animated action with a one-shot effect on completion.
#[derive(Debug, Clone)]
pub struct Spell {
    name: String,
    kind: EffectKind,
    anim: Animation,
    state: SpellState,
    timer: Duration,
    caster: Option<ActorId>,
    target: Option<ActorId>,
}

impl Spell {
    pub fn new(name: impl Into<String>, kind: EffectKind, anim: Animation) -> Self {
        Self {
            name: name.into(),
            kind,
            anim,
            state: SpellState::Standby,
            timer: Duration::ZERO,
            caster: None,
            target: None,
        }
    }

    /// The self-heal: restores 10 health for 10 mana, with a four-phase
    /// animation (forming, formed, dissipating, dissipated).
    pub fn heal() -> Self {
        let mut anim = Animation::new();
        anim.add_frame(FrameId(0), 100); // forming
        anim.add_frame(FrameId(1), 150); // formed
        anim.add_frame(FrameId(2), 150); // dissipating
        anim.add_frame(FrameId(3), 100); // dissipated
        Self::new(
            "Heal",
            EffectKind::Heal {
                restore: 10,
                mana_cost: 10,
            },
            anim,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SpellState {
        self.state
    }

    /// The effect this spell produces on completion.
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// True while a cast cycle is in flight (Casting or Cast).
    pub fn is_active(&self) -> bool {
        self.state != SpellState::Standby
    }

    /// The caster of the in-flight cast, if any.
    pub fn caster(&self) -> Option<ActorId> {
        self.caster
    }

    /// The target of the in-flight cast, if any.
    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    /// Accumulated real time since the cast entered the render loop.
    pub fn timer(&self) -> Duration {
        self.timer
    }

    /// Arm the spell. Only effective from Standby; a cast request while a
    /// cycle is in flight is silently ignored.
    pub fn cast(&mut self, caster: ActorId, target: ActorId) {
        if self.state != SpellState::Standby {
            return;
        }
        self.caster = Some(caster);
        self.target = Some(target);
        self.timer = Duration::ZERO;
        self.state = SpellState::Casting;
    }

    /// Drive the cast cycle by one render tick of `elapsed` time.
    ///
    /// Returns the spell's effect on the tick that completes the cycle,
    /// and `None` on every other tick. After completion the spell is back
    /// in Standby with a zeroed timer, ready for the next cast.
    pub fn advance(&mut self, elapsed: Duration) -> Option<SpellEffect> {
        match self.state {
            SpellState::Standby => return None,
            SpellState::Casting => {
                // First render tick after cast(): restart the animation
                self.anim.start();
                self.timer += elapsed;
                self.state = SpellState::Cast;
            }
            SpellState::Cast => {
                self.anim.update(elapsed);
                self.timer += elapsed;
            }
        }

        if self.timer > self.anim.total_duration() {
            let effect = match (self.caster.take(), self.target.take()) {
                (Some(caster), Some(target)) => Some(SpellEffect {
                    caster,
                    target,
                    kind: self.kind,
                }),
                _ => None,
            };
            self.state = SpellState::Standby;
            self.timer = Duration::ZERO;
            return effect;
        }
        None
    }

    /// The animation frame to draw for the current tick, while active.
    pub fn current_frame(&self) -> Option<FrameId> {
        if self.is_active() {
            self.anim.current_image()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_animation_walks_frames_by_elapsed_time() {
        let mut anim = Animation::new();
        anim.add_frame(FrameId(0), 100);
        anim.add_frame(FrameId(1), 150);
        anim.add_frame(FrameId(2), 50);
        assert_eq!(anim.total_duration(), Duration::from_millis(300));

        anim.start();
        assert_eq!(anim.current_image(), Some(FrameId(0)));

        anim.update(120 * MS);
        assert_eq!(anim.current_image(), Some(FrameId(1)));

        anim.update(140 * MS); // at 260ms
        assert_eq!(anim.current_image(), Some(FrameId(2)));

        // Wraps around past the total
        anim.update(60 * MS); // at 320 -> 20ms
        assert_eq!(anim.current_image(), Some(FrameId(0)));
    }

    #[test]
    fn test_animation_restart() {
        let mut anim = Animation::new();
        anim.add_frame(FrameId(0), 100);
        anim.add_frame(FrameId(1), 100);
        anim.update(150 * MS);
        assert_eq!(anim.current_image(), Some(FrameId(1)));
        anim.start();
        assert_eq!(anim.current_image(), Some(FrameId(0)));
    }

    #[test]
    fn test_cast_only_from_standby() {
        let mut spell = Spell::heal();
        spell.cast(ActorId(0), ActorId(0));
        assert_eq!(spell.state(), SpellState::Casting);

        // A second cast while in flight is ignored, timer untouched
        spell.advance(50 * MS);
        let timer = spell.timer();
        spell.cast(ActorId(1), ActorId(1));
        assert_eq!(spell.state(), SpellState::Cast);
        assert_eq!(spell.timer(), timer);
        assert_eq!(spell.caster(), Some(ActorId(0)));
    }

    #[test]
    fn test_effect_fires_exactly_once_per_cycle() {
        let mut spell = Spell::heal();
        let total = Duration::from_millis(500);
        spell.cast(ActorId(0), ActorId(0));

        // Ticks summing to exactly the total duration: no effect yet
        let mut fired = 0;
        for _ in 0..10 {
            if spell.advance(50 * MS).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);
        assert_eq!(spell.timer(), total);

        // One more millisecond pushes past the total: effect, then reset
        let effect = spell.advance(MS).expect("effect due at T+eps");
        assert_eq!(effect.caster, ActorId(0));
        assert!(matches!(
            effect.kind,
            EffectKind::Heal {
                restore: 10,
                mana_cost: 10
            }
        ));
        assert_eq!(spell.state(), SpellState::Standby);
        assert_eq!(spell.timer(), Duration::ZERO);

        // Advancing an idle spell does nothing
        assert!(spell.advance(1000 * MS).is_none());
        assert_eq!(spell.state(), SpellState::Standby);
    }

    #[test]
    fn test_spell_is_reusable_after_completion() {
        let mut spell = Spell::heal();
        for _ in 0..3 {
            spell.cast(ActorId(2), ActorId(5));
            let mut effects = 0;
            // Plenty of ticks to complete one cycle
            for _ in 0..20 {
                if spell.advance(50 * MS).is_some() {
                    effects += 1;
                }
            }
            assert_eq!(effects, 1);
            assert_eq!(spell.state(), SpellState::Standby);
        }
    }

    #[test]
    fn test_first_advance_restarts_animation() {
        let mut spell = Spell::heal();
        spell.cast(ActorId(0), ActorId(0));
        spell.advance(50 * MS);
        // Casting tick counts toward the timer but shows the first frame
        assert_eq!(spell.current_frame(), Some(FrameId(0)));
        spell.advance(200 * MS);
        assert_eq!(spell.current_frame(), Some(FrameId(1)));
    }
}
