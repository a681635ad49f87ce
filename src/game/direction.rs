//! Cardinal facings
//!
//! Actors visually present one of four orientations. The renderer keeps a
//! single canonical sprite (drawn facing North) and rotates it by the
//! facing's angle at draw time, so direction changes never resample the
//! image. The minimal-rotation computation relative to the *previous*
//! facing is still exposed for callers that animate the turn itself.

use std::f32::consts::{FRAC_PI_2, PI};

/// The direction an actor is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in clockwise order starting from North.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Draw rotation in radians for a sprite whose canonical image faces North.
    pub fn angle(self) -> f32 {
        match self {
            Direction::North => 0.0,
            Direction::East => FRAC_PI_2,
            Direction::South => PI,
            Direction::West => -FRAC_PI_2,
        }
    }

    /// The minimal rotation that turns `prev` into `self`.
    ///
    /// Computed from the previous facing, not from a canonical base, so
    /// repeated direction changes compose incrementally.
    pub fn rotation_from(self, prev: Direction) -> Rotation {
        let steps = (self.index() + 4 - prev.index()) % 4;
        match steps {
            0 => Rotation::None,
            1 => Rotation::Clockwise,
            2 => Rotation::Half,
            _ => Rotation::CounterClockwise,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

/// A quarter-step rotation between two facings (0, +-90 or 180 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Clockwise,
    CounterClockwise,
    Half,
}

impl Rotation {
    /// The rotation expressed in radians (clockwise positive).
    pub fn radians(self) -> f32 {
        match self {
            Rotation::None => 0.0,
            Rotation::Clockwise => FRAC_PI_2,
            Rotation::CounterClockwise => -FRAC_PI_2,
            Rotation::Half => PI,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_direction_no_rotation() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotation_from(dir), Rotation::None);
        }
    }

    #[test]
    fn test_minimal_rotation_from_previous() {
        // Turning North from East is a quarter turn counter-clockwise,
        // not a three-quarter clockwise spin.
        assert_eq!(
            Direction::North.rotation_from(Direction::East),
            Rotation::CounterClockwise
        );
        assert_eq!(
            Direction::North.rotation_from(Direction::South),
            Rotation::Half
        );
        assert_eq!(
            Direction::North.rotation_from(Direction::West),
            Rotation::Clockwise
        );
        assert_eq!(
            Direction::East.rotation_from(Direction::North),
            Rotation::Clockwise
        );
        assert_eq!(
            Direction::West.rotation_from(Direction::South),
            Rotation::Clockwise
        );
    }

    #[test]
    fn test_angles_are_quarter_turns() {
        assert_eq!(Direction::North.angle(), 0.0);
        assert_eq!(Direction::East.angle(), FRAC_PI_2);
        assert_eq!(Direction::South.angle(), PI);
        assert_eq!(Direction::West.angle(), -FRAC_PI_2);
    }
}
