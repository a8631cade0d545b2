//! Eight-way facing for walk animations
//!
//! Screen space: +x is right, +y is down.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;

/// Direction the agent is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Right,
    DownRight,
    #[default]
    Down,
    DownLeft,
    Left,
    UpLeft,
    Up,
    UpRight,
}

impl Facing {
    const SECTORS: [Facing; 8] = [
        Facing::Right,
        Facing::DownRight,
        Facing::Down,
        Facing::DownLeft,
        Facing::Left,
        Facing::UpLeft,
        Facing::Up,
        Facing::UpRight,
    ];

    /// Nearest of the eight directions, or `None` for a zero vector
    #[must_use]
    pub fn from_direction(direction: Vec2) -> Option<Self> {
        if direction.length_squared() <= f32::EPSILON {
            return None;
        }
        let sector = (direction.to_angle() / FRAC_PI_4).round() as i32;
        Some(Self::SECTORS[sector.rem_euclid(8) as usize])
    }

    /// Walk animation name and whether the sprite is mirrored horizontally.
    ///
    /// Only right-facing clips exist; left-facing ones are mirrors.
    #[must_use]
    pub fn walk_animation(self) -> (&'static str, bool) {
        match self {
            Self::Right => ("walk_Right", false),
            Self::Left => ("walk_Right", true),
            Self::Up => ("walk_Up", false),
            Self::Down => ("walk_Down", false),
            Self::UpRight => ("walk_UpRight", false),
            Self::UpLeft => ("walk_UpRight", true),
            Self::DownRight => ("walk_DownRight", false),
            Self::DownLeft => ("walk_DownRight", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_directions() {
        assert_eq!(Facing::from_direction(Vec2::X), Some(Facing::Right));
        assert_eq!(Facing::from_direction(-Vec2::X), Some(Facing::Left));
        assert_eq!(Facing::from_direction(Vec2::Y), Some(Facing::Down));
        assert_eq!(Facing::from_direction(-Vec2::Y), Some(Facing::Up));
    }

    #[test]
    fn test_diagonals_and_near_misses() {
        assert_eq!(Facing::from_direction(Vec2::new(-1.0, -1.0)), Some(Facing::UpLeft));
        assert_eq!(Facing::from_direction(Vec2::new(1.0, 1.0)), Some(Facing::DownRight));
        assert_eq!(Facing::from_direction(Vec2::new(10.0, 1.0)), Some(Facing::Right));
        assert_eq!(Facing::from_direction(Vec2::ZERO), None);
    }

    #[test]
    fn test_left_animations_are_mirrored() {
        assert_eq!(Facing::DownLeft.walk_animation(), ("walk_DownRight", true));
        assert_eq!(Facing::Up.walk_animation(), ("walk_Up", false));
    }
}
