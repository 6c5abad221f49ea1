#![forbid(unsafe_code)]

//! Horizontal swipe directions and direction sets.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Horizontal direction of a swipe sample or gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction of a signed horizontal delta, `None` for zero.
    #[must_use]
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Right)
        } else if delta < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The single-bit set containing this direction.
    #[must_use]
    pub const fn as_set(self) -> Directions {
        match self {
            Self::Left => Directions::LEFT,
            Self::Right => Directions::RIGHT,
        }
    }
}

bitflags! {
    /// Set of permitted horizontal directions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Directions: u8 {
        const LEFT = 0b01;
        const RIGHT = 0b10;
        const BOTH = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl Directions {
    /// Whether `direction` is in the set.
    #[inline]
    #[must_use]
    pub const fn allows(self, direction: SwipeDirection) -> bool {
        self.contains(direction.as_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_delta_signs() {
        assert_eq!(SwipeDirection::from_delta(3.0), Some(SwipeDirection::Right));
        assert_eq!(SwipeDirection::from_delta(-0.5), Some(SwipeDirection::Left));
        assert_eq!(SwipeDirection::from_delta(0.0), None);
    }

    #[test]
    fn opposite_round_trips() {
        for dir in [SwipeDirection::Left, SwipeDirection::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn direction_sets() {
        assert!(Directions::BOTH.allows(SwipeDirection::Left));
        assert!(Directions::BOTH.allows(SwipeDirection::Right));
        assert!(Directions::LEFT.allows(SwipeDirection::Left));
        assert!(!Directions::LEFT.allows(SwipeDirection::Right));
        assert!(!Directions::empty().allows(SwipeDirection::Right));
    }
}
