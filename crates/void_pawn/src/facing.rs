//! Face directions requested by actions, and the pawn's resulting facing

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal facing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FaceDirectionX {
    #[default]
    NoChange,
    Left,
    Right,
}

/// Vertical facing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FaceDirectionY {
    #[default]
    NoChange,
    Down,
    Up,
}

/// A facing request on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FaceDirection {
    pub x: FaceDirectionX,
    pub y: FaceDirectionY,
}

impl FaceDirection {
    pub const NO_CHANGE: Self = Self {
        x: FaceDirectionX::NoChange,
        y: FaceDirectionY::NoChange,
    };

    pub fn new(x: FaceDirectionX, y: FaceDirectionY) -> Self {
        Self { x, y }
    }

    pub fn horizontal(x: FaceDirectionX) -> Self {
        Self {
            x,
            y: FaceDirectionY::NoChange,
        }
    }

    pub fn vertical(y: FaceDirectionY) -> Self {
        Self {
            x: FaceDirectionX::NoChange,
            y,
        }
    }

    /// Face along the signs of a movement; zero components request no change
    pub fn from_movement(movement: Vec2) -> Self {
        let x = if movement.x < 0.0 {
            FaceDirectionX::Left
        } else if movement.x > 0.0 {
            FaceDirectionX::Right
        } else {
            FaceDirectionX::NoChange
        };
        let y = if movement.y < 0.0 {
            FaceDirectionY::Down
        } else if movement.y > 0.0 {
            FaceDirectionY::Up
        } else {
            FaceDirectionY::NoChange
        };
        Self { x, y }
    }
}

/// Which way the pawn faces. Starts right and up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing {
    pub right: bool,
    pub up: bool,
}

impl Default for Facing {
    fn default() -> Self {
        Self {
            right: true,
            up: true,
        }
    }
}

impl Facing {
    /// Apply a request; `NoChange` keeps the current value
    pub fn apply(&mut self, direction: FaceDirection) {
        match direction.x {
            FaceDirectionX::Left => self.right = false,
            FaceDirectionX::Right => self.right = true,
            FaceDirectionX::NoChange => {}
        }
        match direction.y {
            FaceDirectionY::Down => self.up = false,
            FaceDirectionY::Up => self.up = true,
            FaceDirectionY::NoChange => {}
        }
    }

    pub fn is_facing_right(&self) -> bool {
        self.right
    }

    pub fn is_facing_left(&self) -> bool {
        !self.right
    }

    pub fn is_facing_up(&self) -> bool {
        self.up
    }

    pub fn is_facing_down(&self) -> bool {
        !self.up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_movement() {
        assert_eq!(
            FaceDirection::from_movement(Vec2::new(-0.1, 0.0)),
            FaceDirection::horizontal(FaceDirectionX::Left)
        );
        assert_eq!(
            FaceDirection::from_movement(Vec2::new(2.0, -1.0)),
            FaceDirection::new(FaceDirectionX::Right, FaceDirectionY::Down)
        );
        assert_eq!(FaceDirection::from_movement(Vec2::ZERO), FaceDirection::NO_CHANGE);
    }

    #[test]
    fn test_no_change_is_sticky() {
        let mut facing = Facing::default();
        assert!(facing.is_facing_right());
        assert!(facing.is_facing_up());

        facing.apply(FaceDirection::new(FaceDirectionX::Left, FaceDirectionY::Down));
        facing.apply(FaceDirection::NO_CHANGE);
        assert!(facing.is_facing_left());
        assert!(facing.is_facing_down());

        facing.apply(FaceDirection::vertical(FaceDirectionY::Up));
        assert!(facing.is_facing_left());
        assert!(facing.is_facing_up());
    }
}
