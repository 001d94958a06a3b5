use crate::adjacency::Surroundings;
use crate::facing::Facing;
use glam::Vec3;

/// Everything a pawn knows about itself outside its component tree
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PawnState {
    position: Vec3,
    facing: Facing,
    surroundings: Surroundings,
}

impl PawnState {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_surroundings(mut self, surroundings: Surroundings) -> Self {
        self.surroundings = surroundings;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn surroundings(&self) -> &Surroundings {
        &self.surroundings
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub(crate) fn facing_mut(&mut self) -> &mut Facing {
        &mut self.facing
    }

    pub(crate) fn set_surroundings(&mut self, surroundings: Surroundings) {
        self.surroundings = surroundings;
    }
}
