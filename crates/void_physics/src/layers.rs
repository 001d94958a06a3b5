//! Collision layers and filtering
//!
//! Layers are bit indices. Colliders carry [`CollisionGroups`] (what they
//! are and what they accept); probes only carry a layer mask, which becomes
//! a ray filter through [`CollisionGroups::mask`].

use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// A collision layer identifier (bit index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// Level geometry (the layer probes look at by default)
    pub const WORLD: Self = Self(0);
    /// Pawns
    pub const PAWNS: Self = Self(1);
    /// One-way or moving platforms
    pub const PLATFORMS: Self = Self(2);
    /// Damaging geometry
    pub const HAZARDS: Self = Self(3);

    /// Create a custom layer
    pub const fn custom(id: u32) -> Self {
        Self(id)
    }

    /// Get the layer as a bitmask
    pub fn as_mask(&self) -> u32 {
        1u32.checked_shl(self.0).unwrap_or(0)
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::WORLD
    }
}

/// Collision groups for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroups {
    /// Which groups this object belongs to (membership)
    pub memberships: u32,
    /// Which groups this object can interact with (filter)
    pub filter: u32,
}

impl CollisionGroups {
    /// Groups that interact with everything
    pub const ALL: Self = Self {
        memberships: u32::MAX,
        filter: u32::MAX,
    };

    /// Groups that interact with nothing
    pub const NONE: Self = Self {
        memberships: 0,
        filter: 0,
    };

    /// Create new collision groups
    pub fn new(memberships: u32, filter: u32) -> Self {
        Self { memberships, filter }
    }

    /// Create from a single layer that interacts with specific layers
    pub fn from_layer(layer: CollisionLayer, interacts_with: &[CollisionLayer]) -> Self {
        let filter = interacts_with.iter().fold(0u32, |acc, l| acc | l.as_mask());
        Self {
            memberships: layer.as_mask(),
            filter,
        }
    }

    /// Ray filter that accepts colliders on any layer of `mask`
    pub fn mask(mask: u32) -> Self {
        Self {
            memberships: u32::MAX,
            filter: mask,
        }
    }

    /// Check if two groups can interact
    pub fn can_collide(&self, other: &CollisionGroups) -> bool {
        (self.memberships & other.filter) != 0 && (other.memberships & self.filter) != 0
    }

    /// Add a layer to membership
    pub fn add_membership(mut self, layer: CollisionLayer) -> Self {
        self.memberships |= layer.as_mask();
        self
    }

    /// Add a layer to filter
    pub fn add_filter(mut self, layer: CollisionLayer) -> Self {
        self.filter |= layer.as_mask();
        self
    }

    pub(crate) fn to_rapier(self) -> rapier::InteractionGroups {
        rapier::InteractionGroups::new(
            rapier::Group::from_bits_truncate(self.memberships),
            rapier::Group::from_bits_truncate(self.filter),
        )
    }
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::ALL
    }
}
