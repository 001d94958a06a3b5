//! Nearest surfaces around a pawn, and which of them it is touching

use crate::config::{AngleThresholds, PawnConfig};
use crate::facing::Facing;
use crate::raycast::{ProbeContext, Raycaster, ShapecastResult};
use crate::surface::ClassifiedSurface;
use glam::Vec2;
use std::fmt;

/// World up, projected onto the pawn plane
pub const UP: Vec2 = Vec2::Y;

/// The closest surface found in one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestSurface {
    surface: ClassifiedSurface,
    /// Skin-corrected distance; infinite when nothing was hit
    distance: f32,
    is_adjacent: bool,
}

impl NearestSurface {
    /// Nothing in range
    pub const NOTHING: Self = Self {
        surface: ClassifiedSurface::AIR,
        distance: f32::INFINITY,
        is_adjacent: false,
    };

    pub fn new(surface: ClassifiedSurface, distance: f32, is_adjacent: bool) -> Self {
        Self {
            surface,
            distance,
            is_adjacent,
        }
    }

    /// Adjacent when `distance <= adjacency_distance`
    pub fn within(surface: ClassifiedSurface, distance: f32, adjacency_distance: f32) -> Self {
        Self::new(surface, distance, distance <= adjacency_distance)
    }

    pub fn surface(&self) -> ClassifiedSurface {
        self.surface
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_adjacent(&self) -> bool {
        self.is_adjacent
    }

    /// The surface if touching, otherwise air
    pub fn adjacent(&self) -> ClassifiedSurface {
        if self.is_adjacent {
            self.surface
        } else {
            ClassifiedSurface::AIR
        }
    }
}

impl Default for NearestSurface {
    fn default() -> Self {
        Self::NOTHING
    }
}

impl fmt::Display for NearestSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reach = if self.is_adjacent { "adjacent" } else { "distant" };
        write!(f, "{} at {} ({})", self.surface.surface_type(), self.distance, reach)
    }
}

/// Classify a shape cast and threshold it against the adjacency distance
pub fn nearest_surface(
    shapecast: &ShapecastResult,
    up: Vec2,
    thresholds: &AngleThresholds,
    adjacency_distance: f32,
) -> NearestSurface {
    if !shapecast.has_hit() {
        return NearestSurface::NOTHING;
    }

    let normal = shapecast.hit_normal().truncate();
    let surface = ClassifiedSurface::classify(true, normal, up, thresholds);
    NearestSurface::within(surface, shapecast.hit_distance(), adjacency_distance)
}

/// The four nearest surfaces around a pawn
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surroundings {
    to_left: NearestSurface,
    to_right: NearestSurface,
    below: NearestSurface,
    above: NearestSurface,
}

impl Surroundings {
    /// Records as given, without backfill
    pub fn new(
        to_left: NearestSurface,
        to_right: NearestSurface,
        below: NearestSurface,
        above: NearestSurface,
    ) -> Self {
        Self {
            to_left,
            to_right,
            below,
            above,
        }
    }

    /// Air on every side; used while no probe is active
    pub fn air() -> Self {
        Self::default()
    }

    /// Combine four independent probes, backfilling slopes the side probes
    /// missed.
    ///
    /// A box resting on a slope often touches it only with a bottom corner,
    /// so the side facing uphill sees air. A slanted surface below (or
    /// above) that leans towards an empty side is copied into that side.
    /// Air below (or above) is replaced by a side surface facing up (or
    /// down).
    pub fn resolve(
        to_left: NearestSurface,
        to_right: NearestSurface,
        below: NearestSurface,
        above: NearestSurface,
    ) -> Self {
        let mut s = Self::new(to_left, to_right, below, above);

        let below_adjacent = s.below_adjacent();
        if below_adjacent.is_slanted() {
            if below_adjacent.faces_left() && s.right_adjacent().is_air() {
                s.to_right = s.below;
            } else if below_adjacent.faces_right() && s.left_adjacent().is_air() {
                s.to_left = s.below;
            }
        } else if below_adjacent.is_air() {
            if s.left_adjacent().faces_up() {
                s.below = s.to_left;
            } else if s.right_adjacent().faces_up() {
                s.below = s.to_right;
            }
        }

        let above_adjacent = s.above_adjacent();
        if above_adjacent.is_slanted() {
            if above_adjacent.faces_left() && s.right_adjacent().is_air() {
                s.to_right = s.above;
            } else if above_adjacent.faces_right() && s.left_adjacent().is_air() {
                s.to_left = s.above;
            }
        } else if above_adjacent.is_air() {
            if s.left_adjacent().faces_down() {
                s.above = s.to_left;
            } else if s.right_adjacent().faces_down() {
                s.above = s.to_right;
            }
        }

        s
    }

    /// Probe all four directions and resolve the result
    pub fn probe(probe: &dyn Raycaster, ctx: &ProbeContext<'_>, config: &PawnConfig) -> Self {
        let distance = config.nearest_surface_check_distance;
        let classify = |cast: ShapecastResult| {
            nearest_surface(&cast, UP, &config.angles, config.adjacency_check_distance)
        };

        Self::resolve(
            classify(probe.check_left(ctx, distance)),
            classify(probe.check_right(ctx, distance)),
            classify(probe.check_down(ctx, distance)),
            classify(probe.check_up(ctx, distance)),
        )
    }

    pub fn to_left(&self) -> NearestSurface {
        self.to_left
    }

    pub fn to_right(&self) -> NearestSurface {
        self.to_right
    }

    pub fn below(&self) -> NearestSurface {
        self.below
    }

    pub fn above(&self) -> NearestSurface {
        self.above
    }

    pub fn left_adjacent(&self) -> ClassifiedSurface {
        self.to_left.adjacent()
    }

    pub fn right_adjacent(&self) -> ClassifiedSurface {
        self.to_right.adjacent()
    }

    pub fn below_adjacent(&self) -> ClassifiedSurface {
        self.below.adjacent()
    }

    pub fn above_adjacent(&self) -> ClassifiedSurface {
        self.above.adjacent()
    }

    /// The side a horizontal move of `distance` heads into
    pub fn ahead(&self, distance: f32) -> NearestSurface {
        if distance < 0.0 {
            self.to_left
        } else {
            self.to_right
        }
    }

    /// The side the pawn faces
    pub fn front(&self, facing: Facing) -> NearestSurface {
        if facing.is_facing_right() {
            self.to_right
        } else {
            self.to_left
        }
    }

    pub fn behind(&self, facing: Facing) -> NearestSurface {
        if facing.is_facing_right() {
            self.to_left
        } else {
            self.to_right
        }
    }

    pub fn front_adjacent(&self, facing: Facing) -> ClassifiedSurface {
        self.front(facing).adjacent()
    }

    pub fn behind_adjacent(&self, facing: Facing) -> ClassifiedSurface {
        self.behind(facing).adjacent()
    }
}

impl fmt::Display for Surroundings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Left: {}, Right: {}, Below: {}, Above: {}",
            self.to_left, self.to_right, self.below, self.above
        )
    }
}
