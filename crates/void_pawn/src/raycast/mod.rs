//! Raycast probes
//!
//! A probe turns the scene's single-ray primitive into directional
//! "shape casts": several parallel rays along one edge of a rectangle,
//! reduced to the closest hit and corrected by a skin width.
//!
//! ```text
//!          check_up
//!       ↑    ↑    ↑
//!     ┌─┼────┼────┼─┐
//!   ← ┼ ·    ·    · ┼ →
//!   ← ┼ ·  skin   · ┼ →    rays start `skin` inside the edge
//!   ← ┼ ·    ·    · ┼ →
//!     └─┼────┼────┼─┘
//!       ↓    ↓    ↓
//!         check_down
//! ```

mod array;
mod box_probe;
mod result;

pub use array::RaycastArray;
pub use box_probe::RaycastBox;
pub use result::{RaycastResult, ShapecastResult};

use crate::components::AsAny;
use glam::{Vec2, Vec3};
use std::fmt;
use void_physics::SceneQuery;

/// Where a probe is fired from and what it is fired into
#[derive(Clone, Copy)]
pub struct ProbeContext<'a> {
    pub scene: &'a dyn SceneQuery,
    pub origin: Vec3,
}

impl<'a> ProbeContext<'a> {
    pub fn new(scene: &'a dyn SceneQuery, origin: Vec3) -> Self {
        Self { scene, origin }
    }

    /// World position of a local XY offset
    pub fn at(&self, offset: Vec2) -> Vec3 {
        self.origin + offset.extend(0.0)
    }
}

impl fmt::Debug for ProbeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeContext")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// A rectangular probe. Distances are world units; a negative distance
/// checks the opposite direction.
pub trait Raycaster: AsAny + fmt::Debug {
    /// Width and height of the probed rectangle
    fn size(&self) -> Vec2;

    fn skin_width(&self) -> f32;

    fn check_left(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult;
    fn check_right(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult;
    fn check_down(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult;
    fn check_up(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult;

    /// Cast from the left edge through the rectangle
    fn check_interior_from_left(&self, ctx: &ProbeContext<'_>) -> ShapecastResult;
    fn check_interior_from_right(&self, ctx: &ProbeContext<'_>) -> ShapecastResult;
    fn check_interior_from_bottom(&self, ctx: &ProbeContext<'_>) -> ShapecastResult;
    fn check_interior_from_top(&self, ctx: &ProbeContext<'_>) -> ShapecastResult;

    /// Single ray down (or up) just outside the left edge
    fn check_left_edge(&self, ctx: &ProbeContext<'_>, start_at_top: bool) -> RaycastResult;
    fn check_right_edge(&self, ctx: &ProbeContext<'_>, start_at_top: bool) -> RaycastResult;
    /// Single ray left (or right) along the bottom edge
    fn check_bottom_edge(&self, ctx: &ProbeContext<'_>, start_at_right: bool) -> RaycastResult;
    fn check_top_edge(&self, ctx: &ProbeContext<'_>, start_at_right: bool) -> RaycastResult;

    /// Right for positive distances, left for negative ones
    fn check_horizontal(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult {
        if distance >= 0.0 {
            self.check_right(ctx, distance)
        } else {
            self.check_left(ctx, -distance)
        }
    }

    /// Up for positive distances, down for negative ones
    fn check_vertical(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult {
        if distance >= 0.0 {
            self.check_up(ctx, distance)
        } else {
            self.check_down(ctx, -distance)
        }
    }
}
