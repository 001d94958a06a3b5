//! Slope-aware resolution of requested displacements

use crate::adjacency::Surroundings;
use crate::raycast::{ProbeContext, Raycaster};
use crate::surface::{ClassifiedSurface, SurfaceType};
use glam::{Vec2, Vec3};
use void_physics::SceneQuery;

/// Moves a pawn position through the scene, one axis at a time.
///
/// Surroundings are a snapshot taken before the move; they are not refreshed
/// while a move is resolved. Without a probe every move is unobstructed.
pub struct MoveResolver<'a> {
    scene: &'a dyn SceneQuery,
    probe: Option<&'a dyn Raycaster>,
    surroundings: Surroundings,
    position: Vec3,
}

impl<'a> MoveResolver<'a> {
    pub fn new(
        scene: &'a dyn SceneQuery,
        probe: Option<&'a dyn Raycaster>,
        surroundings: Surroundings,
        position: Vec3,
    ) -> Self {
        Self {
            scene,
            probe,
            surroundings,
            position,
        }
    }

    /// Where the pawn ended up
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Resolve a requested displacement, horizontal part first.
    ///
    /// Horizontally, a sloped ground ahead is climbed (if `climb_slopes`);
    /// otherwise sloped or steep ground below, or a sloped ceiling ahead, is
    /// descended (if `descend_slopes`). Vertically, a downward sloped wall
    /// below is slid down and an upward sloped wall above is slid up.
    /// Everything else is a plain collision-checked move.
    pub fn resolve_move(&mut self, requested: Vec2, climb_slopes: bool, descend_slopes: bool) {
        let below = self.surroundings.below_adjacent();
        let above = self.surroundings.above_adjacent();

        if requested.x != 0.0 {
            let distance = requested.x;
            let front = self.surroundings.ahead(distance).adjacent();

            if climb_slopes && front.surface_type() == SurfaceType::SlopedGround {
                self.climb_slope(distance, &front);
            } else if descend_slopes
                && matches!(
                    below.surface_type(),
                    SurfaceType::SlopedGround | SurfaceType::SteepGround
                )
            {
                self.descend_slope(distance, &below);
            } else if descend_slopes && front.surface_type() == SurfaceType::SlopedCeiling {
                self.descend_sloped_ceiling(distance, &below);
            } else {
                self.try_move_x(distance);
            }
        }

        if requested.y != 0.0 {
            let distance = requested.y;

            if below.surface_type() == SurfaceType::SlopedWallDownward && distance < 0.0 {
                self.descend_slope(distance, &below);
            } else if above.surface_type() == SurfaceType::SlopedWallUpward && distance > 0.0 {
                self.climb_sloped_ceiling(distance, &above);
            } else {
                self.try_move_y(distance);
            }
        }
    }

    /// Follow the slope upwards, then snap back down onto it
    fn climb_slope(&mut self, distance: f32, surface: &ClassifiedSurface) {
        let redirected = surface.parallel_up() * distance.abs();
        self.try_move_y(redirected.y);
        self.try_move_x(redirected.x);

        if let Some(probe) = self.probe {
            let ctx = ProbeContext::new(self.scene, self.position);
            let snap = probe.check_down(&ctx, redirected.y);
            if snap.has_hit() {
                self.try_move_y(-snap.hit_distance());
            }
        }
    }

    fn descend_slope(&mut self, distance: f32, surface: &ClassifiedSurface) {
        let redirected = surface.parallel_down() * distance.abs();
        self.try_move_x(redirected.x);
        self.try_move_y(redirected.y);
    }

    /// Signed: a negative distance slides the other way
    fn climb_sloped_ceiling(&mut self, distance: f32, surface: &ClassifiedSurface) {
        let redirected = surface.parallel_up() * distance;
        self.try_move_x(redirected.x);
        self.try_move_y(redirected.y);
    }

    fn descend_sloped_ceiling(&mut self, distance: f32, surface: &ClassifiedSurface) {
        let redirected = surface.parallel_down() * distance;
        self.try_move_y(redirected.y);
        self.try_move_x(redirected.x);
    }

    /// Move horizontally, stopping short of anything in the way
    pub fn try_move_x(&mut self, distance: f32) {
        if distance == 0.0 {
            return;
        }

        let translation = match self.probe {
            Some(probe) => {
                let ctx = ProbeContext::new(self.scene, self.position);
                probe.check_horizontal(&ctx, distance).hit_vector()
            }
            None => Vec3::X * distance,
        };
        self.translate(translation);
    }

    /// Move vertically, stopping short of anything in the way
    pub fn try_move_y(&mut self, distance: f32) {
        if distance == 0.0 {
            return;
        }

        let translation = match self.probe {
            Some(probe) => {
                let ctx = ProbeContext::new(self.scene, self.position);
                probe.check_vertical(&ctx, distance).hit_vector()
            }
            None => Vec3::Y * distance,
        };
        self.translate(translation);
    }

    fn translate(&mut self, translation: Vec3) {
        self.position += translation;
        log::trace!("Moved by {} to {}", translation, self.position);
    }
}
