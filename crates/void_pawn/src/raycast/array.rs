//! Straight arrays of parallel rays

use super::{ProbeContext, RaycastResult};
use glam::Vec2;

/// `ray_count` parallel rays spread evenly from `start` to `end`.
///
/// Offsets are relative to the probe origin, in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastArray {
    pub start: Vec2,
    pub end: Vec2,
    pub ray_count: u32,
}

impl RaycastArray {
    pub fn new(start: Vec2, end: Vec2, ray_count: u32) -> Self {
        Self {
            start,
            end,
            ray_count,
        }
    }

    /// Ray origins in cast order. Fewer than two rays collapse to the midpoint.
    pub fn origins(&self) -> Vec<Vec2> {
        if self.ray_count < 2 {
            return vec![self.start.lerp(self.end, 0.5)];
        }

        let last = (self.ray_count - 1) as f32;
        (0..self.ray_count)
            .map(|i| self.start + (self.end - self.start) * (i as f32 / last))
            .collect()
    }

    /// Cast every ray and keep the closest hit (first one wins ties).
    /// When nothing is hit the first ray's miss is returned.
    pub fn cast(
        &self,
        ctx: &ProbeContext<'_>,
        direction: Vec2,
        distance: f32,
        layer_mask: u32,
    ) -> RaycastResult {
        let ray = (direction * distance).extend(0.0);
        let mut closest: Option<RaycastResult> = None;

        for offset in self.origins() {
            let result = RaycastResult::cast(ctx.scene, ctx.at(offset), ray, layer_mask);
            closest = match closest {
                Some(best)
                    if !result.has_hit()
                        || (best.has_hit() && best.hit_distance() <= result.hit_distance()) =>
                {
                    Some(best)
                }
                _ => Some(result),
            };
        }

        let origin = ctx.at(self.start);
        closest.unwrap_or_else(|| RaycastResult::miss(origin, origin + ray))
    }
}
