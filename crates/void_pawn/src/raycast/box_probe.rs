//! Axis-aligned box probe

use super::{ProbeContext, RaycastArray, RaycastResult, Raycaster, ShapecastResult};
use glam::{UVec2, Vec2};

/// Box-shaped probe centred on the pawn (plus `offset`).
///
/// `ray_count.x` rays sample the left and right edges, `ray_count.y` rays
/// sample the bottom and top edges.
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastBox {
    size: Vec2,
    skin_width: f32,
    ray_count: UVec2,
    layer_mask: u32,
    offset: Vec2,
}

impl Default for RaycastBox {
    fn default() -> Self {
        Self {
            size: Vec2::ONE,
            skin_width: 0.01,
            ray_count: UVec2::splat(3),
            layer_mask: 1,
            offset: Vec2::ZERO,
        }
    }
}

impl RaycastBox {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_skin_width(mut self, skin_width: f32) -> Self {
        self.skin_width = skin_width;
        self
    }

    /// Rays per side: `x` for left/right, `y` for bottom/top
    pub fn with_ray_count(mut self, horizontal: u32, vertical: u32) -> Self {
        self.ray_count = UVec2::new(horizontal, vertical);
        self
    }

    pub fn with_layer_mask(mut self, layer_mask: u32) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    /// Offset of the box centre from the pawn position
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn ray_count(&self) -> UVec2 {
        self.ray_count
    }

    pub fn layer_mask(&self) -> u32 {
        self.layer_mask
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    // ==================== Corners ====================

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(-self.size.x / 2.0, self.size.y / 2.0)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.size.x / 2.0, self.size.y / 2.0)
    }

    pub fn bottom_left(&self) -> Vec2 {
        -self.top_right()
    }

    pub fn bottom_right(&self) -> Vec2 {
        -self.top_left()
    }

    // ==================== Edge arrays ====================

    fn left_array(&self) -> RaycastArray {
        let s = self.skin_width;
        RaycastArray::new(
            self.offset + self.top_left() + Vec2::new(s, -s),
            self.offset + self.bottom_left() + Vec2::new(s, s),
            self.ray_count.x,
        )
    }

    fn right_array(&self) -> RaycastArray {
        let s = self.skin_width;
        RaycastArray::new(
            self.offset + self.top_right() + Vec2::new(-s, -s),
            self.offset + self.bottom_right() + Vec2::new(-s, s),
            self.ray_count.x,
        )
    }

    fn bottom_array(&self) -> RaycastArray {
        let s = self.skin_width;
        RaycastArray::new(
            self.offset + self.bottom_left() + Vec2::new(s, s),
            self.offset + self.bottom_right() + Vec2::new(-s, s),
            self.ray_count.y,
        )
    }

    fn top_array(&self) -> RaycastArray {
        let s = self.skin_width;
        RaycastArray::new(
            self.offset + self.top_left() + Vec2::new(s, -s),
            self.offset + self.top_right() + Vec2::new(-s, -s),
            self.ray_count.y,
        )
    }

    fn shapecast(
        &self,
        ctx: &ProbeContext<'_>,
        array: RaycastArray,
        direction: Vec2,
        distance: f32,
        skin_width: f32,
    ) -> ShapecastResult {
        let raw = array.cast(ctx, direction, distance, self.layer_mask);
        ShapecastResult::new(raw, skin_width)
    }

    fn edge_ray(&self, ctx: &ProbeContext<'_>, start: Vec2, ray: Vec2) -> RaycastResult {
        let origin = ctx.at(self.offset + start);
        RaycastResult::cast(ctx.scene, origin, ray.extend(0.0), self.layer_mask)
    }
}

impl Raycaster for RaycastBox {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn skin_width(&self) -> f32 {
        self.skin_width
    }

    fn check_left(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult {
        if distance < 0.0 {
            return self.check_right(ctx, -distance);
        }
        let s = self.skin_width;
        self.shapecast(ctx, self.left_array(), Vec2::NEG_X, distance + s, s)
    }

    fn check_right(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult {
        if distance < 0.0 {
            return self.check_left(ctx, -distance);
        }
        let s = self.skin_width;
        self.shapecast(ctx, self.right_array(), Vec2::X, distance + s, s)
    }

    fn check_down(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult {
        if distance < 0.0 {
            return self.check_up(ctx, -distance);
        }
        let s = self.skin_width;
        self.shapecast(ctx, self.bottom_array(), Vec2::NEG_Y, distance + s, s)
    }

    fn check_up(&self, ctx: &ProbeContext<'_>, distance: f32) -> ShapecastResult {
        if distance < 0.0 {
            return self.check_down(ctx, -distance);
        }
        let s = self.skin_width;
        self.shapecast(ctx, self.top_array(), Vec2::Y, distance + s, s)
    }

    fn check_interior_from_left(&self, ctx: &ProbeContext<'_>) -> ShapecastResult {
        let s = self.skin_width;
        self.shapecast(ctx, self.left_array(), Vec2::X, self.size.x - s, -s)
    }

    fn check_interior_from_right(&self, ctx: &ProbeContext<'_>) -> ShapecastResult {
        let s = self.skin_width;
        self.shapecast(ctx, self.right_array(), Vec2::NEG_X, self.size.x - s, -s)
    }

    fn check_interior_from_bottom(&self, ctx: &ProbeContext<'_>) -> ShapecastResult {
        let s = self.skin_width;
        self.shapecast(ctx, self.bottom_array(), Vec2::Y, self.size.y - s, -s)
    }

    fn check_interior_from_top(&self, ctx: &ProbeContext<'_>) -> ShapecastResult {
        let s = self.skin_width;
        self.shapecast(ctx, self.top_array(), Vec2::NEG_Y, self.size.y - s, -s)
    }

    fn check_left_edge(&self, ctx: &ProbeContext<'_>, start_at_top: bool) -> RaycastResult {
        let outside = Vec2::NEG_X * self.skin_width;
        if start_at_top {
            self.edge_ray(ctx, self.top_left() + outside, Vec2::NEG_Y * self.size.y)
        } else {
            self.edge_ray(ctx, self.bottom_left() + outside, Vec2::Y * self.size.y)
        }
    }

    fn check_right_edge(&self, ctx: &ProbeContext<'_>, start_at_top: bool) -> RaycastResult {
        let outside = Vec2::X * self.skin_width;
        if start_at_top {
            self.edge_ray(ctx, self.top_right() + outside, Vec2::NEG_Y * self.size.y)
        } else {
            self.edge_ray(ctx, self.bottom_right() + outside, Vec2::Y * self.size.y)
        }
    }

    fn check_bottom_edge(&self, ctx: &ProbeContext<'_>, start_at_right: bool) -> RaycastResult {
        if start_at_right {
            self.edge_ray(ctx, self.bottom_right(), Vec2::NEG_X * self.size.x)
        } else {
            self.edge_ray(ctx, self.bottom_left(), Vec2::X * self.size.x)
        }
    }

    fn check_top_edge(&self, ctx: &ProbeContext<'_>, start_at_right: bool) -> RaycastResult {
        if start_at_right {
            self.edge_ray(ctx, self.top_right(), Vec2::NEG_X * self.size.x)
        } else {
            self.edge_ray(ctx, self.top_left(), Vec2::X * self.size.x)
        }
    }
}
