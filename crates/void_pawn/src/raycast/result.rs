//! Raw ray outcomes and skin-corrected shape-cast outcomes

use glam::Vec3;
use void_physics::{ColliderHandle, CollisionGroups, RaycastOptions, SceneQuery};

/// Geometric outcome of one ray segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastResult {
    origin: Vec3,
    target: Vec3,
    collider: Option<ColliderHandle>,
    hit_position: Vec3,
    hit_normal: Vec3,
}

impl RaycastResult {
    /// A ray that hit nothing; the hit position is the target
    pub fn miss(origin: Vec3, target: Vec3) -> Self {
        Self {
            origin,
            target,
            collider: None,
            hit_position: target,
            hit_normal: Vec3::ZERO,
        }
    }

    /// A ray that hit `collider`
    pub fn hit(
        origin: Vec3,
        target: Vec3,
        collider: ColliderHandle,
        hit_position: Vec3,
        hit_normal: Vec3,
    ) -> Self {
        Self {
            origin,
            target,
            collider: Some(collider),
            hit_position,
            hit_normal,
        }
    }

    /// Fire one ray from `origin` along `ray` (direction times length)
    pub fn cast(scene: &dyn SceneQuery, origin: Vec3, ray: Vec3, layer_mask: u32) -> Self {
        let target = origin + ray;
        let distance = ray.length();
        if distance <= 0.0 {
            return Self::miss(origin, target);
        }

        let options = RaycastOptions::default()
            .with_max_distance(distance)
            .with_filter(CollisionGroups::mask(layer_mask));

        match scene.cast_ray(origin.to_array(), (ray / distance).to_array(), &options) {
            Some(hit) => Self::hit(
                origin,
                target,
                hit.collider,
                Vec3::from(hit.point),
                Vec3::from(hit.normal),
            ),
            None => Self::miss(origin, target),
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn collider(&self) -> Option<ColliderHandle> {
        self.collider
    }

    pub fn has_hit(&self) -> bool {
        self.collider.is_some()
    }

    pub fn hit_position(&self) -> Vec3 {
        self.hit_position
    }

    /// Surface normal at the hit (zero on a miss or when starting inside)
    pub fn hit_normal(&self) -> Vec3 {
        self.hit_normal
    }

    pub fn ray_vector(&self) -> Vec3 {
        self.target - self.origin
    }

    pub fn ray_direction(&self) -> Vec3 {
        self.ray_vector().normalize_or_zero()
    }

    pub fn ray_distance(&self) -> f32 {
        self.ray_vector().length()
    }

    pub fn hit_vector(&self) -> Vec3 {
        self.hit_position - self.origin
    }

    pub fn hit_distance(&self) -> f32 {
        self.hit_vector().length()
    }

    pub fn hit_distance_x(&self) -> f32 {
        self.hit_vector().x.abs()
    }

    pub fn hit_distance_y(&self) -> f32 {
        self.hit_vector().y.abs()
    }
}

/// A [`RaycastResult`] seen through a skin-width offset.
///
/// With a positive skin the ray started inside the probe rectangle, so the
/// skin is removed from every distance; interior casts use a negative skin.
/// Corrected distances are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapecastResult {
    raw: RaycastResult,
    skin_width: f32,
}

impl ShapecastResult {
    pub fn new(raw: RaycastResult, skin_width: f32) -> Self {
        Self { raw, skin_width }
    }

    pub fn raw(&self) -> &RaycastResult {
        &self.raw
    }

    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    pub fn has_hit(&self) -> bool {
        self.raw.has_hit()
    }

    pub fn collider(&self) -> Option<ColliderHandle> {
        self.raw.collider()
    }

    pub fn hit_position(&self) -> Vec3 {
        self.raw.hit_position()
    }

    pub fn hit_normal(&self) -> Vec3 {
        self.raw.hit_normal()
    }

    pub fn ray_direction(&self) -> Vec3 {
        self.raw.ray_direction()
    }

    /// Origin moved by the skin along the ray, back onto the rectangle edge
    pub fn ray_origin(&self) -> Vec3 {
        self.raw.origin() + self.raw.ray_direction() * self.skin_width
    }

    pub fn ray_distance(&self) -> f32 {
        (self.raw.ray_distance() - self.skin_width).max(0.0)
    }

    pub fn hit_distance(&self) -> f32 {
        (self.raw.hit_distance() - self.skin_width).max(0.0)
    }

    /// Usable travel along the ray: the full distance on a miss, otherwise up
    /// to the corrected hit
    pub fn hit_vector(&self) -> Vec3 {
        self.raw.ray_direction() * self.hit_distance()
    }
}
