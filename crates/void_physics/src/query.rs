//! Ray queries against the collision scene

use crate::collider::ColliderHandle;
use crate::layers::CollisionGroups;
use rapier3d::prelude as rapier;

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Hit point in world space
    pub point: [f32; 3],
    /// Surface normal at hit point (zero when the ray starts inside the collider)
    pub normal: [f32; 3],
    /// Distance from ray origin
    pub distance: f32,
    /// User data from the collider
    pub user_data: u128,
}

/// Options for raycast queries
#[derive(Debug, Clone)]
pub struct RaycastOptions {
    /// Maximum distance for the ray
    pub max_distance: f32,
    /// Only hit solid colliders (not sensors)
    pub solid_only: bool,
    /// Collision groups filter
    pub filter: CollisionGroups,
}

impl Default for RaycastOptions {
    fn default() -> Self {
        Self {
            max_distance: f32::MAX,
            solid_only: true,
            filter: CollisionGroups::ALL,
        }
    }
}

impl RaycastOptions {
    /// Set maximum distance
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set whether to hit sensors
    pub fn with_sensors(mut self, include_sensors: bool) -> Self {
        self.solid_only = !include_sensors;
        self
    }

    /// Set collision filter
    pub fn with_filter(mut self, filter: CollisionGroups) -> Self {
        self.filter = filter;
        self
    }

    fn to_rapier_filter(&self) -> rapier::QueryFilter<'static> {
        let mut filter = rapier::QueryFilter::new().groups(self.filter.to_rapier());

        if self.solid_only {
            filter = filter.exclude_sensors();
        }

        filter
    }
}

/// The ray primitive pawn probes are built on.
///
/// Implementations are re-fired on every call; no cast state is kept between
/// calls. `direction` does not need to be normalized.
pub trait SceneQuery {
    /// Cast a ray segment and return the closest hit, if any
    fn cast_ray(
        &self,
        origin: [f32; 3],
        direction: [f32; 3],
        options: &RaycastOptions,
    ) -> Option<RaycastHit>;
}

/// Query interface for the collision scene
pub struct PhysicsQuery<'a> {
    pub(crate) query_pipeline: &'a rapier::QueryPipeline,
    pub(crate) colliders: &'a rapier::ColliderSet,
    pub(crate) bodies: &'a rapier::RigidBodySet,
}

impl SceneQuery for PhysicsQuery<'_> {
    fn cast_ray(
        &self,
        origin: [f32; 3],
        direction: [f32; 3],
        options: &RaycastOptions,
    ) -> Option<RaycastHit> {
        let dir = rapier::Vector::new(direction[0], direction[1], direction[2]);
        let length = dir.norm();
        if length <= f32::EPSILON || options.max_distance <= 0.0 {
            return None;
        }

        let ray = rapier::Ray::new(
            rapier::Point::new(origin[0], origin[1], origin[2]),
            dir / length,
        );

        // Solid rays: an origin inside a collider reports a zero-distance hit
        // with a zero normal.
        let (handle, intersection) = self.query_pipeline.cast_ray_and_get_normal(
            self.bodies,
            self.colliders,
            &ray,
            options.max_distance,
            true,
            options.to_rapier_filter(),
        )?;

        let point = ray.point_at(intersection.time_of_impact);
        let user_data = self
            .colliders
            .get(handle)
            .map_or(0, |collider| collider.user_data);

        Some(RaycastHit {
            collider: ColliderHandle(handle),
            point: [point.x, point.y, point.z],
            normal: [
                intersection.normal.x,
                intersection.normal.y,
                intersection.normal.z,
            ],
            distance: intersection.time_of_impact,
            user_data,
        })
    }
}
