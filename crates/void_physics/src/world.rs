//! Collision world - static colliders plus the query pipeline

use crate::collider::{ColliderDesc, ColliderHandle};
use crate::error::{PhysicsError, Result};
use crate::query::{PhysicsQuery, RaycastHit, RaycastOptions, SceneQuery};
use rapier3d::na as nalgebra;
use rapier3d::prelude as rapier;

/// Static collision scene queried by pawn probes
pub struct PhysicsWorld {
    /// Island manager (needed for collider removal)
    islands: rapier::IslandManager,

    /// Query pipeline
    query_pipeline: rapier::QueryPipeline,

    /// Rigid body set (stays empty, colliders are parentless)
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,
}

impl PhysicsWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self {
            islands: rapier::IslandManager::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
        }
    }

    // ==================== Colliders ====================

    /// Add a fixed collider; the query pipeline is refreshed immediately
    pub fn add_collider(&mut self, desc: ColliderDesc) -> Result<ColliderHandle> {
        let builder = desc.to_rapier_builder()?;
        let handle = ColliderHandle(self.colliders.insert(builder));
        self.sync_query_pipeline();

        log::trace!("Added collider {:?} at {:?}", handle, desc.translation);
        Ok(handle)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<()> {
        self.colliders
            .remove(handle.0, &mut self.islands, &mut self.bodies, false)
            .ok_or(PhysicsError::ColliderNotFound(handle))?;
        self.sync_query_pipeline();
        Ok(())
    }

    /// Enable or disable a collider; disabled colliders are invisible to rays
    pub fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) -> Result<()> {
        let collider = self
            .colliders
            .get_mut(handle.0)
            .ok_or(PhysicsError::ColliderNotFound(handle))?;
        collider.set_enabled(enabled);
        self.sync_query_pipeline();
        Ok(())
    }

    /// Move a collider (moving platforms)
    pub fn set_collider_translation(&mut self, handle: ColliderHandle, x: f32, y: f32, z: f32) -> Result<()> {
        let collider = self
            .colliders
            .get_mut(handle.0)
            .ok_or(PhysicsError::ColliderNotFound(handle))?;
        collider.set_translation(rapier::vector![x, y, z]);
        self.sync_query_pipeline();
        Ok(())
    }

    /// Get the user data stored on a collider
    pub fn collider_user_data(&self, handle: ColliderHandle) -> Result<u128> {
        self.colliders
            .get(handle.0)
            .map(|c| c.user_data)
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Sync the query pipeline with the current colliders
    pub fn sync_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.colliders);
    }

    // ==================== Queries ====================

    /// Get a query interface for raycasting
    pub fn query(&self) -> PhysicsQuery<'_> {
        PhysicsQuery {
            query_pipeline: &self.query_pipeline,
            colliders: &self.colliders,
            bodies: &self.bodies,
        }
    }

    // ==================== Debug ====================

    /// Get number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl SceneQuery for PhysicsWorld {
    fn cast_ray(
        &self,
        origin: [f32; 3],
        direction: [f32; 3],
        options: &RaycastOptions,
    ) -> Option<RaycastHit> {
        self.query().cast_ray(origin, direction, options)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::{ColliderShape, RampDirection};
    use crate::layers::{CollisionGroups, CollisionLayer};
    use approx::assert_relative_eq;

    fn ground() -> ColliderDesc {
        ColliderDesc::new(ColliderShape::cuboid(10.0, 0.5, 1.0)).with_translation(0.0, -1.0, 0.0)
    }

    #[test]
    fn test_create_world() {
        let world = PhysicsWorld::new();
        assert_eq!(world.collider_count(), 0);
        assert!(world
            .cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &RaycastOptions::default())
            .is_none());
    }

    #[test]
    fn test_raycast_hits_ground() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_collider(ground().with_user_data(42)).unwrap();

        let hit = world
            .cast_ray([0.0, 0.0, 0.0], [0.0, -2.0, 0.0], &RaycastOptions::default())
            .unwrap();

        assert_eq!(hit.collider, handle);
        assert_eq!(hit.user_data, 42);
        assert_relative_eq!(hit.distance, 0.5, epsilon = 1e-5);
        assert_relative_eq!(hit.point[1], -0.5, epsilon = 1e-5);
        assert_relative_eq!(hit.normal[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let mut world = PhysicsWorld::new();
        world.add_collider(ground()).unwrap();

        let short = RaycastOptions::default().with_max_distance(0.25);
        assert!(world.cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &short).is_none());

        let zero = RaycastOptions::default().with_max_distance(0.0);
        assert!(world.cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &zero).is_none());
    }

    #[test]
    fn test_raycast_layer_mask() {
        let mut world = PhysicsWorld::new();
        world
            .add_collider(ground().with_collision_groups(CollisionGroups::from_layer(
                CollisionLayer::HAZARDS,
                &[CollisionLayer::PAWNS],
            )))
            .unwrap();

        let world_only = RaycastOptions::default()
            .with_filter(CollisionGroups::mask(CollisionLayer::WORLD.as_mask()));
        assert!(world.cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &world_only).is_none());

        let hazards = RaycastOptions::default()
            .with_filter(CollisionGroups::mask(CollisionLayer::HAZARDS.as_mask()));
        assert!(world.cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &hazards).is_some());
    }

    #[test]
    fn test_sensors_ignored_by_default() {
        let mut world = PhysicsWorld::new();
        world.add_collider(ground().with_sensor(true)).unwrap();

        let down = [0.0, -1.0, 0.0];
        assert!(world.cast_ray([0.0, 0.0, 0.0], down, &RaycastOptions::default()).is_none());

        let with_sensors = RaycastOptions::default().with_sensors(true);
        assert!(world.cast_ray([0.0, 0.0, 0.0], down, &with_sensors).is_some());
    }

    #[test]
    fn test_ray_from_inside_is_solid() {
        let mut world = PhysicsWorld::new();
        world.add_collider(ground()).unwrap();

        let hit = world
            .cast_ray([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], &RaycastOptions::default())
            .unwrap();

        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.normal, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ramp_normal() {
        let mut world = PhysicsWorld::new();
        world
            .add_collider(ColliderDesc::new(ColliderShape::ramp(
                2.0,
                1.0,
                2.0,
                RampDirection::RisesRight,
            )))
            .unwrap();

        let hit = world
            .cast_ray([1.0, 5.0, 0.0], [0.0, -1.0, 0.0], &RaycastOptions::default())
            .unwrap();

        let expected = 1.0 / 5.0f32.sqrt();
        assert_relative_eq!(hit.point[1], 0.5, epsilon = 1e-3);
        assert_relative_eq!(hit.normal[0], -expected, epsilon = 1e-3);
        assert_relative_eq!(hit.normal[1], 2.0 * expected, epsilon = 1e-3);
    }

    #[test]
    fn test_remove_collider() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_collider(ground()).unwrap();
        assert_eq!(world.collider_count(), 1);

        world.remove_collider(handle).unwrap();
        assert_eq!(world.collider_count(), 0);
        assert!(world
            .cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &RaycastOptions::default())
            .is_none());

        assert!(matches!(
            world.remove_collider(handle),
            Err(PhysicsError::ColliderNotFound(_))
        ));
        assert!(world.collider_user_data(handle).is_err());
    }

    #[test]
    fn test_moved_collider() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_collider(ground()).unwrap();
        world.set_collider_translation(handle, 0.0, -2.0, 0.0).unwrap();

        let hit = world
            .cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &RaycastOptions::default())
            .unwrap();
        assert_relative_eq!(hit.distance, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_disabled_collider_is_skipped() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_collider(ground()).unwrap();
        let down = [0.0, -1.0, 0.0];

        world.set_collider_enabled(handle, false).unwrap();
        assert!(world.cast_ray([0.0, 0.0, 0.0], down, &RaycastOptions::default()).is_none());

        world.set_collider_enabled(handle, true).unwrap();
        assert!(world.cast_ray([0.0, 0.0, 0.0], down, &RaycastOptions::default()).is_some());
    }
}
