//! Collider shapes and descriptions

use crate::error::{PhysicsError, Result};
use crate::layers::CollisionGroups;
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a collider in the collision scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub(crate) rapier::ColliderHandle);

impl ColliderHandle {
    /// Create from raw Rapier handle
    pub fn from_raw(handle: rapier::ColliderHandle) -> Self {
        Self(handle)
    }

    /// Create from an arena index and generation
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self(rapier::ColliderHandle::from_raw_parts(index, generation))
    }

    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::ColliderHandle {
        self.0
    }
}

/// Side a ramp rises towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampDirection {
    /// Low end on the right, high end on the left
    RisesLeft,
    /// Low end on the left, high end on the right
    RisesRight,
}

/// Collision shape type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere with radius
    Sphere {
        radius: f32,
    },
    /// Box with half-extents
    Box {
        half_extents: [f32; 3],
    },
    /// Convex hull from points
    ConvexHull {
        points: Vec<[f32; 3]>,
    },
    /// Right-triangle prism, anchored at its low corner and extruded along Z
    Ramp {
        run: f32,
        rise: f32,
        depth: f32,
        direction: RampDirection,
    },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Box {
            half_extents: [0.5, 0.5, 0.5],
        }
    }
}

impl ColliderShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape from half-extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }

    /// Create a box shape from full size
    pub fn from_size(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            half_extents: [width * 0.5, height * 0.5, depth * 0.5],
        }
    }

    /// Create a ramp rising `rise` over `run`
    pub fn ramp(run: f32, rise: f32, depth: f32, direction: RampDirection) -> Self {
        Self::Ramp {
            run,
            rise,
            depth,
            direction,
        }
    }

    /// Corner points of a ramp prism, or `None` for other shapes
    pub fn ramp_points(&self) -> Option<Vec<[f32; 3]>> {
        let Self::Ramp {
            run,
            rise,
            depth,
            direction,
        } = *self
        else {
            return None;
        };

        let hz = depth * 0.5;
        let peak_x = match direction {
            RampDirection::RisesRight => run,
            RampDirection::RisesLeft => 0.0,
        };

        let mut points = Vec::with_capacity(6);
        for z in [-hz, hz] {
            points.push([0.0, 0.0, z]);
            points.push([run, 0.0, z]);
            points.push([peak_x, rise, z]);
        }
        Some(points)
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(&self) -> Result<rapier::SharedShape> {
        match self {
            Self::Sphere { radius } => {
                if *radius <= 0.0 {
                    return Err(PhysicsError::ShapeCreationFailed(format!(
                        "sphere radius must be positive, got {radius}"
                    )));
                }
                Ok(rapier::SharedShape::ball(*radius))
            }
            Self::Box { half_extents } => {
                if half_extents.iter().any(|e| *e <= 0.0) {
                    return Err(PhysicsError::ShapeCreationFailed(format!(
                        "box half-extents must be positive, got {half_extents:?}"
                    )));
                }
                Ok(rapier::SharedShape::cuboid(
                    half_extents[0],
                    half_extents[1],
                    half_extents[2],
                ))
            }
            Self::ConvexHull { points } => hull(points),
            Self::Ramp {
                run, rise, depth, ..
            } => {
                if *run <= 0.0 || *rise <= 0.0 || *depth <= 0.0 {
                    return Err(PhysicsError::ShapeCreationFailed(format!(
                        "ramp dimensions must be positive, got run {run}, rise {rise}, depth {depth}"
                    )));
                }
                let points = self.ramp_points().unwrap_or_default();
                hull(&points)
            }
        }
    }
}

fn hull(points: &[[f32; 3]]) -> Result<rapier::SharedShape> {
    let rapier_points: Vec<_> = points
        .iter()
        .map(|p| rapier::Point::new(p[0], p[1], p[2]))
        .collect();
    rapier::SharedShape::convex_hull(&rapier_points).ok_or_else(|| {
        PhysicsError::ShapeCreationFailed(format!(
            "degenerate convex hull from {} points",
            points.len()
        ))
    })
}

/// Description for creating a fixed collider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Collision shape
    pub shape: ColliderShape,
    /// World translation
    pub translation: [f32; 3],
    /// Rotation about the Z axis, in radians
    pub rotation_z: f32,
    /// Is this a sensor (ignored by solid-only queries)
    pub is_sensor: bool,
    /// Collision groups
    pub collision_groups: CollisionGroups,
    /// User data (entity ID, etc.)
    pub user_data: u128,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::default(),
            translation: [0.0, 0.0, 0.0],
            rotation_z: 0.0,
            is_sensor: false,
            collision_groups: CollisionGroups::ALL,
            user_data: 0,
        }
    }
}

impl ColliderDesc {
    /// Create a new collider description with a shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Create a sensor
    pub fn sensor(shape: ColliderShape) -> Self {
        Self {
            shape,
            is_sensor: true,
            ..Default::default()
        }
    }

    /// Set translation
    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = [x, y, z];
        self
    }

    /// Set rotation about Z, in degrees
    pub fn with_rotation_degrees(mut self, degrees: f32) -> Self {
        self.rotation_z = degrees.to_radians();
        self
    }

    /// Set as sensor
    pub fn with_sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Set collision groups
    pub fn with_collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set user data
    pub fn with_user_data(mut self, data: u128) -> Self {
        self.user_data = data;
        self
    }

    /// Build a Rapier collider builder
    pub(crate) fn to_rapier_builder(&self) -> Result<rapier::ColliderBuilder> {
        let builder = rapier::ColliderBuilder::new(self.shape.to_rapier()?)
            .translation(rapier::Vector::new(
                self.translation[0],
                self.translation[1],
                self.translation[2],
            ))
            .rotation(rapier::Vector::new(0.0, 0.0, self.rotation_z))
            .sensor(self.is_sensor)
            .collision_groups(self.collision_groups.to_rapier())
            .user_data(self.user_data);

        Ok(builder)
    }
}
