//! Void Physics - static collision scene on Rapier 3D
//!
//! Kinematic pawns never take part in a simulation step. They only ask the
//! scene "what does this ray segment hit", so this crate keeps a static set
//! of colliders and a query pipeline, nothing more.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │             PhysicsWorld             │
//! │  ┌─────────────┐  ┌───────────────┐  │
//! │  │ ColliderSet │  │ QueryPipeline │  │
//! │  └─────────────┘  └───────────────┘  │
//! └──────────────────┬───────────────────┘
//!                    │ query()
//!                    ▼
//!            ┌──────────────┐
//!            │ PhysicsQuery │──► impl SceneQuery
//!            └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use void_physics::prelude::*;
//!
//! let mut world = PhysicsWorld::new();
//! world.add_collider(ColliderDesc::new(ColliderShape::cuboid(50.0, 0.5, 1.0)).with_translation(0.0, -1.0, 0.0))?;
//!
//! let hit = world.cast_ray([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], &RaycastOptions::default());
//! assert!(hit.is_some());
//! ```

pub mod collider;
pub mod error;
pub mod layers;
pub mod query;
pub mod world;

pub mod prelude {
    //! Common imports for collision queries
    pub use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape, RampDirection};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::layers::{CollisionGroups, CollisionLayer};
    pub use crate::query::{PhysicsQuery, RaycastHit, RaycastOptions, SceneQuery};
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
