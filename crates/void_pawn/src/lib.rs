//! Void Pawn - 2D platformer motion resolution
//!
//! A pawn is a kinematic character that moves in the XY plane of a 3D
//! collision scene. It senses the scene with a rectangular raycast probe,
//! classifies the nearest surface in each direction and resolves requested
//! movement along slopes instead of stopping dead against them.
//!
//! # Architecture
//!
//! ```text
//!  ┌─────────────────────────── Pawn ───────────────────────────┐
//!  │                                                            │
//!  │  ComponentTree ──discover──► ComponentPipeline             │
//!  │   (arena of                   conditions, probes,          │
//!  │    roles)                     triggers, state machines,    │
//!  │                               properties, actions,         │
//!  │                               modifiers                    │
//!  │                                                            │
//!  │  Raycaster ──shape casts──► Surroundings ──► MoveResolver  │
//!  │   (RaycastBox)              (classified,     (climb,       │
//!  │                              adjacent)        descend)     │
//!  └──────────────────────────────┬─────────────────────────────┘
//!                                 │ cast_ray
//!                                 ▼
//!                     void_physics::SceneQuery
//! ```
//!
//! # Example
//!
//! ```ignore
//! use void_pawn::prelude::*;
//! use void_physics::{ColliderDesc, ColliderShape, PhysicsWorld};
//!
//! let mut world = PhysicsWorld::new();
//! world.add_collider(ColliderDesc::new(ColliderShape::cuboid(20.0, 0.5, 1.0)).with_translation(0.0, -1.0, 0.0))?;
//!
//! let mut tree = ComponentTree::new("Hero");
//! let root = tree.root();
//! tree.add_component(root, "Box", Role::probe(RaycastBox::default()))?;
//! let walk = tree.add_component(root, "Walk", Role::action(WalkAction::new()))?;
//! tree.add_component(walk, "Normal", Role::properties(PropertySet::new(WalkProperties::default())))?;
//!
//! let mut pawn = Pawn::new(tree, PawnConfig::default())?;
//! pawn.component_mut::<WalkAction>(walk)?.walk(1.0);
//! pawn.physics_process(1.0 / 60.0, &world);
//! ```

pub mod adjacency;
pub mod components;
pub mod config;
pub mod error;
pub mod facing;
pub mod pawn;
pub mod raycast;
pub mod surface;

pub mod prelude {
    //! Common imports for building and driving pawns
    pub use crate::adjacency::{NearestSurface, Surroundings};
    pub use crate::components::{
        Action, ActionProperties, AndCondition, AxisAction, BoolStateMachine, ComponentId,
        ComponentTree, Condition, ConditionReference, DirectionalAction, DiscoveryOptions,
        EventTrigger, HookContext, HookModifier, IntStateMachine, Modifier, NotCondition,
        OrCondition, PlanarAction, PredicateCondition, PropertySet, Role, Scope, StateMachine,
        StringStateMachine, ToggleCondition, Trigger, TypedStateMachine, WalkAction,
        WalkProperties, XorCondition,
    };
    pub use crate::config::{AngleThresholds, PawnConfig};
    pub use crate::error::{PawnError, Result};
    pub use crate::facing::{FaceDirection, FaceDirectionX, FaceDirectionY, Facing};
    pub use crate::pawn::{Pawn, PawnState, Phase};
    pub use crate::raycast::{RaycastBox, Raycaster, ShapecastResult};
    pub use crate::surface::{ClassifiedSurface, SurfaceType};
}

pub use prelude::*;
