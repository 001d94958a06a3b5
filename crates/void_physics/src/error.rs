//! Error types for the collision scene

use crate::collider::ColliderHandle;
use thiserror::Error;

/// Collision scene errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Collider not found
    #[error("Collider not found: {0:?}")]
    ColliderNotFound(ColliderHandle),

    /// Shape creation failed
    #[error("Failed to create collision shape: {0}")]
    ShapeCreationFailed(String),
}

/// Result type for collision scene operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
