//! Error types for pawn motion resolution

use crate::components::ComponentId;
use thiserror::Error;

/// Pawn errors
#[derive(Debug, Error)]
pub enum PawnError {
    /// Invalid configuration
    #[error("Invalid pawn configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be decoded
    #[error("Failed to decode pawn configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A state machine was asked to enter a state of another type
    #[error("The state machine '{machine}' does not accept states of type '{found}' (expects '{expected}')")]
    StateTypeMismatch {
        machine: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Component handle does not resolve
    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    /// The pawn root cannot be removed from its own tree
    #[error("Cannot remove the pawn root {0}")]
    CannotRemoveRoot(ComponentId),

    /// Component exists but is not of the requested kind
    #[error("Component {id} is not a {expected}")]
    RoleMismatch {
        id: ComponentId,
        expected: &'static str,
    },
}

/// Result type for pawn operations
pub type Result<T> = std::result::Result<T, PawnError>;
