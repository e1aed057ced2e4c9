use crate::entity::{EntityId, ResourceKind};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating the world state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist in the collection for its kind.
    #[error("{kind} not found: {id}")]
    EntityNotFound {
        /// The kind of collection that was searched.
        kind: ResourceKind,
        /// The missing id.
        id: EntityId,
    },

    /// World bounds must be finite and strictly positive.
    #[error("invalid world bounds: {width}x{height}")]
    InvalidBounds {
        /// The rejected width.
        width: f64,
        /// The rejected height.
        height: f64,
    },
}
