use crate::types::DbId;

/// Domain error taxonomy shared across crates.
///
/// Client errors (`NotFound`, `InvalidTarget`, `Validation`, `Unauthorized`,
/// `NotOwner`, `SelfReference`, `Conflict`) are detected before any storage
/// mutation and returned immediately. `CounterDesync` is the one internal
/// invariant violation that must reach operators rather than being swallowed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The target of a mutation does not exist or has been deactivated.
    #[error("Invalid target: {entity} with id {id} does not exist or is inactive")]
    InvalidTarget { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Actor is not the owner of the entity it tried to mutate.
    #[error("Not permitted to modify {entity} with id {id}")]
    NotOwner { entity: &'static str, id: DbId },

    /// A channel cannot subscribe to itself.
    #[error("A channel cannot subscribe to itself")]
    SelfReference,

    /// A denormalized counter and the relation store disagree.
    #[error("Counter out of sync for {entity} with id {id}")]
    CounterDesync { entity: &'static str, id: DbId },

    #[error("Internal error: {0}")]
    Internal(String),
}
