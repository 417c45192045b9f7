//! Ownership guard for mutation of owned entities.
//!
//! Videos, comments, tweets, and playlists carry an `owner_id` set at
//! creation and never reassigned. Every mutation or deactivation path runs
//! through [`authorize_owner`] before touching storage.

use crate::error::CoreError;
use crate::types::DbId;

/// Implemented by entities that have an owner.
pub trait Owned {
    /// Entity name used in error messages ("Video", "Comment", ...).
    const ENTITY: &'static str;

    fn id(&self) -> DbId;

    fn owner_id(&self) -> DbId;
}

/// Fail with [`CoreError::NotOwner`] unless `actor_id` owns `entity`.
///
/// Both sides are the canonical [`DbId`]; identifiers must be converted at
/// the boundary, never compared in string form.
pub fn authorize_owner<E: Owned>(actor_id: DbId, entity: &E) -> Result<(), CoreError> {
    if entity.owner_id() != actor_id {
        return Err(CoreError::NotOwner {
            entity: E::ENTITY,
            id: entity.id(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        id: DbId,
        owner_id: DbId,
    }

    impl Owned for Doc {
        const ENTITY: &'static str = "Doc";

        fn id(&self) -> DbId {
            self.id
        }

        fn owner_id(&self) -> DbId {
            self.owner_id
        }
    }

    #[test]
    fn test_owner_is_authorized() {
        let doc = Doc { id: 7, owner_id: 42 };
        assert!(authorize_owner(42, &doc).is_ok());
    }

    #[test]
    fn test_non_owner_is_rejected() {
        let doc = Doc { id: 7, owner_id: 42 };
        let err = authorize_owner(43, &doc).unwrap_err();
        match err {
            CoreError::NotOwner { entity, id } => {
                assert_eq!(entity, "Doc");
                assert_eq!(id, 7);
            }
            other => panic!("expected NotOwner, got {other:?}"),
        }
    }
}
