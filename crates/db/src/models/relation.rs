//! Relation row model.

use cliptube_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `relations` table: one active (actor, kind, target)
/// association. Created on toggle-on, destroyed (not archived) on toggle-off.
///
/// `kind` is the stored string form; parse with
/// [`cliptube_core::types::RelationKind`] when the enum is needed.
#[derive(Debug, Clone, FromRow)]
pub struct Relation {
    pub id: DbId,
    pub actor_id: DbId,
    pub kind: String,
    pub target_id: DbId,
    pub created_at: Timestamp,
}
