//! Read-only repository for the `relations` table.
//!
//! Deliberately exposes no insert or remove: relations are created and
//! destroyed exclusively by [`crate::toggle::ToggleEngine`] so that the
//! denormalized counters can never drift from an out-of-band write.

use cliptube_core::types::{DbId, RelationKind};
use sqlx::PgPool;

pub struct RelationRepo;

impl RelationRepo {
    /// Whether an active relation exists for the tuple.
    pub async fn exists(
        pool: &PgPool,
        actor_id: DbId,
        kind: RelationKind,
        target_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM relations
                WHERE actor_id = $1 AND kind = $2 AND target_id = $3
             )",
        )
        .bind(actor_id)
        .bind(kind.as_str())
        .bind(target_id)
        .fetch_one(pool)
        .await
    }

    /// Live relation count for a target.
    ///
    /// This scans the relation store and exists for reconciliation and tests;
    /// request paths read the denormalized counter instead.
    pub async fn count_for_target(
        pool: &PgPool,
        kind: RelationKind,
        target_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM relations WHERE kind = $1 AND target_id = $2")
            .bind(kind.as_str())
            .bind(target_id)
            .fetch_one(pool)
            .await
    }

    /// Target ids the actor has an active relation to, newest first.
    pub async fn list_target_ids_for_actor(
        pool: &PgPool,
        actor_id: DbId,
        kind: RelationKind,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT target_id FROM relations
             WHERE actor_id = $1 AND kind = $2
             ORDER BY created_at DESC",
        )
        .bind(actor_id)
        .bind(kind.as_str())
        .fetch_all(pool)
        .await
    }

    /// Actor ids with an active relation to the target, newest first.
    pub async fn list_actor_ids_for_target(
        pool: &PgPool,
        kind: RelationKind,
        target_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT actor_id FROM relations
             WHERE kind = $1 AND target_id = $2
             ORDER BY created_at DESC",
        )
        .bind(kind.as_str())
        .bind(target_id)
        .fetch_all(pool)
        .await
    }
}
