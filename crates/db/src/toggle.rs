//! Relation toggle engine.
//!
//! Flips the existence of an (actor, kind, target) relation and keeps the
//! target's denormalized counter in step. The relation write and the counter
//! adjustment always happen in one transaction, so an abandoned or failed
//! call can never leave the pair half-applied.
//!
//! This module is the single writer of the `relations` table and of the
//! counter columns (`videos.like_count`, `comments.like_count`,
//! `tweets.like_count`, `users.subscriber_count`). The application-level
//! existence check only chooses which branch to attempt first; the unique
//! constraint `uq_relations_actor_kind_target` is the authority. A duplicate
//! insert resolves to "already active" and a no-op remove to "already
//! removed", in both cases without touching the counter.

use cliptube_core::types::{DbId, RelationKind};
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

/// Result of a toggle call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleOutcome {
    pub now_active: bool,
}

/// Errors produced by [`ToggleEngine`].
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    /// The target does not exist, is deactivated, or (for video likes) is
    /// unpublished.
    #[error("invalid target: {entity} with id {id}")]
    InvalidTarget { entity: &'static str, id: DbId },

    /// A channel cannot subscribe to itself.
    #[error("a channel cannot subscribe to itself")]
    SelfReference,

    /// The counter and the relation store disagree in a way the engine cannot
    /// repair in-line. Surfaced to operators; repaired by the reconciliation
    /// job.
    #[error("counter out of sync for {entity} with id {id}")]
    CounterDesync { entity: &'static str, id: DbId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Table and counter column a kind's ledger entry lives on.
fn counter_location(kind: RelationKind) -> (&'static str, &'static str) {
    match kind {
        RelationKind::VideoLike => ("videos", "like_count"),
        RelationKind::CommentLike => ("comments", "like_count"),
        RelationKind::TweetLike => ("tweets", "like_count"),
        RelationKind::Subscription => ("users", "subscriber_count"),
    }
}

pub struct ToggleEngine;

impl ToggleEngine {
    /// Flip the (actor, kind, target) relation and adjust the target's
    /// counter, atomically.
    ///
    /// Self-likes are allowed; self-subscription is rejected with
    /// [`ToggleError::SelfReference`].
    pub async fn toggle(
        pool: &PgPool,
        actor_id: DbId,
        kind: RelationKind,
        target_id: DbId,
    ) -> Result<ToggleOutcome, ToggleError> {
        if kind == RelationKind::Subscription && actor_id == target_id {
            return Err(ToggleError::SelfReference);
        }

        let mut tx = pool.begin().await?;

        if !target_is_active(&mut tx, kind, target_id).await? {
            return Err(ToggleError::InvalidTarget {
                entity: kind.target_entity(),
                id: target_id,
            });
        }

        // Read-only hint choosing the branch to attempt; never trusted for
        // correctness.
        let present: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM relations
                WHERE actor_id = $1 AND kind = $2 AND target_id = $3
             )",
        )
        .bind(actor_id)
        .bind(kind.as_str())
        .bind(target_id)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = if present {
            let removed = sqlx::query(
                "DELETE FROM relations WHERE actor_id = $1 AND kind = $2 AND target_id = $3",
            )
            .bind(actor_id)
            .bind(kind.as_str())
            .bind(target_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
                > 0;

            // Zero rows: a concurrent toggle removed it first; no adjustment.
            if removed {
                adjust_counter(&mut tx, kind, target_id, -1).await?;
            }
            ToggleOutcome { now_active: false }
        } else {
            let inserted = sqlx::query(
                "INSERT INTO relations (actor_id, kind, target_id)
                 VALUES ($1, $2, $3)
                 ON CONFLICT ON CONSTRAINT uq_relations_actor_kind_target DO NOTHING",
            )
            .bind(actor_id)
            .bind(kind.as_str())
            .bind(target_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
                > 0;

            // Zero rows: the relation already exists (lost race); resolving
            // to active without an adjustment avoids the double credit.
            if inserted {
                adjust_counter(&mut tx, kind, target_id, 1).await?;
            }
            ToggleOutcome { now_active: true }
        };

        tx.commit().await?;

        tracing::debug!(
            actor_id,
            kind = %kind,
            target_id,
            now_active = outcome.now_active,
            "relation toggled"
        );
        Ok(outcome)
    }

    /// Read a target's counter from the ledger.
    ///
    /// Served from the denormalized column, never by scanning the relation
    /// store. Deactivated targets are readable: their counter stays frozen at
    /// its last value.
    pub async fn count(
        pool: &PgPool,
        kind: RelationKind,
        target_id: DbId,
    ) -> Result<i64, ToggleError> {
        let (table, column) = counter_location(kind);
        let query = format!("SELECT {column} FROM {table} WHERE id = $1");
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(target_id)
            .fetch_optional(pool)
            .await?;
        count.ok_or(ToggleError::InvalidTarget {
            entity: kind.target_entity(),
            id: target_id,
        })
    }
}

/// Whether the target row exists and accepts new relations.
async fn target_is_active(
    conn: &mut PgConnection,
    kind: RelationKind,
    target_id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = match kind {
        RelationKind::VideoLike => {
            "SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1 AND is_published AND deleted_at IS NULL)"
        }
        RelationKind::CommentLike => {
            "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1 AND deleted_at IS NULL)"
        }
        RelationKind::TweetLike => {
            "SELECT EXISTS(SELECT 1 FROM tweets WHERE id = $1 AND deleted_at IS NULL)"
        }
        RelationKind::Subscription => {
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)"
        }
    };
    sqlx::query_scalar(query).bind(target_id).fetch_one(conn).await
}

/// Apply a ledger adjustment inside the caller's transaction.
///
/// The guard clause refuses to drive a counter negative; zero rows affected
/// means either the target vanished mid-flight (the surrounding transaction
/// rolls back, keeping relation and counter consistent) or the ledger itself
/// is wrong, which escapes as [`ToggleError::CounterDesync`].
async fn adjust_counter(
    conn: &mut PgConnection,
    kind: RelationKind,
    target_id: DbId,
    delta: i64,
) -> Result<(), ToggleError> {
    let (table, column) = counter_location(kind);
    let query = format!(
        "UPDATE {table} SET {column} = {column} + $1
         WHERE id = $2 AND deleted_at IS NULL AND {column} + $1 >= 0"
    );
    let rows = sqlx::query(&query)
        .bind(delta)
        .bind(target_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if rows == 0 {
        if target_is_active(conn, kind, target_id).await? {
            tracing::error!(
                kind = %kind,
                target_id,
                delta,
                "counter adjustment rejected on a live target"
            );
            return Err(ToggleError::CounterDesync {
                entity: kind.target_entity(),
                id: target_id,
            });
        }
        return Err(ToggleError::InvalidTarget {
            entity: kind.target_entity(),
            id: target_id,
        });
    }
    Ok(())
}
