//! Out-of-band counter reconciliation.
//!
//! Re-derives each ledger counter from the relation store and repairs drift.
//! This is the recovery mechanism for a `CounterDesync`, run periodically or
//! on demand by an operator. It is intentionally not part of the toggle hot
//! path.

use cliptube_core::types::{DbId, RelationKind};
use sqlx::PgPool;

/// One counter found out of step with the relation store.
#[derive(Debug, Clone)]
pub struct CounterDrift {
    pub kind: RelationKind,
    pub target_id: DbId,
    pub stored: i64,
    pub actual: i64,
}

/// Table and counter column for a kind. Mirrors the toggle engine's mapping.
fn counter_location(kind: RelationKind) -> (&'static str, &'static str) {
    match kind {
        RelationKind::VideoLike => ("videos", "like_count"),
        RelationKind::CommentLike => ("comments", "like_count"),
        RelationKind::TweetLike => ("tweets", "like_count"),
        RelationKind::Subscription => ("users", "subscriber_count"),
    }
}

/// Find counters of one kind that differ from the live relation count.
///
/// Deactivated targets are included on purpose: their relations are left in
/// place when they are deactivated, so equality must still hold for them.
pub async fn find_drift(pool: &PgPool, kind: RelationKind) -> Result<Vec<CounterDrift>, sqlx::Error> {
    let (table, column) = counter_location(kind);
    let query = format!(
        "SELECT t.id, t.{column} AS stored, COALESCE(live.cnt, 0) AS actual
         FROM {table} t
         LEFT JOIN (
             SELECT target_id, COUNT(*) AS cnt
             FROM relations WHERE kind = $1
             GROUP BY target_id
         ) live ON live.target_id = t.id
         WHERE t.{column} <> COALESCE(live.cnt, 0)"
    );
    let rows: Vec<(DbId, i64, i64)> = sqlx::query_as(&query)
        .bind(kind.as_str())
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(target_id, stored, actual)| CounterDrift {
            kind,
            target_id,
            stored,
            actual,
        })
        .collect())
}

/// Repair every drifted counter across all relation kinds.
///
/// Returns the drift that was found (and fixed) so callers can report it.
pub async fn repair(pool: &PgPool) -> Result<Vec<CounterDrift>, sqlx::Error> {
    let mut repaired = Vec::new();

    for kind in RelationKind::ALL {
        let drift = find_drift(pool, kind).await?;
        let (table, column) = counter_location(kind);

        for entry in drift {
            tracing::warn!(
                kind = %entry.kind,
                target_id = entry.target_id,
                stored = entry.stored,
                actual = entry.actual,
                "repairing drifted counter"
            );
            let query = format!("UPDATE {table} SET {column} = $2 WHERE id = $1");
            sqlx::query(&query)
                .bind(entry.target_id)
                .bind(entry.actual)
                .execute(pool)
                .await?;
            repaired.push(entry);
        }
    }

    Ok(repaired)
}
