//! Periodic counter reconciliation.
//!
//! Re-derives every denormalized counter from the relation store and repairs
//! drift. In normal operation the repair list is empty; a non-empty list means
//! a desync slipped past the toggle engine and is worth an operator's look.

use std::time::Duration;

use cliptube_db::reconcile;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Default interval between reconciliation sweeps, in seconds.
const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Run the reconciliation loop until `cancel` is triggered.
///
/// The interval can be overridden with `RECONCILE_INTERVAL_SECS`.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("RECONCILE_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    tracing::info!(interval_secs, "Counter reconciliation job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Counter reconciliation job stopping");
                break;
            }
            _ = interval.tick() => {
                match reconcile::repair(&pool).await {
                    Ok(repaired) if repaired.is_empty() => {
                        tracing::debug!("Counter reconciliation: no drift");
                    }
                    Ok(repaired) => {
                        tracing::warn!(
                            repaired = repaired.len(),
                            "Counter reconciliation: drift repaired"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Counter reconciliation failed");
                    }
                }
            }
        }
    }
}
