//! Long-running background tasks spawned at startup.

pub mod blob_release;
pub mod counter_reconcile;
