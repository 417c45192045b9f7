use std::sync::Arc;

use cliptube_blob::BlobStore;
use cliptube_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: DbPool,
    /// Server configuration (immutable after startup).
    pub config: Arc<ServerConfig>,
    /// Object store used by the blob-release background task.
    pub blob_store: Arc<dyn BlobStore>,
}
