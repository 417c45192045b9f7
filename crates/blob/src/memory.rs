//! In-memory blob store for tests and local development.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{BlobError, BlobStore};

/// Records released handles instead of talking to an object store.
///
/// `fail_next(n)` makes the next `n` release calls fail with a retryable
/// error, for exercising the background task's backoff path.
#[derive(Default)]
pub struct MemoryBlobStore {
    released: Mutex<Vec<String>>,
    failures_remaining: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles released so far, in call order.
    pub fn released(&self) -> Vec<String> {
        self.released.lock().expect("lock poisoned").clone()
    }

    /// Make the next `n` release calls fail with [`BlobError::Retryable`].
    pub fn fail_next(&self, n: usize) {
        self.failures_remaining.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn release(&self, handle: &str) -> Result<(), BlobError> {
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(BlobError::Retryable("simulated outage".into()));
        }
        self.released
            .lock()
            .expect("lock poisoned")
            .push(handle.to_string());
        Ok(())
    }
}
