use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bootsecrets_core::FetchKey;
use tokio::sync::{Mutex, OnceCell, Semaphore};
use tracing::debug;

use crate::secrets::{Credential, FetchError, SecretFetcher, SecretValue};

/// Per-pass fetch cache with single-flight semantics.
///
/// Every key is fetched at most once successfully, no matter how many
/// references share it or how many of them ask concurrently. Entries live as
/// long as the cache; nothing expires within a pass.
pub struct FetchCache {
    entries: Mutex<HashMap<FetchKey, Arc<OnceCell<SecretValue>>>>,
    permits: Semaphore,
    fetches: AtomicUsize,
}

impl FetchCache {
    /// `max_concurrent_fetches` bounds outbound calls in flight; zero is treated as one.
    pub fn new(max_concurrent_fetches: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            permits: Semaphore::new(max_concurrent_fetches.max(1)),
            fetches: AtomicUsize::new(0),
        }
    }

    pub async fn get_or_fetch<F>(
        &self,
        fetcher: &F,
        project: &str,
        credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError>
    where
        F: SecretFetcher + ?Sized,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.clone()).or_default().clone()
        };

        let value = cell
            .get_or_try_init(|| async {
                let _permit = self
                    .permits
                    .acquire()
                    .await
                    .map_err(|_| FetchError::transient(key, "fetch limiter closed"))?;
                self.fetches.fetch_add(1, Ordering::SeqCst);
                debug!(secret = %key.name, version = %key.version, "fetching secret");
                fetcher.access(project, credential, key).await
            })
            .await?;

        Ok(value.clone())
    }

    /// Number of outbound fetches started so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of distinct keys requested so far.
    pub async fn key_count(&self) -> usize {
        self.entries.lock().await.len()
    }
}
