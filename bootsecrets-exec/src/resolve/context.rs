use bootsecrets_core::FetchKey;

use crate::secrets::{Credential, FetchCache, FetchError, SecretFetcher, SecretValue};

/// State of one resolution pass: where to fetch from, as whom, and what has
/// been fetched so far. Dropped when the pass ends.
pub struct ResolutionContext<'a> {
    project: &'a str,
    credential: &'a Credential,
    cache: FetchCache,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(project: &'a str, credential: &'a Credential, max_concurrent_fetches: usize) -> Self {
        Self {
            project,
            credential,
            cache: FetchCache::new(max_concurrent_fetches),
        }
    }

    pub fn project(&self) -> &str {
        self.project
    }

    pub async fn fetch<F>(&self, fetcher: &F, key: &FetchKey) -> Result<SecretValue, FetchError>
    where
        F: SecretFetcher + ?Sized,
    {
        self.cache
            .get_or_fetch(fetcher, self.project, self.credential, key)
            .await
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }
}
