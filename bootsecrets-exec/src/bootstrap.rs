//! Single entry point run once at process start.

use std::time::Instant;

use bootsecrets_core::ConfigNode;
use tracing::{debug, info};

use crate::resolve::{ResolutionContext, ResolveError, Walker};
use crate::retry::RetryConfig;
use crate::secrets::{Credential, RetryingFetcher, SecretFetcher};

#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub max_concurrent_fetches: usize,
    pub retry: RetryConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            retry: RetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Reference nodes substituted.
    pub references: usize,
    /// Distinct (name, version) pairs requested.
    pub unique_secrets: usize,
    /// Outbound fetches made (retries of one fetch count once).
    pub fetches: usize,
}

/// Outcome of a successful pass: the tree the host should adopt.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub config: ConfigNode,
    pub report: ResolutionReport,
}

pub struct Bootstrap<F> {
    fetcher: RetryingFetcher<F>,
    config: BootstrapConfig,
}

impl<F> Bootstrap<F>
where
    F: SecretFetcher,
{
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, BootstrapConfig::default())
    }

    pub fn with_config(fetcher: F, config: BootstrapConfig) -> Self {
        Self {
            fetcher: RetryingFetcher::new(fetcher, config.retry.clone()),
            config,
        }
    }

    /// Resolve every secret reference in `raw`.
    ///
    /// Each call starts from an empty cache, so secrets rotated since the last
    /// boot are picked up. On error nothing is returned but the error: callers
    /// must not start with a partially resolved configuration.
    pub async fn run(
        &self,
        raw: &ConfigNode,
        project: &str,
        credential: &Credential,
    ) -> Result<Resolution, ResolveError> {
        let started = Instant::now();
        debug!(project, "resolving configuration secrets");

        let context = ResolutionContext::new(project, credential, self.config.max_concurrent_fetches);
        let walker = Walker::new(&self.fetcher, &context);
        let config = walker.resolve(raw).await?;

        let report = ResolutionReport {
            references: walker.reference_count(),
            unique_secrets: context.cache().key_count().await,
            fetches: context.cache().fetch_count(),
        };
        info!(
            project,
            references = report.references,
            unique_secrets = report.unique_secrets,
            fetches = report.fetches,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "configuration secrets resolved"
        );
        Ok(Resolution { config, report })
    }
}
