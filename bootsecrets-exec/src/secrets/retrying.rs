use async_trait::async_trait;
use bootsecrets_core::FetchKey;
use tracing::warn;

use crate::retry::{decide_retry, RetryConfig, RetryDecision, RetryReason};
use crate::secrets::{Credential, FetchError, SecretFetcher, SecretValue};

/// Retries transient failures of the wrapped fetcher with exponential backoff
/// and full jitter. Other failures pass through on the first attempt.
pub struct RetryingFetcher<F> {
    inner: F,
    config: RetryConfig,
}

impl<F> RetryingFetcher<F>
where
    F: SecretFetcher,
{
    pub fn new(inner: F, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<F> SecretFetcher for RetryingFetcher<F>
where
    F: SecretFetcher,
{
    async fn access(
        &self,
        project: &str,
        credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError> {
        let mut attempt_no = 1;
        loop {
            let err = match self.inner.access(project, credential, key).await {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };
            match decide_retry(&self.config, attempt_no, err.kind, err.retry_after, || fastrand::u64(..)) {
                RetryDecision::RetryAfter { delay, .. } => {
                    warn!(
                        secret = %key.name,
                        version = %key.version,
                        attempt = attempt_no,
                        delay_ms = delay.as_millis() as u64,
                        error = %err.message,
                        "transient failure fetching secret, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt_no += 1;
                }
                RetryDecision::Stop {
                    reason: RetryReason::AttemptsExhausted,
                } if attempt_no > 1 => {
                    return Err(FetchError {
                        message: format!("{} (gave up after {attempt_no} attempts)", err.message),
                        ..err
                    });
                }
                RetryDecision::Stop { .. } => return Err(err),
            }
        }
    }
}
