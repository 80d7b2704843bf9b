use std::time::Duration;

use crate::retry::config::RetryConfig;
use crate::secrets::FetchErrorKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter { delay: Duration, reason: RetryReason },
    Stop { reason: RetryReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    NotRetryable,
    AttemptsExhausted,
    RetryAfterHint,
    Backoff,
}

/// Decide if a failed fetch should be retried and how long to wait.
///
/// - `attempt_no`: 1-based number of the attempt that just failed.
/// - `kind`: classification of the failure; only transient failures retry.
/// - `retry_after`: server hint, preferred over backoff when present.
/// - `rand_u64`: RNG for full jitter.
pub fn decide_retry(
    cfg: &RetryConfig,
    attempt_no: usize,
    kind: FetchErrorKind,
    retry_after: Option<Duration>,
    rand_u64: impl Fn() -> u64,
) -> RetryDecision {
    if !kind.is_retryable() {
        return RetryDecision::Stop {
            reason: RetryReason::NotRetryable,
        };
    }
    if attempt_no >= cfg.max_attempts.max(1) {
        return RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted,
        };
    }

    if let Some(d) = retry_after {
        return RetryDecision::RetryAfter {
            delay: clamp(d, cfg.max_delay),
            reason: RetryReason::RetryAfterHint,
        };
    }

    // Exponential backoff: base * factor^(attempt_no-1), with full jitter.
    let exp = (attempt_no.saturating_sub(1)) as i32;
    let raw = (cfg.base_delay.as_millis() as f64) * cfg.factor.powi(exp);
    let raw_ms = raw.min(cfg.max_delay.as_millis() as f64).max(0.0) as u64;

    let jitter_ms = if raw_ms == 0 { 0 } else { rand_u64() % (raw_ms + 1) };
    RetryDecision::RetryAfter {
        delay: Duration::from_millis(jitter_ms),
        reason: RetryReason::Backoff,
    }
}

fn clamp(delay: Duration, max: Duration) -> Duration {
    if delay > max { max } else { delay }
}
