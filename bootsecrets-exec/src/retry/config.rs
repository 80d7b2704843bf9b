use std::time::Duration;

/// Bounded retry for transient fetch failures.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts including the first one.
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(200),
            factor: 2.0,
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// Single attempt, no retries.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}
