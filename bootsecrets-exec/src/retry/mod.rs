mod config;
mod decision;
mod headers;

pub use config::RetryConfig;
pub use decision::{RetryDecision, RetryReason, decide_retry};
pub use headers::parse_retry_after;
