use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Google Secret Manager
    Gcp,
    /// Environment variables (development)
    Env,
    /// Directory of `<name>/<version>` files (development)
    File,
}

#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    #[arg(long, env = "BOOTSECRETS_PROJECT")]
    pub project: String,
    #[arg(long, value_enum, default_value_t = Backend::Gcp, env = "BOOTSECRETS_BACKEND")]
    pub backend: Backend,
    /// File holding an OAuth access token; defaults to $BOOTSECRETS_ACCESS_TOKEN.
    #[arg(long)]
    pub token_file: Option<PathBuf>,
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout: u64,
    #[arg(long, env = "BOOTSECRETS_SECRETS_DIR")]
    pub secrets_dir: Option<PathBuf>,
    #[arg(long, env = "BOOTSECRETS_ENV_PREFIX")]
    pub env_prefix: Option<String>,
    #[arg(long, default_value_t = 8)]
    pub max_concurrent_fetches: usize,
}

#[derive(Debug, Args, Clone)]
pub struct RetryArgs {
    #[arg(long)]
    pub retry_max_attempts: Option<usize>,
    /// Upper bound for a single backoff delay, in milliseconds.
    #[arg(long)]
    pub retry_max_delay: Option<u64>,
}
