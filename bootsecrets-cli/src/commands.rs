use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every referenced secret and print the resolved configuration.
    Resolve {
        path: PathBuf,
        /// Write the resolved configuration here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        retry: RetryArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List secret references without fetching anything.
    Check {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
