use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(
    name = "bootsecrets",
    version,
    about = "Resolve secret references in a configuration file before the application boots"
)]
struct Cli {
    /// Log fetch activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    // stdout carries the resolved configuration, logs go to stderr
    let filter = EnvFilter::try_from_env("BOOTSECRETS_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("bootsecrets=debug,bootsecrets_exec=debug")
        } else {
            EnvFilter::new("bootsecrets=warn,bootsecrets_exec=warn")
        }
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Resolve {
            path,
            out,
            fetch,
            retry,
            output,
        } => cmd::resolve::resolve_cmd(&path, out.as_deref(), fetch, retry, output).await,
        Command::Check { path, output } => cmd::check::check_cmd(&path, output).await,
    }
}
