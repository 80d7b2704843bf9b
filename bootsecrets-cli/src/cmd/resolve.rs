use std::path::Path;

use bootsecrets_exec::Bootstrap;
use tracing::error;

use crate::exit_codes;
use crate::output::{print_error, render_config};
use crate::utils::{
    build_bootstrap_config, build_fetcher, load_config, load_credential, write_private,
};
use crate::{FetchArgs, OutputArgs, RetryArgs};

pub async fn resolve_cmd(
    path: &Path,
    out: Option<&Path>,
    fetch: FetchArgs,
    retry: RetryArgs,
    output: OutputArgs,
) -> i32 {
    let raw = match load_config(path, &output) {
        Ok(node) => node,
        Err(code) => return code,
    };

    let fetcher = match build_fetcher(&fetch) {
        Ok(f) => f,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let credential = match load_credential(&fetch) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let bootstrap = Bootstrap::with_config(fetcher, build_bootstrap_config(&fetch, &retry));
    let resolution = match bootstrap.run(&raw, &fetch.project, &credential).await {
        Ok(r) => r,
        Err(e) => {
            error!(path = %e.path, "secret resolution failed");
            print_error(output.format, output.quiet, &e.to_string());
            return if e.is_malformed() {
                exit_codes::INVALID_CONFIG
            } else {
                exit_codes::RESOLUTION_FAILED
            };
        }
    };

    let rendered = match render_config(output.format, &resolution.config) {
        Ok(s) => s,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to render resolved configuration: {e}"),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };

    match out {
        Some(dest) => {
            if let Err(e) = write_private(dest, &rendered) {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("failed to write {}: {e}", dest.display()),
                );
                return exit_codes::RUNTIME_ERROR;
            }
        }
        // resolved configuration is the product, so it is printed even with --quiet
        None => print!("{rendered}"),
    }
    exit_codes::SUCCESS
}
