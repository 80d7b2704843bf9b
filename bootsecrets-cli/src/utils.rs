use std::io::Write;
use std::path::Path;
use std::time::Duration;

use bootsecrets_core::{parse_config_str, ConfigFormat, ConfigNode};
use bootsecrets_exec::retry::RetryConfig;
use bootsecrets_exec::secrets::{
    Credential, EnvFetcher, FileFetcher, GcpSecretManagerFetcher, SecretFetcher, DEFAULT_TOKEN_ENV,
};
use bootsecrets_exec::BootstrapConfig;

use crate::exit_codes;
use crate::output::print_error;
use crate::{Backend, FetchArgs, OutputArgs, RetryArgs};

/// Read and parse a configuration file; on failure the error is printed and
/// the exit code returned.
pub fn load_config(path: &Path, output: &OutputArgs) -> Result<ConfigNode, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;
    parse_config_str(&content, ConfigFormat::Auto)
        .map(|parsed| parsed.root)
        .map_err(|e| {
            print_error(output.format, output.quiet, &e.to_string());
            exit_codes::INVALID_CONFIG
        })
}

pub fn build_fetcher(fetch: &FetchArgs) -> Result<Box<dyn SecretFetcher>, String> {
    match fetch.backend {
        Backend::Gcp => {
            let mut f = GcpSecretManagerFetcher::new()
                .map_err(|e| format!("failed to create HTTP client: {e}"))?
                .with_timeout(Duration::from_millis(fetch.timeout));
            if let Some(endpoint) = &fetch.endpoint {
                let url = url::Url::parse(endpoint)
                    .map_err(|e| format!("invalid --endpoint {endpoint}: {e}"))?;
                f = f.with_endpoint(url);
            }
            Ok(Box::new(f))
        }
        Backend::Env => Ok(Box::new(EnvFetcher {
            env_prefix: fetch.env_prefix.clone(),
        })),
        Backend::File => {
            let dir = fetch
                .secrets_dir
                .clone()
                .ok_or_else(|| "--secrets-dir is required with --backend file".to_string())?;
            Ok(Box::new(FileFetcher::new(dir)))
        }
    }
}

pub fn load_credential(fetch: &FetchArgs) -> Result<Credential, String> {
    if fetch.backend != Backend::Gcp {
        return Ok(Credential::anonymous());
    }
    match &fetch.token_file {
        Some(path) => Credential::from_file(path),
        None => Credential::from_env(DEFAULT_TOKEN_ENV),
    }
    .map_err(|e| e.to_string())
}

pub fn build_bootstrap_config(fetch: &FetchArgs, retry: &RetryArgs) -> BootstrapConfig {
    let defaults = RetryConfig::default();
    BootstrapConfig {
        max_concurrent_fetches: fetch.max_concurrent_fetches,
        retry: RetryConfig {
            max_attempts: retry.retry_max_attempts.unwrap_or(defaults.max_attempts),
            max_delay: retry
                .retry_max_delay
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_delay),
            ..defaults
        },
    }
}

/// Write resolved configuration readable by the owner only; it holds secrets.
pub fn write_private(path: &Path, content: &str) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)?;
        // mode only applies to new files
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
    }

    #[cfg(not(unix))]
    {
        let mut file = std::fs::File::create(path)?;
        file.write_all(content.as_bytes())?;
    }

    Ok(())
}
