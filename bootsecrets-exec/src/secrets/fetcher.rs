use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bootsecrets_core::{FetchKey, Version};

use crate::secrets::{Credential, FetchError, SecretValue};

/// Remote lookup of one secret version.
///
/// Implementations make exactly one attempt per call; retries and
/// deduplication are layered on top.
#[async_trait]
pub trait SecretFetcher: Send + Sync {
    async fn access(
        &self,
        project: &str,
        credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError>;
}

#[async_trait]
impl<F> SecretFetcher for Box<F>
where
    F: SecretFetcher + ?Sized,
{
    async fn access(
        &self,
        project: &str,
        credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError> {
        (**self).access(project, credential, key).await
    }
}

#[async_trait]
impl<F> SecretFetcher for Arc<F>
where
    F: SecretFetcher + ?Sized,
{
    async fn access(
        &self,
        project: &str,
        credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError> {
        (**self).access(project, credential, key).await
    }
}

/// Reads secrets from environment variables, for local development.
///
/// `db-password` latest is read from `{prefix}DB_PASSWORD`; version `3` from
/// `{prefix}DB_PASSWORD__3`.
#[derive(Debug, Clone, Default)]
pub struct EnvFetcher {
    pub env_prefix: Option<String>,
}

impl EnvFetcher {
    pub fn var_name(&self, key: &FetchKey) -> String {
        let mut var = self.env_prefix.clone().unwrap_or_default();
        var.push_str(&env_segment(&key.name));
        if let Version::Pinned(v) = &key.version {
            var.push_str("__");
            var.push_str(&env_segment(v));
        }
        var
    }
}

fn env_segment(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl SecretFetcher for EnvFetcher {
    async fn access(
        &self,
        _project: &str,
        _credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError> {
        let var = self.var_name(key);
        match std::env::var(&var) {
            Ok(v) => Ok(SecretValue::from_string(v)),
            Err(std::env::VarError::NotPresent) => {
                Err(FetchError::not_found(key, format!("environment variable {var} is not set")))
            }
            Err(e) => Err(FetchError::rejected(key, format!("{var}: {e}"))),
        }
    }
}

/// Reads secrets from a directory tree laid out as `{base_dir}/{name}/{version}`,
/// with the most recent version stored under `latest`.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    pub base_dir: PathBuf,
}

impl FileFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

fn is_safe_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}

#[async_trait]
impl SecretFetcher for FileFetcher {
    async fn access(
        &self,
        _project: &str,
        _credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError> {
        if !is_safe_segment(&key.name) || !is_safe_segment(key.version.as_str()) {
            return Err(FetchError::rejected(key, "secret name or version is not a plain path segment"));
        }
        let path = self.base_dir.join(&key.name).join(key.version.as_str());
        match std::fs::read(&path) {
            Ok(bytes) => Ok(SecretValue::from_bytes(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::not_found(key, format!("{} does not exist", path.display())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(FetchError::access_denied(key, format!("{}: {e}", path.display())))
            }
            Err(e) => Err(FetchError::rejected(key, format!("{}: {e}", path.display()))),
        }
    }
}
