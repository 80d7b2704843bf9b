use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_TOKEN_ENV: &str = "BOOTSECRETS_ACCESS_TOKEN";

/// Handle used to authenticate against the secret store.
///
/// Holds an already-minted OAuth access token; obtaining one is the host's job.
pub struct Credential {
    token: Option<SecretString>,
}

impl Credential {
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
        }
    }

    /// For backends that do not authenticate (env, file).
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn from_env(var: &str) -> Result<Self, CredentialError> {
        match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => Ok(Self::from_token(v.trim())),
            Ok(_) => Err(CredentialError::Empty(format!("${var}"))),
            Err(_) => Err(CredentialError::MissingEnv(var.to_string())),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let content = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let token = content.trim();
        if token.is_empty() {
            return Err(CredentialError::Empty(path.display().to_string()));
        }
        Ok(Self::from_token(token))
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.token {
            Some(_) => f.write_str("Credential(<redacted>)"),
            None => f.write_str("Credential(anonymous)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
    #[error("access token from {0} is empty")]
    Empty(String),
    #[error("failed to read access token from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
