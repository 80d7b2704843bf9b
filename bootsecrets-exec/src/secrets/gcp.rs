//! Google Secret Manager fetcher over the REST API.
//!
//! Issues `GET v1/projects/{project}/secrets/{name}/versions/{version}:access`
//! with the credential's bearer token and decodes the base64 payload.

use std::sync::LazyLock;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use base64::Engine;
use bootsecrets_core::FetchKey;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::retry::parse_retry_after;
use crate::secrets::{Credential, FetchError, FetchErrorKind, SecretFetcher, SecretValue};

pub const DEFAULT_ENDPOINT: &str = "https://secretmanager.googleapis.com";

static PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.:_\-]{0,99}$").expect("valid regex"));
static SECRET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]{1,255}$").expect("valid regex"));
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]{1,63}$").expect("valid regex"));

pub struct GcpSecretManagerFetcher {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl GcpSecretManagerFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bootsecrets/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Create from an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            // constant, always parses
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("valid default endpoint"),
            timeout: Duration::from_secs(10),
        }
    }

    /// Point at an emulator or a regional endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn access_url(&self, project: &str, key: &FetchKey) -> Result<Url, FetchError> {
        if !PROJECT_RE.is_match(project) {
            return Err(FetchError::rejected(key, format!("invalid project id {project:?}")));
        }
        if !SECRET_RE.is_match(&key.name) {
            return Err(FetchError::rejected(key, "invalid secret name"));
        }
        if !VERSION_RE.is_match(key.version.as_str()) {
            return Err(FetchError::rejected(key, "invalid secret version"));
        }
        let raw = format!(
            "{}/v1/projects/{}/secrets/{}/versions/{}:access",
            self.endpoint.as_str().trim_end_matches('/'),
            urlencoding::encode(project),
            urlencoding::encode(&key.name),
            urlencoding::encode(key.version.as_str()),
        );
        Url::parse(&raw).map_err(|e| FetchError::rejected(key, format!("invalid request URL: {e}")))
    }
}

#[derive(Deserialize)]
struct AccessResponse {
    payload: Option<Payload>,
}

#[derive(Deserialize)]
struct Payload {
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

pub fn classify_status(status: u16) -> FetchErrorKind {
    match status {
        404 => FetchErrorKind::NotFound,
        401 | 403 => FetchErrorKind::AccessDenied,
        408 | 429 | 500..=599 => FetchErrorKind::Transient,
        _ => FetchErrorKind::Rejected,
    }
}

#[async_trait]
impl SecretFetcher for GcpSecretManagerFetcher {
    async fn access(
        &self,
        project: &str,
        credential: &Credential,
        key: &FetchKey,
    ) -> Result<SecretValue, FetchError> {
        let token = credential
            .bearer_token()
            .ok_or_else(|| FetchError::access_denied(key, "no access token configured"))?;
        let url = self.access_url(project, key)?;

        debug!(secret = %key.name, version = %key.version, "accessing secret version");
        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::transient(key, e.to_string()))?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let retry_after = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| parse_retry_after(v, SystemTime::now()));
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(FetchError::new(key, classify_status(status), message)
                .with_retry_after(retry_after));
        }

        let body: AccessResponse = resp
            .json()
            .await
            .map_err(|e| FetchError::transient(key, format!("failed to read response: {e}")))?;
        let payload = body
            .payload
            .ok_or_else(|| FetchError::rejected(key, "secret version has no payload"))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.data.as_bytes())
            .map_err(|e| FetchError::rejected(key, format!("payload is not valid base64: {e}")))?;

        Ok(SecretValue::from_bytes(bytes))
    }
}
