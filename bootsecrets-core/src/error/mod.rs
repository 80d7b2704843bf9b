use thiserror::Error;

use crate::reference::TypeTag;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported YAML tag {0} (expected !tuple or !atom)")]
    UnsupportedTag(String),
    #[error("invalid !atom value: {0}")]
    InvalidAtom(String),
    #[error("mapping keys must be scalars, found {0}")]
    UnsupportedKey(String),
}

/// A tuple headed by the secret marker whose remaining shape is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReference {
    #[error("secret reference must have 3 or 4 elements, found {0}")]
    Arity(usize),
    #[error("unknown secret type tag {0} (expected `string` or `integer`)")]
    UnknownType(String),
    #[error("secret name must be a non-empty string, found {0}")]
    InvalidName(String),
    #[error("unrecognized secret version {0} (expected a non-empty string or `latest`)")]
    InvalidVersion(String),
}

/// Payloads longer than this are shortened in messages.
const PAYLOAD_PREVIEW_CHARS: usize = 32;

/// `payload` holds the full text; `Display` quotes at most a short prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot cast {} to {target}: {reason}", payload_preview(.payload))]
pub struct CastError {
    pub payload: String,
    pub target: TypeTag,
    pub reason: String,
}

fn payload_preview(payload: &str) -> String {
    if payload.chars().count() <= PAYLOAD_PREVIEW_CHARS {
        return format!("{payload:?}");
    }
    let head: String = payload.chars().take(PAYLOAD_PREVIEW_CHARS).collect();
    format!("{head:?}... ({} bytes)", payload.len())
}
