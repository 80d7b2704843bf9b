use bootsecrets_core::{CastError, FetchKey, MalformedReference, NodePath};

use crate::secrets::{FetchError, FetchErrorKind};

/// Fatal failure of a resolution pass, located at the offending node.
#[derive(Debug, thiserror::Error)]
#[error("cannot resolve secret reference at {path}: {kind}")]
pub struct ResolveError {
    pub path: NodePath,
    #[source]
    pub kind: ResolveErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveErrorKind {
    #[error("malformed secret reference: {0}")]
    Malformed(MalformedReference),
    #[error(transparent)]
    Fetch(FetchError),
    #[error("secret {key}: {source}")]
    Cast {
        key: FetchKey,
        #[source]
        source: CastError,
    },
}

impl ResolveError {
    pub fn malformed(path: NodePath, err: MalformedReference) -> Self {
        Self {
            path,
            kind: ResolveErrorKind::Malformed(err),
        }
    }

    pub fn fetch(path: NodePath, err: FetchError) -> Self {
        Self {
            path,
            kind: ResolveErrorKind::Fetch(err),
        }
    }

    pub fn cast(path: NodePath, key: FetchKey, err: CastError) -> Self {
        Self {
            path,
            kind: ResolveErrorKind::Cast { key, source: err },
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::Malformed(_))
    }

    pub fn fetch_error_kind(&self) -> Option<FetchErrorKind> {
        match &self.kind {
            ResolveErrorKind::Fetch(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The secret this error is about, if it got far enough to know one.
    pub fn fetch_key(&self) -> Option<&FetchKey> {
        match &self.kind {
            ResolveErrorKind::Malformed(_) => None,
            ResolveErrorKind::Fetch(e) => Some(&e.key),
            ResolveErrorKind::Cast { key, .. } => Some(key),
        }
    }
}
