//! Recognition of secret references inside a configuration tree.
//!
//! A reference is a tuple shaped `(gcp_secret, type_tag, name)` or
//! `(gcp_secret, type_tag, name, version)`. Only the leading marker symbol
//! makes a tuple a reference; any other tuple is application data.

use std::fmt;
use std::str::FromStr;

use crate::error::MalformedReference;
use crate::node::ConfigNode;

/// Sentinel symbol heading every secret reference tuple.
pub const MARKER: &str = "gcp_secret";

/// Literal version alias for the most recent secret version.
pub const LATEST: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Integer,
}

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = MalformedReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            other => Err(MalformedReference::UnknownType(format!("{other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    Latest,
    Pinned(String),
}

impl Version {
    /// Version segment as the secret store expects it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Latest => LATEST,
            Self::Pinned(v) => v,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one remote lookup within a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchKey {
    pub name: String,
    pub version: Version,
}

impl FetchKey {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn latest(name: impl Into<String>) -> Self {
        Self::new(name, Version::Latest)
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // names and versions are identifiers, never secret material
        write!(f, "{}@{}", self.name, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    pub type_tag: TypeTag,
    pub name: String,
    pub version: Version,
}

impl SecretReference {
    pub fn fetch_key(&self) -> FetchKey {
        FetchKey::new(self.name.clone(), self.version.clone())
    }

    /// Build the tuple literal for this reference.
    pub fn to_node(&self) -> ConfigNode {
        let mut items = vec![
            ConfigNode::symbol(MARKER),
            ConfigNode::symbol(self.type_tag.as_str()),
            ConfigNode::string(self.name.clone()),
        ];
        if let Version::Pinned(v) = &self.version {
            items.push(ConfigNode::string(v.clone()));
        }
        ConfigNode::Tuple(items)
    }
}

/// True when the node is a tuple headed by the marker, well-formed or not.
pub fn is_reference(node: &ConfigNode) -> bool {
    match node {
        ConfigNode::Tuple(items) => items
            .first()
            .and_then(ConfigNode::as_symbol)
            .is_some_and(|s| s == MARKER),
        _ => false,
    }
}

/// Classify a node.
///
/// Returns `Ok(None)` for anything that is not a marker-headed tuple and an
/// error for a marker-headed tuple with the wrong shape.
pub fn recognize(node: &ConfigNode) -> Result<Option<SecretReference>, MalformedReference> {
    if !is_reference(node) {
        return Ok(None);
    }
    let ConfigNode::Tuple(items) = node else {
        return Ok(None);
    };

    let (tag, name, version) = match items.as_slice() {
        [_, tag, name] => (tag, name, None),
        [_, tag, name, version] => (tag, name, Some(version)),
        other => return Err(MalformedReference::Arity(other.len())),
    };

    let type_tag = match tag {
        ConfigNode::Symbol(s) | ConfigNode::String(s) => s.parse::<TypeTag>()?,
        other => return Err(MalformedReference::UnknownType(describe(other))),
    };

    let name = match name {
        ConfigNode::String(s) if !s.is_empty() => s.clone(),
        other => return Err(MalformedReference::InvalidName(describe(other))),
    };

    let version = match version {
        None => Version::Latest,
        Some(v) => parse_version(v)?,
    };

    Ok(Some(SecretReference {
        type_tag,
        name,
        version,
    }))
}

fn parse_version(node: &ConfigNode) -> Result<Version, MalformedReference> {
    match node {
        ConfigNode::Symbol(s) | ConfigNode::String(s) if s == LATEST => Ok(Version::Latest),
        ConfigNode::String(s) if !s.is_empty() => Ok(Version::Pinned(s.clone())),
        other => Err(MalformedReference::InvalidVersion(describe(other))),
    }
}

fn describe(node: &ConfigNode) -> String {
    match node {
        ConfigNode::String(s) => format!("{s:?}"),
        ConfigNode::Symbol(s) => format!("symbol {s}"),
        ConfigNode::Integer(n) => format!("integer {n}"),
        other => other.kind().to_string(),
    }
}
