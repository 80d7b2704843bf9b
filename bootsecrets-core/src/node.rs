/// A value anywhere in a configuration tree.
///
/// Maps keep the order they were loaded in; resolution never adds, removes or
/// reorders keys.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`, kept as loaded.
    Unsigned(u64),
    Float(f64),
    String(String),
    /// Atom-like identifier, distinct from a string with the same text.
    Symbol(String),
    List(Vec<ConfigNode>),
    /// Keys are scalar nodes; a `1`, `true` or `!atom k` key keeps its type.
    Map(Vec<(ConfigNode, ConfigNode)>),
    Tuple(Vec<ConfigNode>),
}

impl ConfigNode {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }

    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<ConfigNode>,
        I: IntoIterator<Item = (K, ConfigNode)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_) | Self::Tuple(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a string key in a map node.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.get_key(&Self::String(key.to_string()))
    }

    /// Look up a key of any scalar type in a map node.
    pub fn get_key(&self, key: &ConfigNode) -> Option<&ConfigNode> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Text of a scalar used as a map key, for paths and JSON object keys.
    pub fn key_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) | Self::Symbol(s) => s.clone(),
            other => other.kind().to_string(),
        }
    }

    /// Short shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Unsigned(_) => "unsigned",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Tuple(_) => "tuple",
        }
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ConfigNode {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for ConfigNode {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
