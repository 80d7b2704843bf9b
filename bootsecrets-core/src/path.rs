use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
    /// Position inside a tuple.
    Component(usize),
}

/// Location of a node in a configuration tree, rendered as `$.db.hosts[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        self.child(PathSegment::Key(key.to_string()))
    }

    pub fn index(&self, idx: usize) -> Self {
        self.child(PathSegment::Index(idx))
    }

    pub fn component(&self, idx: usize) -> Self {
        self.child(PathSegment::Component(idx))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn child(&self, seg: PathSegment) -> Self {
        let mut segs = self.0.clone();
        segs.push(seg);
        Self(segs)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for seg in &self.0 {
            match seg {
                PathSegment::Key(k) if is_plain_key(k) => write!(f, ".{k}")?,
                PathSegment::Key(k) => write!(f, "[{k:?}]")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
                PathSegment::Component(i) => write!(f, ".<{i}>")?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(k: &str) -> bool {
    !k.is_empty()
        && k
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
