//! Dry-run listing of the secret references in a tree.

use std::collections::BTreeSet;

use crate::error::MalformedReference;
use crate::node::ConfigNode;
use crate::path::NodePath;
use crate::reference::{recognize, FetchKey, SecretReference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedReference {
    pub path: NodePath,
    pub reference: SecretReference,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub references: Vec<ScannedReference>,
}

impl ScanReport {
    /// Distinct fetch keys, i.e. the number of remote lookups a resolution would make.
    pub fn unique_keys(&self) -> BTreeSet<FetchKey> {
        self.references
            .iter()
            .map(|r| r.reference.fetch_key())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed secret reference at {path}: {source}")]
pub struct ScanError {
    pub path: NodePath,
    #[source]
    pub source: MalformedReference,
}

/// Walk the tree depth-first, in document order, collecting every reference.
pub fn scan_references(node: &ConfigNode) -> Result<ScanReport, ScanError> {
    let mut report = ScanReport::default();
    scan_node(node, &NodePath::root(), &mut report)?;
    Ok(report)
}

fn scan_node(node: &ConfigNode, path: &NodePath, out: &mut ScanReport) -> Result<(), ScanError> {
    match recognize(node) {
        Ok(Some(reference)) => {
            out.references.push(ScannedReference {
                path: path.clone(),
                reference,
            });
            return Ok(());
        }
        Ok(None) => {}
        Err(source) => {
            return Err(ScanError {
                path: path.clone(),
                source,
            })
        }
    }

    match node {
        ConfigNode::List(items) => {
            for (i, item) in items.iter().enumerate() {
                scan_node(item, &path.index(i), out)?;
            }
        }
        ConfigNode::Tuple(items) => {
            for (i, item) in items.iter().enumerate() {
                scan_node(item, &path.component(i), out)?;
            }
        }
        ConfigNode::Map(entries) => {
            for (k, v) in entries {
                scan_node(v, &path.key(&k.key_text()), out)?;
            }
        }
        _ => {}
    }
    Ok(())
}
