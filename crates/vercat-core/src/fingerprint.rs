//! Shape fingerprints for namespace trees
//!
//! A fingerprint hashes everything accessor generation depends on: the
//! identifier path of every node, whether it holds a declaration, whether it
//! is ambiguous, and the declaration's dotted name. Two trees built from any
//! permutation of the same declarations hash identically.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::declaration::DeclarationKind;
use crate::tree::{NamespaceTree, NodeShape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeFingerprint {
    pub kind: DeclarationKind,
    pub nodes: usize,
    pub declarations: usize,
    pub hash: String,
}

impl TreeFingerprint {
    /// Short hash for display purposes
    pub fn short_hash(&self) -> String {
        self.hash.chars().take(12).collect()
    }

    pub fn matches(&self, other: &TreeFingerprint) -> bool {
        self.kind == other.kind && self.hash == other.hash
    }
}

/// Accumulates canonical lines and hashes them in sorted order
#[derive(Debug, Default)]
pub struct FingerprintBuilder {
    parts: Vec<String>,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_part(&mut self, part: impl Into<String>) -> &mut Self {
        self.parts.push(part.into());
        self
    }

    pub fn hash(&self) -> String {
        let mut sorted = self.parts.clone();
        sorted.sort();

        let mut hasher = Sha256::new();
        for part in &sorted {
            hasher.update(part.as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

impl NamespaceTree {
    pub fn fingerprint(&self) -> TreeFingerprint {
        let mut builder = FingerprintBuilder::new();
        builder.add_part(format!("kind={}", self.kind()));

        for index in self.iter() {
            let node = self.node(index);
            let ids = node
                .identifier_path()
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(".");
            let shape = match node.shape() {
                NodeShape::Group => "group",
                NodeShape::Leaf => "leaf",
                NodeShape::Ambiguous => "ambiguous",
            };
            let alias = node.leaf().map(|d| d.name.as_str()).unwrap_or("");
            builder.add_part(format!("{}|{}|{}", ids, shape, alias));
        }

        TreeFingerprint {
            kind: self.kind(),
            nodes: self.node_count(),
            declarations: self.leaf_count(),
            hash: builder.hash(),
        }
    }
}
