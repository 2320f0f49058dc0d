//! Namespace tree for one declaration kind
//!
//! Dotted aliases are inserted segment by segment into a `petgraph::DiGraph`
//! used as an arena:
//! - Nodes: [`NamespaceNode`] (one per segment, optionally holding a declaration)
//! - Edges: parent contains child, weighted with the child's raw segment
//!
//! A node may hold a declaration and have children at the same time
//! (`androidx.ui` next to `androidx.ui.graphics`). That node is ambiguous and
//! is kept as such; only two declarations ending on the same node are an error.
//!
//! Building happens in three passes so the result does not depend on input
//! order: validate every name, insert every path, then allocate identifiers
//! for each sibling set in sorted order.

use std::collections::BTreeMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::declaration::{Declaration, DeclarationKind, DeclarationSet, DottedName};
use crate::error::CoreError;
use crate::naming::{normalize_segment, Identifier, IdentifierAllocator};

/// How a node surfaces through accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// Only children, no declaration
    Group,
    /// Only a declaration, no children
    Leaf,
    /// Both a declaration and children
    Ambiguous,
}

/// One vertex of the namespace tree
#[derive(Debug, Clone)]
pub struct NamespaceNode {
    /// Raw segment; `None` for the root
    segment: Option<String>,
    /// Allocated identifier; `None` for the root
    identifier: Option<Identifier>,
    /// Raw dotted path from the root (empty for the root)
    path: String,
    /// Identifiers from the root down to and including this node
    identifier_path: Vec<Identifier>,
    leaf: Option<Declaration>,
    /// Children sorted by identifier
    children: Vec<NodeIndex>,
    /// lowercase identifier -> child
    child_keys: BTreeMap<String, NodeIndex>,
}

impl NamespaceNode {
    fn root() -> Self {
        Self {
            segment: None,
            identifier: None,
            path: String::new(),
            identifier_path: Vec::new(),
            leaf: None,
            children: Vec::new(),
            child_keys: BTreeMap::new(),
        }
    }

    fn child_of(parent_path: &str, segment: &str) -> Self {
        let path = if parent_path.is_empty() {
            segment.to_string()
        } else {
            format!("{}.{}", parent_path, segment)
        };
        Self {
            segment: Some(segment.to_string()),
            path,
            ..Self::root()
        }
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn identifier_path(&self) -> &[Identifier] {
        &self.identifier_path
    }

    pub fn leaf(&self) -> Option<&Declaration> {
        self.leaf.as_ref()
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.segment.is_none()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.leaf.is_some() && !self.children.is_empty()
    }

    pub fn shape(&self) -> NodeShape {
        match (self.leaf.is_some(), self.children.is_empty()) {
            (true, true) => NodeShape::Leaf,
            (true, false) => NodeShape::Ambiguous,
            (false, _) => NodeShape::Group,
        }
    }
}

/// A segment that did not resolve while walking a dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSegment {
    /// The segment that had no matching child
    pub segment: String,
    /// The dotted prefix that did resolve (empty when the first segment failed)
    pub resolved: String,
}

/// The built, immutable namespace tree of one declaration kind
#[derive(Debug, Clone)]
pub struct NamespaceTree {
    kind: DeclarationKind,
    graph: DiGraph<NamespaceNode, String>,
    root: NodeIndex,
    leaf_count: usize,
}

impl NamespaceTree {
    /// Build the tree for `kind` from every declaration of that kind in `set`
    pub fn build(kind: DeclarationKind, set: &DeclarationSet) -> Result<Self, CoreError> {
        Self::from_declarations(kind, set.of_kind(kind).cloned())
    }

    /// Build from declarations that are all of `kind`
    ///
    /// Declarations of another kind are rejected as invalid names in this
    /// namespace rather than silently dropped.
    pub fn from_declarations<I>(kind: DeclarationKind, declarations: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let span = tracing::debug_span!("build_tree", %kind);
        let _guard = span.enter();

        let mut validated = Vec::new();
        for declaration in declarations {
            if declaration.kind() != kind {
                return Err(CoreError::InvalidName {
                    kind,
                    name: declaration.name.clone(),
                    reason: format!("declared as a {}", declaration.kind()),
                });
            }
            let name = DottedName::parse(kind, &declaration.name)?;
            validated.push((name, declaration));
        }

        let mut tree = Self {
            kind,
            graph: DiGraph::new(),
            root: NodeIndex::new(0),
            leaf_count: 0,
        };
        tree.root = tree.graph.add_node(NamespaceNode::root());

        for (name, declaration) in validated {
            tree.insert(&name, declaration)?;
        }
        tree.finalize()?;

        tracing::info!(
            "built {} tree: {} nodes, {} declarations, {} ambiguous",
            kind,
            tree.node_count(),
            tree.leaf_count,
            tree.ambiguous_nodes().count()
        );
        Ok(tree)
    }

    fn insert(&mut self, name: &DottedName, declaration: Declaration) -> Result<(), CoreError> {
        let mut current = self.root;
        for segment in name.segments() {
            current = match self.find_raw_child(current, segment) {
                Some(child) => child,
                None => {
                    let node = NamespaceNode::child_of(&self.graph[current].path, segment);
                    let child = self.graph.add_node(node);
                    self.graph.add_edge(current, child, segment.clone());
                    child
                }
            };
        }

        let node = &mut self.graph[current];
        if node.leaf.is_some() {
            return Err(CoreError::DuplicateAlias {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        tracing::debug!("inserted {} alias '{}'", self.kind, name);
        node.leaf = Some(declaration);
        self.leaf_count += 1;
        Ok(())
    }

    fn find_raw_child(&self, parent: NodeIndex, segment: &str) -> Option<NodeIndex> {
        self.graph
            .edges_directed(parent, Direction::Outgoing)
            .find(|edge| edge.weight() == segment)
            .map(|edge| edge.target())
    }

    /// Allocate identifiers for every sibling set, top down
    fn finalize(&mut self) -> Result<(), CoreError> {
        let mut pending = vec![self.root];
        while let Some(parent) = pending.pop() {
            let mut raw_children: Vec<(String, NodeIndex)> = self
                .graph
                .edges_directed(parent, Direction::Outgoing)
                .map(|edge| (edge.weight().clone(), edge.target()))
                .collect();
            raw_children.sort();

            let parent_path = self.graph[parent].path.clone();
            let parent_ids = self.graph[parent].identifier_path.clone();
            let mut allocator = IdentifierAllocator::new(self.kind, &parent_path);
            let mut child_keys = BTreeMap::new();

            for (segment, child) in &raw_children {
                let identifier = allocator.allocate(segment)?;
                child_keys.insert(identifier.key(), *child);

                let node = &mut self.graph[*child];
                node.identifier_path = parent_ids.clone();
                node.identifier_path.push(identifier.clone());
                node.identifier = Some(identifier);
                pending.push(*child);
            }

            let node = &mut self.graph[parent];
            node.children = child_keys.values().copied().collect();
            node.child_keys = child_keys;
        }
        Ok(())
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Node data; indices come from this tree
    pub fn node(&self, index: NodeIndex) -> &NamespaceNode {
        &self.graph[index]
    }

    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .next()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Longest path from the root, in segments
    pub fn depth(&self) -> usize {
        self.iter()
            .map(|idx| self.graph[idx].identifier_path.len())
            .max()
            .unwrap_or(0)
    }

    /// Find a child by raw segment or identifier, case-insensitively
    pub fn find_child(&self, parent: NodeIndex, name: &str) -> Option<NodeIndex> {
        let key = normalize_segment(name)?.to_ascii_lowercase();
        self.graph[parent].child_keys.get(&key).copied()
    }

    /// Walk a dotted path from the root
    pub fn find_path(&self, dotted: &str) -> Result<NodeIndex, MissingSegment> {
        let mut current = self.root;
        let mut resolved: Vec<&str> = Vec::new();
        for segment in dotted.split('.') {
            match self.find_child(current, segment) {
                Some(child) => {
                    current = child;
                    resolved.push(segment);
                }
                None => {
                    return Err(MissingSegment {
                        segment: segment.to_string(),
                        resolved: resolved.join("."),
                    })
                }
            }
        }
        Ok(current)
    }

    /// Pre-order traversal with siblings in identifier order
    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.graph[next].children.iter().rev().copied());
            Some(next)
        })
    }

    pub fn ambiguous_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.iter().filter(|idx| self.graph[*idx].is_ambiguous())
    }
}
