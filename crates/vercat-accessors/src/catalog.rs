//! Accessor catalog over one namespace tree
//!
//! Every accessor is materialized when the catalog is built: one adapted
//! value per declaration (held as `Arc`) and one member table per group.
//! Lookups only borrow from these caches, so repeated lookups of the same
//! path return the same `Arc` and views that compare equal.
//!
//! Navigation mirrors the dotted structure:
//!
//! ```ignore
//! let ui = catalog.root().group("androidx")?.group("ui")?;
//! let ui_itself = ui.as_provider();          // `androidx.ui`
//! let graphics = ui.value("graphics")?;      // `androidx.ui.graphics`
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use vercat_core::naming::{accessor_method_name, capitalize};
use vercat_core::{Identifier, NamespaceTree, NodeIndex, NodeShape, TreeFingerprint};

use crate::adapter::KindAdapter;
use crate::error::CatalogError;

/// Name of the self accessor exposed by ambiguous groups
pub const PROVIDER_ACCESSOR: &str = "asProvider";

/// Materialized accessors of one node
#[derive(Debug)]
struct NodeAccessors<V> {
    value: Option<Arc<V>>,
    description: Option<String>,
    /// Set for nodes with children (and the root)
    type_name: Option<String>,
}

/// The memoized accessor view over one kind's tree
pub struct KindCatalog<A: KindAdapter> {
    tree: NamespaceTree,
    /// Indexed by `NodeIndex::index()`
    nodes: Vec<NodeAccessors<A::Value>>,
    _adapter: PhantomData<A>,
}

impl<A: KindAdapter> fmt::Debug for KindCatalog<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindCatalog")
            .field("kind", &A::KIND)
            .field("nodes", &self.tree.node_count())
            .field("declarations", &self.tree.leaf_count())
            .finish()
    }
}

impl<A: KindAdapter> KindCatalog<A> {
    /// Materialize every accessor of `tree`
    ///
    /// `root_type` names the type of the root group. The tree only holds
    /// declarations of `A::KIND`, so every leaf has a payload for `A`.
    pub fn new(tree: NamespaceTree, root_type: &str) -> Self {
        let mut nodes: Vec<NodeAccessors<A::Value>> = (0..tree.node_count())
            .map(|_| NodeAccessors {
                value: None,
                description: None,
                type_name: None,
            })
            .collect();
        let mut taken_types = BTreeSet::new();

        for index in tree.iter() {
            let node = tree.node(index);
            let slot = &mut nodes[index.index()];

            let leaf = node
                .leaf()
                .and_then(|declaration| Some((declaration, A::payload(&declaration.payload)?)));
            if let Some((declaration, payload)) = leaf {
                slot.value = Some(Arc::new(A::adapt(&declaration.name, payload)));
                slot.description = Some(A::describe(&declaration.name, payload));
            }

            if node.is_root() || !node.children().is_empty() {
                let base = if node.is_root() {
                    root_type.to_string()
                } else {
                    let stem: String = node
                        .identifier_path()
                        .iter()
                        .map(|id| capitalize(id.as_str()))
                        .collect();
                    format!("{}{}", stem, A::TYPE_SUFFIX)
                };
                slot.type_name = Some(unique_type_name(base, &mut taken_types));
            }
        }

        tracing::debug!(
            "materialized {} accessors for {} declarations",
            A::KIND,
            tree.leaf_count()
        );

        Self {
            tree,
            nodes,
            _adapter: PhantomData,
        }
    }

    pub fn tree(&self) -> &NamespaceTree {
        &self.tree
    }

    pub fn fingerprint(&self) -> TreeFingerprint {
        self.tree.fingerprint()
    }

    /// The root group view
    pub fn root(&self) -> NamespaceView<'_, A> {
        NamespaceView {
            catalog: self,
            node: self.tree.root(),
        }
    }

    /// Resolve a dotted alias straight against the tree
    ///
    /// Ambiguous nodes resolve to their own declaration. A malformed name
    /// (`a b`, `a..b`) is a miss on its first unmatched segment.
    pub fn resolve(&self, dotted: &str) -> Result<&Arc<A::Value>, CatalogError> {
        let index = self
            .tree
            .find_path(dotted)
            .map_err(|missing| CatalogError::LookupNotFound {
                kind: A::KIND,
                segment: missing.segment,
                resolved: missing.resolved,
            })?;
        self.value_at(index)
            .ok_or_else(|| CatalogError::NotADeclaration {
                kind: A::KIND,
                path: dotted.to_string(),
            })
    }

    fn value_at(&self, index: NodeIndex) -> Option<&Arc<A::Value>> {
        self.nodes[index.index()].value.as_ref()
    }

    fn accessor_at(&self, index: NodeIndex) -> Accessor<'_, A> {
        let view = NamespaceView {
            catalog: self,
            node: index,
        };
        match (self.tree.node(index).shape(), self.value_at(index)) {
            (NodeShape::Leaf, Some(value)) => Accessor::Leaf(value),
            (NodeShape::Ambiguous, Some(value)) => Accessor::Ambiguous { value, group: view },
            _ => Accessor::Group(view),
        }
    }
}

fn unique_type_name(base: String, taken: &mut BTreeSet<String>) -> String {
    let mut candidate = base.clone();
    let mut counter = 2;
    while !taken.insert(candidate.to_ascii_lowercase()) {
        candidate = format!("{}{}", base, counter);
        counter += 1;
    }
    candidate
}

/// What a child accessor yields
///
/// An ambiguous child keeps both facets: its own value and its group.
pub enum Accessor<'c, A: KindAdapter> {
    Leaf(&'c Arc<A::Value>),
    Group(NamespaceView<'c, A>),
    Ambiguous {
        value: &'c Arc<A::Value>,
        group: NamespaceView<'c, A>,
    },
}

impl<'c, A: KindAdapter> Accessor<'c, A> {
    /// The declaration value, for leaves and ambiguous nodes
    pub fn value(&self) -> Option<&'c Arc<A::Value>> {
        match self {
            Accessor::Leaf(value) | Accessor::Ambiguous { value, .. } => Some(*value),
            Accessor::Group(_) => None,
        }
    }

    /// The nested group, for groups and ambiguous nodes
    pub fn group(&self) -> Option<NamespaceView<'c, A>> {
        match self {
            Accessor::Group(group) | Accessor::Ambiguous { group, .. } => Some(*group),
            Accessor::Leaf(_) => None,
        }
    }

    pub fn shape(&self) -> NodeShape {
        match self {
            Accessor::Leaf(_) => NodeShape::Leaf,
            Accessor::Group(_) => NodeShape::Group,
            Accessor::Ambiguous { .. } => NodeShape::Ambiguous,
        }
    }
}

impl<A: KindAdapter> Clone for Accessor<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: KindAdapter> Copy for Accessor<'_, A> {}

impl<A: KindAdapter> PartialEq for Accessor<'_, A> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Accessor::Leaf(a), Accessor::Leaf(b)) => Arc::ptr_eq(a, b),
            (Accessor::Group(a), Accessor::Group(b)) => a == b,
            (
                Accessor::Ambiguous { value: a, group: ga },
                Accessor::Ambiguous { value: b, group: gb },
            ) => Arc::ptr_eq(a, b) && ga == gb,
            _ => false,
        }
    }
}

impl<A: KindAdapter> fmt::Debug for Accessor<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Leaf(value) => f.debug_tuple("Leaf").field(value).finish(),
            Accessor::Group(group) => f.debug_tuple("Group").field(group).finish(),
            Accessor::Ambiguous { value, group } => f
                .debug_struct("Ambiguous")
                .field("value", value)
                .field("group", group)
                .finish(),
        }
    }
}

/// A group node of the catalog, borrowed from its owner
///
/// Views are handles into the catalog's cached accessors; two views of the
/// same node of the same catalog compare equal.
pub struct NamespaceView<'c, A: KindAdapter> {
    catalog: &'c KindCatalog<A>,
    node: NodeIndex,
}

impl<A: KindAdapter> Clone for NamespaceView<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: KindAdapter> Copy for NamespaceView<'_, A> {}

impl<A: KindAdapter> PartialEq for NamespaceView<'_, A> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.catalog, other.catalog) && self.node == other.node
    }
}

impl<A: KindAdapter> Eq for NamespaceView<'_, A> {}

impl<A: KindAdapter> fmt::Debug for NamespaceView<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceView")
            .field("kind", &A::KIND)
            .field("path", &self.path())
            .finish()
    }
}

impl<'c, A: KindAdapter> NamespaceView<'c, A> {
    /// Raw dotted path of this group (empty at the root)
    pub fn path(&self) -> &'c str {
        self.catalog.tree.node(self.node).path()
    }

    pub fn is_root(&self) -> bool {
        self.node == self.catalog.tree.root()
    }

    /// Name of the accessor type of this group (`AndroidxUiLibraryAccessors`)
    pub fn type_name(&self) -> &'c str {
        self.catalog.nodes[self.node.index()]
            .type_name
            .as_deref()
            .unwrap_or_default()
    }

    /// The group's own declaration when it is ambiguous
    pub fn as_provider(&self) -> Option<&'c Arc<A::Value>> {
        self.catalog.value_at(self.node)
    }

    /// Description of the group's own declaration when it is ambiguous
    pub fn provider_description(&self) -> Option<&'c str> {
        self.catalog.nodes[self.node.index()].description.as_deref()
    }

    /// Child accessor by identifier or raw segment
    pub fn get(&self, name: &str) -> Option<Accessor<'c, A>> {
        self.catalog
            .tree
            .find_child(self.node, name)
            .map(|child| self.catalog.accessor_at(child))
    }

    /// Nested group by identifier or raw segment
    pub fn group(&self, name: &str) -> Result<NamespaceView<'c, A>, CatalogError> {
        let accessor = self.get(name).ok_or_else(|| self.not_found(name))?;
        accessor.group().ok_or_else(|| CatalogError::NotAGroup {
            kind: A::KIND,
            path: self.child_path(name),
        })
    }

    /// Declaration value of a child, including ambiguous children
    pub fn value(&self, name: &str) -> Result<&'c Arc<A::Value>, CatalogError> {
        let accessor = self.get(name).ok_or_else(|| self.not_found(name))?;
        accessor.value().ok_or_else(|| CatalogError::NotADeclaration {
            kind: A::KIND,
            path: self.child_path(name),
        })
    }

    /// Child accessors in identifier order
    pub fn members(&self) -> impl Iterator<Item = Member<'c, A>> + 'c {
        let catalog = self.catalog;
        catalog
            .tree
            .node(self.node)
            .children()
            .iter()
            .filter_map(move |child| {
                let node = catalog.tree.node(*child);
                Some(Member {
                    identifier: node.identifier()?,
                    alias: node.path(),
                    description: catalog.nodes[child.index()].description.as_deref(),
                    accessor: catalog.accessor_at(*child),
                })
            })
    }

    pub fn len(&self) -> usize {
        self.catalog.tree.node(self.node).children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn child_path(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}.{}", self.path(), name)
        }
    }

    fn not_found(&self, name: &str) -> CatalogError {
        CatalogError::LookupNotFound {
            kind: A::KIND,
            segment: name.to_string(),
            resolved: self.path().to_string(),
        }
    }
}

/// One child accessor of a group
pub struct Member<'c, A: KindAdapter> {
    pub identifier: &'c Identifier,
    /// Raw dotted path of the child
    pub alias: &'c str,
    /// Adapter description of the child's declaration, if it has one
    pub description: Option<&'c str>,
    pub accessor: Accessor<'c, A>,
}

impl<A: KindAdapter> Member<'_, A> {
    /// Getter name of this member (`getJunit`)
    pub fn method_name(&self) -> String {
        accessor_method_name(self.identifier)
    }
}
