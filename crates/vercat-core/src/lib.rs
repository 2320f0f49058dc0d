//! Declarations, identifier allocation and namespace trees for version
//! catalog accessors

pub mod declaration;
pub mod error;
pub mod fingerprint;
pub mod naming;
pub mod tree;

pub use declaration::{
    BundleMembers, Declaration, DeclarationKind, DeclarationSet, DottedName, LibraryCoordinate,
    Payload, PluginSpec, VersionConstraint,
};
pub use error::CoreError;
pub use fingerprint::TreeFingerprint;
pub use naming::{Identifier, IdentifierAllocator};
pub use tree::{MissingSegment, NamespaceNode, NamespaceTree, NodeShape};

pub use petgraph::graph::NodeIndex;
