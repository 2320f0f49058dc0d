//! The complete catalog: one accessor catalog per declaration kind
//!
//! The four trees are built independently from the same declaration set and
//! never reference each other. Library aliases may not start with the names
//! of the other three kinds, which the top-level catalog uses for its own
//! accessors (`libs.versions`, `libs.bundles`, `libs.plugins`).

use std::fmt;
use std::sync::Arc;

use tracing::info;
use vercat_core::naming::{capitalize, normalize_segment};
use vercat_core::{
    CoreError, DeclarationKind, DeclarationSet, DottedName, NamespaceTree, TreeFingerprint,
};

use crate::adapter::{
    BundleNotation, Bundles, DependencyNotation, KindAdapter, Libraries, PluginNotation, Plugins,
    Versions,
};
use crate::catalog::{KindCatalog, NamespaceView};
use crate::config::CatalogOptions;
use crate::error::CatalogError;

/// First segments library aliases cannot use
pub const RESERVED_LIBRARY_ROOTS: [&str; 3] = ["bundles", "plugins", "versions"];

#[derive(Debug)]
pub struct VersionCatalog {
    options: CatalogOptions,
    libraries: KindCatalog<Libraries>,
    versions: KindCatalog<Versions>,
    bundles: KindCatalog<Bundles>,
    plugins: KindCatalog<Plugins>,
}

/// A value returned by string-keyed resolution
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'c> {
    Library(&'c Arc<DependencyNotation>),
    Version(&'c Arc<String>),
    Bundle(&'c Arc<BundleNotation>),
    Plugin(&'c Arc<PluginNotation>),
}

impl Resolved<'_> {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Resolved::Library(_) => DeclarationKind::Library,
            Resolved::Version(_) => DeclarationKind::Version,
            Resolved::Bundle(_) => DeclarationKind::Bundle,
            Resolved::Plugin(_) => DeclarationKind::Plugin,
        }
    }
}

impl fmt::Display for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Library(notation) => write!(f, "{}", notation),
            Resolved::Version(version) => f.write_str(version),
            Resolved::Bundle(bundle) => write!(f, "[{}]", bundle.members.join(", ")),
            Resolved::Plugin(plugin) => write!(f, "{}", plugin),
        }
    }
}

impl VersionCatalog {
    /// Build every tree and materialize every accessor
    ///
    /// Any construction error aborts the whole build.
    pub fn build(options: CatalogOptions, set: &DeclarationSet) -> Result<Self, CatalogError> {
        let root_type = library_root_type(&options.name)?;
        check_reserved_roots(set)?;

        let libraries = KindCatalog::new(
            NamespaceTree::build(DeclarationKind::Library, set)?,
            &root_type,
        );
        let versions = KindCatalog::new(
            NamespaceTree::build(DeclarationKind::Version, set)?,
            Versions::TYPE_SUFFIX,
        );
        let bundles = KindCatalog::new(
            NamespaceTree::build(DeclarationKind::Bundle, set)?,
            Bundles::TYPE_SUFFIX,
        );
        let plugins = KindCatalog::new(
            NamespaceTree::build(DeclarationKind::Plugin, set)?,
            Plugins::TYPE_SUFFIX,
        );

        info!(
            "built catalog '{}': {} libraries, {} versions, {} bundles, {} plugins",
            options.name,
            libraries.tree().leaf_count(),
            versions.tree().leaf_count(),
            bundles.tree().leaf_count(),
            plugins.tree().leaf_count()
        );

        Ok(Self {
            options,
            libraries,
            versions,
            bundles,
            plugins,
        })
    }

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    pub fn libraries(&self) -> NamespaceView<'_, Libraries> {
        self.libraries.root()
    }

    pub fn versions(&self) -> NamespaceView<'_, Versions> {
        self.versions.root()
    }

    pub fn bundles(&self) -> NamespaceView<'_, Bundles> {
        self.bundles.root()
    }

    pub fn plugins(&self) -> NamespaceView<'_, Plugins> {
        self.plugins.root()
    }

    pub fn library_catalog(&self) -> &KindCatalog<Libraries> {
        &self.libraries
    }

    pub fn tree(&self, kind: DeclarationKind) -> &NamespaceTree {
        match kind {
            DeclarationKind::Library => self.libraries.tree(),
            DeclarationKind::Version => self.versions.tree(),
            DeclarationKind::Bundle => self.bundles.tree(),
            DeclarationKind::Plugin => self.plugins.tree(),
        }
    }

    /// Resolve a dotted alias of `kind` without going through views
    pub fn resolve(&self, kind: DeclarationKind, dotted: &str) -> Result<Resolved<'_>, CatalogError> {
        let resolved = match kind {
            DeclarationKind::Library => Resolved::Library(self.libraries.resolve(dotted)?),
            DeclarationKind::Version => Resolved::Version(self.versions.resolve(dotted)?),
            DeclarationKind::Bundle => Resolved::Bundle(self.bundles.resolve(dotted)?),
            DeclarationKind::Plugin => Resolved::Plugin(self.plugins.resolve(dotted)?),
        };
        Ok(resolved)
    }

    /// Fingerprints of the four trees, in kind order
    pub fn fingerprints(&self) -> Vec<TreeFingerprint> {
        DeclarationKind::ALL
            .iter()
            .map(|kind| self.tree(*kind).fingerprint())
            .collect()
    }
}

/// Type name of the catalog's root (`libs` -> `LibrariesForLibs`)
///
/// The name follows the grammar of a single alias segment.
fn library_root_type(catalog_name: &str) -> Result<String, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidCatalogName {
        name: catalog_name.to_string(),
        reason,
    };

    if catalog_name.is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    if let Some(bad) = catalog_name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(invalid(format!(
            "contains '{}' (allowed: letters, digits, '-', '_')",
            bad
        )));
    }
    let stem = normalize_segment(catalog_name)
        .ok_or_else(|| invalid("name has no letters or digits".to_string()))?;
    Ok(format!("LibrariesFor{}", capitalize(&stem)))
}

fn check_reserved_roots(set: &DeclarationSet) -> Result<(), CatalogError> {
    for declaration in set.of_kind(DeclarationKind::Library) {
        let name = DottedName::parse(DeclarationKind::Library, &declaration.name)?;
        let root = normalize_segment(name.first())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if RESERVED_LIBRARY_ROOTS.contains(&root.as_str()) {
            return Err(CoreError::InvalidName {
                kind: DeclarationKind::Library,
                name: declaration.name.clone(),
                reason: format!(
                    "'{}' is reserved for the catalog's {} accessors",
                    name.first(),
                    root
                ),
            }
            .into());
        }
    }
    Ok(())
}
