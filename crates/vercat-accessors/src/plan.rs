//! Naming plan: the accessor surface a catalog exposes
//!
//! The plan lists, for every group, its accessor type and getter, the
//! declarations it exposes directly, its nested groups, and for ambiguous
//! groups the `asProvider` self accessor. It is the abstract input a source
//! emitter would consume; nothing here renders target-language syntax.

use std::fmt::{self, Write as _};

use serde::Serialize;
use vercat_core::naming::capitalize;
use vercat_core::DeclarationKind;

use crate::adapter::KindAdapter;
use crate::catalog::{Accessor, NamespaceView, PROVIDER_ACCESSOR};
use crate::version_catalog::VersionCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPlan {
    pub name: String,
    pub source: String,
    pub type_name: String,
    pub kinds: Vec<KindPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindPlan {
    pub kind: DeclarationKind,
    /// Getter on the catalog type; libraries live on the catalog type itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,
    pub fingerprint: String,
    pub root: GroupPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPlan {
    pub path: String,
    pub type_name: String,
    /// Getter on the parent group; `None` for kind roots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// The group's own declaration, when it is ambiguous
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<LeafPlan>,
    pub leaves: Vec<LeafPlan>,
    pub groups: Vec<GroupPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafPlan {
    pub alias: String,
    pub method: String,
    pub docs: Vec<String>,
}

fn declared_noun(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Library => "dependency",
        DeclarationKind::Version => "version",
        DeclarationKind::Bundle => "bundle",
        DeclarationKind::Plugin => "plugin",
    }
}

fn kind_getter(kind: DeclarationKind) -> Option<String> {
    match kind {
        DeclarationKind::Library => None,
        other => Some(format!("get{}s", capitalize(other.as_str()))),
    }
}

struct PlanContext<'a> {
    footer: &'a str,
}

impl PlanContext<'_> {
    fn leaf(&self, alias: &str, method: String, description: Option<&str>) -> LeafPlan {
        let mut docs = Vec::new();
        if let Some(description) = description {
            docs.push(description.to_string());
        }
        docs.push(self.footer.to_string());
        LeafPlan {
            alias: alias.to_string(),
            method,
            docs,
        }
    }

    fn group<A: KindAdapter>(&self, view: NamespaceView<'_, A>, method: Option<String>) -> GroupPlan {
        let provider = view.as_provider().map(|_| {
            self.leaf(
                view.path(),
                PROVIDER_ACCESSOR.to_string(),
                view.provider_description(),
            )
        });

        let mut leaves = Vec::new();
        let mut groups = Vec::new();
        for member in view.members() {
            match member.accessor {
                Accessor::Leaf(_) => {
                    leaves.push(self.leaf(member.alias, member.method_name(), member.description))
                }
                Accessor::Group(nested) | Accessor::Ambiguous { group: nested, .. } => {
                    groups.push(self.group(nested, Some(member.method_name())))
                }
            }
        }

        GroupPlan {
            path: view.path().to_string(),
            type_name: view.type_name().to_string(),
            method,
            provider,
            leaves,
            groups,
        }
    }

    fn kind<A: KindAdapter>(catalog: &VersionCatalog, view: NamespaceView<'_, A>) -> KindPlan {
        let footer = format!(
            "This {} was declared in catalog {}",
            declared_noun(A::KIND),
            catalog.options().source
        );
        let context = PlanContext { footer: &footer };
        KindPlan {
            kind: A::KIND,
            accessor: kind_getter(A::KIND),
            fingerprint: catalog.tree(A::KIND).fingerprint().hash,
            root: context.group(view, None),
        }
    }
}

impl VersionCatalog {
    /// The full accessor surface of this catalog
    pub fn plan(&self) -> CatalogPlan {
        CatalogPlan {
            name: self.name().to_string(),
            source: self.options().source.clone(),
            type_name: self.libraries().type_name().to_string(),
            kinds: vec![
                PlanContext::kind(self, self.libraries()),
                PlanContext::kind(self, self.versions()),
                PlanContext::kind(self, self.bundles()),
                PlanContext::kind(self, self.plugins()),
            ],
        }
    }
}

impl CatalogPlan {
    /// Indented outline, one accessor per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_outline(&mut out);
        out
    }

    fn write_outline(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "{} ({})", self.type_name, self.name)?;
        for kind in &self.kinds {
            match &kind.accessor {
                Some(getter) => {
                    writeln!(out, "  {}(): {}", getter, kind.root.type_name)?;
                    write_group(out, &kind.root, 2)?;
                }
                None => write_group(out, &kind.root, 1)?,
            }
        }
        Ok(())
    }
}

fn write_group(out: &mut String, group: &GroupPlan, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    if let Some(provider) = &group.provider {
        writeln!(out, "{}{}() -> {}", indent, provider.method, provider.alias)?;
    }
    for leaf in &group.leaves {
        writeln!(out, "{}{}() -> {}", indent, leaf.method, leaf.alias)?;
    }
    for nested in &group.groups {
        let method = nested.method.as_deref().unwrap_or_default();
        writeln!(out, "{}{}(): {}", indent, method, nested.type_name)?;
        write_group(out, nested, depth + 1)?;
    }
    Ok(())
}

impl fmt::Display for CatalogPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogOptions;
    use pretty_assertions::assert_eq;
    use vercat_core::{Declaration, DeclarationSet};

    #[test]
    fn test_kind_getters() {
        assert_eq!(kind_getter(DeclarationKind::Library), None);
        assert_eq!(kind_getter(DeclarationKind::Version).as_deref(), Some("getVersions"));
        assert_eq!(kind_getter(DeclarationKind::Plugin).as_deref(), Some("getPlugins"));
    }

    #[test]
    fn test_outline() {
        let set = DeclarationSet::new(vec![
            Declaration::library("tensorflow.lite", "org.tensorflow", "tensorflow-lite"),
            Declaration::library("tensorflow.lite.gpu", "org.tensorflow", "tensorflow-lite-gpu"),
            Declaration::library("junit", "junit", "junit"),
            Declaration::version("agp", "8.3.1"),
            Declaration::plugin("androidLibrary", "com.android.library"),
        ]);
        let catalog = VersionCatalog::build(CatalogOptions::default(), &set).unwrap();

        let expected = "\
LibrariesForLibs (libs)
  getJunit() -> junit
  getTensorflow(): TensorflowLibraryAccessors
    getLite(): TensorflowLiteLibraryAccessors
      asProvider() -> tensorflow.lite
      getGpu() -> tensorflow.lite.gpu
  getVersions(): VersionAccessors
    getAgp() -> agp
  getBundles(): BundleAccessors
  getPlugins(): PluginAccessors
    getAndroidLibrary() -> androidLibrary
";
        assert_eq!(catalog.plan().outline(), expected);
    }

    #[test]
    fn test_leaf_docs() {
        let set = DeclarationSet::new(vec![Declaration::library("junit", "junit", "junit")]);
        let catalog = VersionCatalog::build(CatalogOptions::default(), &set).unwrap();
        let plan = catalog.plan();

        let junit = &plan.kinds[0].root.leaves[0];
        assert_eq!(
            junit.docs,
            vec![
                "Creates a dependency provider for junit (junit:junit)".to_string(),
                "This dependency was declared in catalog libs.versions.toml".to_string(),
            ]
        );
    }
}
