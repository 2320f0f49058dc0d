//! Memoized accessor catalogs over version catalog namespace trees

pub mod adapter;
pub mod catalog;
pub mod config;
pub mod error;
pub mod plan;
pub mod version_catalog;

pub use adapter::{
    BundleNotation, Bundles, DependencyNotation, KindAdapter, Libraries, PluginNotation, Plugins,
    Versions,
};
pub use catalog::{Accessor, KindCatalog, Member, NamespaceView, PROVIDER_ACCESSOR};
pub use config::CatalogOptions;
pub use error::CatalogError;
pub use plan::{CatalogPlan, GroupPlan, KindPlan, LeafPlan};
pub use version_catalog::{Resolved, VersionCatalog};
