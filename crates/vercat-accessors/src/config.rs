//! Catalog options

use serde::{Deserialize, Serialize};

/// How a catalog is named and where its declarations came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Accessor extension name (`libs` gives `LibrariesForLibs`)
    pub name: String,
    /// Label of the catalog source, quoted in accessor docs
    pub source: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            name: "libs".to_string(),
            source: "libs.versions.toml".to_string(),
        }
    }
}
