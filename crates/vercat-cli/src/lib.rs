//! Loading, configuration and rendering behind the `vercat` binary

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use vercat_accessors::{CatalogOptions, VersionCatalog};
use vercat_core::{DeclarationKind, DeclarationSet};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "vercat.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogOptions,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `explicit` if given, else `vercat.toml` in `dir` if it exists,
    /// else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            debug!("using config {}", candidate.display());
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply a catalog name given on the command line
    pub fn with_name(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.catalog.name = name;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Outline,
}

/// Read a JSON array of declarations
pub fn load_declarations(path: &Path) -> Result<DeclarationSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read declarations: {}", path.display()))?;
    let set: DeclarationSet = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse declarations: {}", path.display()))?;
    info!("loaded {} declarations from {}", set.len(), path.display());
    Ok(set)
}

pub fn build_catalog(config: &Config, set: &DeclarationSet) -> Result<VersionCatalog> {
    VersionCatalog::build(config.catalog.clone(), set)
        .with_context(|| format!("Failed to build catalog '{}'", config.catalog.name))
}

pub fn render_plan(catalog: &VersionCatalog, format: OutputFormat) -> Result<String> {
    let plan = catalog.plan();
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&plan).context("Failed to serialize naming plan")
        }
        OutputFormat::Outline => Ok(plan.outline()),
    }
}

pub fn render_resolved(
    catalog: &VersionCatalog,
    kind: DeclarationKind,
    name: &str,
) -> Result<String> {
    let resolved = catalog.resolve(kind, name)?;
    Ok(resolved.to_string())
}

/// One line per kind: kind, node and declaration counts, hash
pub fn render_fingerprints(catalog: &VersionCatalog) -> String {
    catalog
        .fingerprints()
        .iter()
        .map(|fp| {
            format!(
                "{:<8} {:>4} nodes {:>4} declarations {}",
                fp.kind.as_str(),
                fp.nodes,
                fp.declarations,
                fp.hash
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
