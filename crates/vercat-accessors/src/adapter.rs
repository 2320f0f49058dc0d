//! Kind adapters: turn a declaration payload into the value consumers see
//!
//! An adapter carries no tree logic. It picks its payload variant out of a
//! [`Payload`], maps it to a value, and describes it for the naming plan.

use std::fmt;

use serde::Serialize;
use vercat_core::{
    BundleMembers, DeclarationKind, LibraryCoordinate, Payload, PluginSpec, VersionConstraint,
};

/// Common trait for the four declaration kinds
pub trait KindAdapter: Send + Sync + 'static {
    const KIND: DeclarationKind;

    /// Suffix of generated group type names (`AndroidxUiLibraryAccessors`)
    const TYPE_SUFFIX: &'static str;

    type Payload;
    type Value: fmt::Debug + Send + Sync;

    /// The payload of this kind, if `payload` is one
    fn payload(payload: &Payload) -> Option<&Self::Payload>;

    fn adapt(alias: &str, payload: &Self::Payload) -> Self::Value;

    /// One-line description of the accessor for `alias`
    fn describe(alias: &str, payload: &Self::Payload) -> String;
}

/// A library alias ready to be added as a dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNotation {
    pub alias: String,
    pub group: String,
    pub artifact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Version alias this library points at; not resolved here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_ref: Option<String>,
}

impl DependencyNotation {
    /// `group:artifact`
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for DependencyNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleNotation {
    pub alias: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginNotation {
    pub alias: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl fmt::Display for PluginNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}", self.id, version),
            None => f.write_str(&self.id),
        }
    }
}

/// The single version string of a constraint
///
/// A rich constraint that has no single-string form (rejections, or
/// conflicting required/strictly/prefer values) displays as the empty string.
pub fn display_version(constraint: &VersionConstraint) -> String {
    if !constraint.reject.is_empty() {
        return String::new();
    }

    let mut candidates: Vec<&str> = [&constraint.strictly, &constraint.required, &constraint.prefer]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    match candidates.as_slice() {
        [single] => single.to_string(),
        _ => String::new(),
    }
}

fn last_segment(alias: &str) -> &str {
    alias.rsplit('.').next().unwrap_or(alias)
}

pub struct Libraries;

impl KindAdapter for Libraries {
    const KIND: DeclarationKind = DeclarationKind::Library;
    const TYPE_SUFFIX: &'static str = "LibraryAccessors";

    type Payload = LibraryCoordinate;
    type Value = DependencyNotation;

    fn payload(payload: &Payload) -> Option<&LibraryCoordinate> {
        match payload {
            Payload::Library(coordinate) => Some(coordinate),
            _ => None,
        }
    }

    fn adapt(alias: &str, coordinate: &LibraryCoordinate) -> DependencyNotation {
        DependencyNotation {
            alias: alias.to_string(),
            group: coordinate.group.clone(),
            artifact: coordinate.artifact.clone(),
            version: coordinate.version.clone(),
            version_ref: coordinate.version_ref.clone(),
        }
    }

    fn describe(alias: &str, coordinate: &LibraryCoordinate) -> String {
        format!(
            "Creates a dependency provider for {} ({}:{})",
            last_segment(alias),
            coordinate.group,
            coordinate.artifact
        )
    }
}

pub struct Versions;

impl KindAdapter for Versions {
    const KIND: DeclarationKind = DeclarationKind::Version;
    const TYPE_SUFFIX: &'static str = "VersionAccessors";

    type Payload = VersionConstraint;
    type Value = String;

    fn payload(payload: &Payload) -> Option<&VersionConstraint> {
        match payload {
            Payload::Version(constraint) => Some(constraint),
            _ => None,
        }
    }

    fn adapt(_alias: &str, constraint: &VersionConstraint) -> String {
        display_version(constraint)
    }

    fn describe(alias: &str, constraint: &VersionConstraint) -> String {
        format!(
            "Returns the version associated to this alias: {} ({})",
            alias,
            display_version(constraint)
        )
    }
}

pub struct Bundles;

impl KindAdapter for Bundles {
    const KIND: DeclarationKind = DeclarationKind::Bundle;
    const TYPE_SUFFIX: &'static str = "BundleAccessors";

    type Payload = BundleMembers;
    type Value = BundleNotation;

    fn payload(payload: &Payload) -> Option<&BundleMembers> {
        match payload {
            Payload::Bundle(members) => Some(members),
            _ => None,
        }
    }

    fn adapt(alias: &str, bundle: &BundleMembers) -> BundleNotation {
        BundleNotation {
            alias: alias.to_string(),
            members: bundle.members.clone(),
        }
    }

    fn describe(alias: &str, bundle: &BundleMembers) -> String {
        format!(
            "Creates a dependency bundle provider for {} which is an aggregate for the following dependencies: {}",
            alias,
            bundle.members.join(", ")
        )
    }
}

pub struct Plugins;

impl KindAdapter for Plugins {
    const KIND: DeclarationKind = DeclarationKind::Plugin;
    const TYPE_SUFFIX: &'static str = "PluginAccessors";

    type Payload = PluginSpec;
    type Value = PluginNotation;

    fn payload(payload: &Payload) -> Option<&PluginSpec> {
        match payload {
            Payload::Plugin(spec) => Some(spec),
            _ => None,
        }
    }

    fn adapt(alias: &str, spec: &PluginSpec) -> PluginNotation {
        PluginNotation {
            alias: alias.to_string(),
            id: spec.id.clone(),
            version: spec.version.clone(),
        }
    }

    fn describe(alias: &str, spec: &PluginSpec) -> String {
        format!(
            "Creates a plugin provider for {} to the plugin id '{}'",
            alias, spec.id
        )
    }
}
