//! Catalog declarations and dotted-name validation
//!
//! A declaration is one catalog entry: a dotted alias (`androidx.ui.graphics`)
//! plus a kind-specific payload. The kind is the payload's variant, so a
//! library alias can never carry a plugin payload.
//!
//! Names arrive unvalidated from the external loader. [`DottedName::parse`]
//! checks them against the segment grammar `[A-Za-z0-9_-]+` before anything
//! is inserted into a tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The four independent declaration namespaces of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Library,
    Version,
    Bundle,
    Plugin,
}

impl DeclarationKind {
    pub const ALL: [DeclarationKind; 4] = [
        DeclarationKind::Library,
        DeclarationKind::Version,
        DeclarationKind::Bundle,
        DeclarationKind::Plugin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Library => "library",
            DeclarationKind::Version => "version",
            DeclarationKind::Bundle => "bundle",
            DeclarationKind::Plugin => "plugin",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind name is not one of the four catalog kinds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown declaration kind '{0}' (expected library, version, bundle or plugin)")]
pub struct UnknownKind(pub String);

impl FromStr for DeclarationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "library" | "libraries" => Ok(DeclarationKind::Library),
            "version" | "versions" => Ok(DeclarationKind::Version),
            "bundle" | "bundles" => Ok(DeclarationKind::Bundle),
            "plugin" | "plugins" => Ok(DeclarationKind::Plugin),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// Module coordinates of a library alias (`group:artifact[:version]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryCoordinate {
    pub group: String,
    pub artifact: String,
    /// Name of a version alias this library points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_ref: Option<String>,
    /// Inline version, when not using a reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A version constraint as declared in the catalog
///
/// Only the shape is recorded here; nothing interprets ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strictly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reject: Vec<String>,
}

impl VersionConstraint {
    pub fn required(version: impl Into<String>) -> Self {
        Self {
            required: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Library aliases grouped under one bundle alias
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMembers {
    pub members: Vec<String>,
}

/// A plugin id with an optional version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Kind-specific data carried by a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Payload {
    Library(LibraryCoordinate),
    Version(VersionConstraint),
    Bundle(BundleMembers),
    Plugin(PluginSpec),
}

impl Payload {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Payload::Library(_) => DeclarationKind::Library,
            Payload::Version(_) => DeclarationKind::Version,
            Payload::Bundle(_) => DeclarationKind::Bundle,
            Payload::Plugin(_) => DeclarationKind::Plugin,
        }
    }
}

/// One catalog entry, as handed over by the catalog loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// The raw dotted alias, validated when a tree is built
    pub name: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Declaration {
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    pub fn library(name: impl Into<String>, group: &str, artifact: &str) -> Self {
        Self::new(
            name,
            Payload::Library(LibraryCoordinate {
                group: group.to_string(),
                artifact: artifact.to_string(),
                version_ref: None,
                version: None,
            }),
        )
    }

    pub fn version(name: impl Into<String>, version: &str) -> Self {
        Self::new(name, Payload::Version(VersionConstraint::required(version)))
    }

    pub fn bundle<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            Payload::Bundle(BundleMembers {
                members: members.into_iter().map(Into::into).collect(),
            }),
        )
    }

    pub fn plugin(name: impl Into<String>, id: &str) -> Self {
        Self::new(
            name,
            Payload::Plugin(PluginSpec {
                id: id.to_string(),
                version: None,
            }),
        )
    }

    pub fn kind(&self) -> DeclarationKind {
        self.payload.kind()
    }
}

/// The ordered declaration set of one catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationSet {
    declarations: Vec<Declaration>,
}

impl DeclarationSet {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Declarations of one kind, in input order
    pub fn of_kind(&self, kind: DeclarationKind) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(move |d| d.kind() == kind)
    }
}

impl FromIterator<Declaration> for DeclarationSet {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A validated dotted alias split into its segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedName {
    original: String,
    segments: Vec<String>,
}

impl DottedName {
    /// Validate `raw` against `segment('.'segment)*`
    pub fn parse(kind: DeclarationKind, raw: &str) -> Result<Self, CoreError> {
        let invalid = |reason: String| CoreError::InvalidName {
            kind,
            name: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("name is empty".to_string()));
        }

        let mut segments = Vec::new();
        for (position, segment) in raw.split('.').enumerate() {
            if segment.is_empty() {
                return Err(invalid(format!("segment {} is empty", position + 1)));
            }
            if let Some(bad) = segment
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
            {
                return Err(invalid(format!(
                    "segment '{}' contains '{}' (allowed: letters, digits, '-', '_')",
                    segment, bad
                )));
            }
            if !segment.chars().any(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid(format!(
                    "segment '{}' has no letters or digits",
                    segment
                )));
            }
            segments.push(segment.to_string());
        }

        Ok(Self {
            original: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for DottedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
