//! Identifier derivation for namespace nodes.
//!
//! Raw alias segments (`activity-compose`, `tensorflow_lite`, `Material3`) are
//! turned into camelCase identifiers that are valid bare names in any accessor
//! syntax. Two sibling segments mapping to the same identifier are never
//! renamed apart; the [`IdentifierAllocator`] reports them as a collision.
//!
//! Sibling uniqueness is case-insensitive: `jUnit` and `junit` collide.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::declaration::DeclarationKind;
use crate::error::CoreError;

/// Canonical accessor name of a namespace node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key used for case-insensitive sibling comparison
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// The identifier with its first letter uppercased (`ui` -> `Ui`)
    pub fn capitalized(&self) -> String {
        capitalize(&self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw segment into camelCase
///
/// Returns `None` when the segment has no letters or digits at all.
///
/// # Examples
/// ```
/// use vercat_core::naming::normalize_segment;
/// assert_eq!(normalize_segment("activity-compose").as_deref(), Some("activityCompose"));
/// assert_eq!(normalize_segment("tensorflow_lite_gpu").as_deref(), Some("tensorflowLiteGpu"));
/// assert_eq!(normalize_segment("myName").as_deref(), Some("myName"));
/// assert_eq!(normalize_segment("Material3").as_deref(), Some("material3"));
/// assert_eq!(normalize_segment("2d").as_deref(), Some("v2d"));
/// assert_eq!(normalize_segment("--"), None);
/// ```
pub fn normalize_segment(raw: &str) -> Option<String> {
    let mut words = raw.split(['-', '_']).filter(|w| !w.is_empty());

    let mut result = match words.next() {
        None => return None,
        Some(first) => decapitalize(first),
    };
    for word in words {
        result.push_str(&capitalize(word));
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, 'v');
    }

    Some(result)
}

/// Uppercase the first character, leaving the rest untouched
///
/// # Examples
/// ```
/// use vercat_core::naming::capitalize;
/// assert_eq!(capitalize("androidx"), "Androidx");
/// assert_eq!(capitalize("lifecycleRuntime"), "LifecycleRuntime");
/// ```
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Getter-style accessor name for an identifier (`junit` -> `getJunit`)
pub fn accessor_method_name(identifier: &Identifier) -> String {
    format!("get{}", identifier.capitalized())
}

/// Allocates identifiers for one set of siblings
///
/// Feed raw segments in sorted order so that collision reports do not depend
/// on the order declarations arrived in.
#[derive(Debug)]
pub struct IdentifierAllocator<'a> {
    kind: DeclarationKind,
    parent: &'a str,
    /// lowercase identifier -> raw segment that claimed it
    allocated: BTreeMap<String, String>,
}

impl<'a> IdentifierAllocator<'a> {
    /// `parent` is the dotted path of the node whose children are allocated
    pub fn new(kind: DeclarationKind, parent: &'a str) -> Self {
        Self {
            kind,
            parent,
            allocated: BTreeMap::new(),
        }
    }

    pub fn allocate(&mut self, raw: &str) -> Result<Identifier, CoreError> {
        let identifier = normalize_segment(raw).ok_or_else(|| CoreError::InvalidName {
            kind: self.kind,
            name: raw.to_string(),
            reason: "segment has no letters or digits".to_string(),
        })?;
        let key = identifier.to_ascii_lowercase();

        if let Some(existing) = self.allocated.get(&key) {
            let (first, second) = if existing.as_str() <= raw {
                (existing.clone(), raw.to_string())
            } else {
                (raw.to_string(), existing.clone())
            };
            return Err(CoreError::NamingCollision {
                kind: self.kind,
                parent: display_parent(self.parent).to_string(),
                first,
                second,
                identifier,
            });
        }

        tracing::debug!(
            "allocated identifier {} for segment '{}' under {}",
            identifier,
            raw,
            display_parent(self.parent)
        );
        self.allocated.insert(key, raw.to_string());
        Ok(Identifier(identifier))
    }

    pub fn len(&self) -> usize {
        self.allocated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }
}

fn display_parent(parent: &str) -> &str {
    if parent.is_empty() {
        "<root>"
    } else {
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_segment() {
        assert_eq!(normalize_segment("junit").as_deref(), Some("junit"));
        assert_eq!(normalize_segment("junit4").as_deref(), Some("junit4"));
        assert_eq!(normalize_segment("my-name").as_deref(), Some("myName"));
        assert_eq!(normalize_segment("my_name").as_deref(), Some("myName"));
        assert_eq!(normalize_segment("myName").as_deref(), Some("myName"));
        assert_eq!(normalize_segment("-leading").as_deref(), Some("leading"));
        assert_eq!(normalize_segment("a--b").as_deref(), Some("aB"));
        assert_eq!(normalize_segment("JUnit").as_deref(), Some("jUnit"));
        assert_eq!(normalize_segment("3d-engine").as_deref(), Some("v3dEngine"));
        assert_eq!(normalize_segment("_"), None);
    }

    #[test]
    fn test_accessor_method_name() {
        let mut alloc = IdentifierAllocator::new(DeclarationKind::Library, "");
        let id = alloc.allocate("core-ktx").unwrap();
        assert_eq!(id.as_str(), "coreKtx");
        assert_eq!(accessor_method_name(&id), "getCoreKtx");
    }

    #[test]
    fn test_allocator_distinct_siblings() {
        let mut alloc = IdentifierAllocator::new(DeclarationKind::Library, "androidx");
        for raw in ["activity", "camera", "compose", "ui"] {
            alloc.allocate(raw).unwrap();
        }
        assert_eq!(alloc.len(), 4);
    }

    #[test]
    fn test_allocator_collision_names_both_segments() {
        let mut alloc = IdentifierAllocator::new(DeclarationKind::Library, "androidx");
        alloc.allocate("my-name").unwrap();
        let err = alloc.allocate("myName").unwrap_err();
        assert_eq!(
            err,
            CoreError::NamingCollision {
                kind: DeclarationKind::Library,
                parent: "androidx".to_string(),
                first: "my-name".to_string(),
                second: "myName".to_string(),
                identifier: "myName".to_string(),
            }
        );
    }

    #[test]
    fn test_allocator_collision_is_case_insensitive() {
        let mut alloc = IdentifierAllocator::new(DeclarationKind::Version, "");
        alloc.allocate("junit").unwrap();
        let err = alloc.allocate("JUnit").unwrap_err();
        match err {
            CoreError::NamingCollision { parent, first, second, .. } => {
                assert_eq!(parent, "<root>");
                assert_eq!(first, "JUnit");
                assert_eq!(second, "junit");
            }
            other => panic!("Expected NamingCollision, got {:?}", other),
        }
    }
}
