//! Error types for catalog construction and lookups
//!
//! Construction errors come from the core tree builder and abort catalog
//! creation. Lookup errors are ordinary per-call failures; the catalog stays
//! usable after returning one.

use thiserror::Error;
use vercat_core::{CoreError, DeclarationKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("No {kind} accessor for segment '{segment}' under {}", location(.resolved))]
    LookupNotFound {
        kind: DeclarationKind,
        segment: String,
        /// The dotted prefix that did resolve
        resolved: String,
    },

    #[error("'{path}' is a {kind} group, not a declaration")]
    NotADeclaration { kind: DeclarationKind, path: String },

    #[error("'{path}' is a {kind} declaration, not a group")]
    NotAGroup { kind: DeclarationKind, path: String },

    #[error("Invalid catalog name '{name}': {reason}")]
    InvalidCatalogName { name: String, reason: String },
}

impl CatalogError {
    /// Lookup failures leave the catalog intact; everything else aborts a build
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            CatalogError::LookupNotFound { .. }
                | CatalogError::NotADeclaration { .. }
                | CatalogError::NotAGroup { .. }
        )
    }
}

fn location(resolved: &str) -> String {
    if resolved.is_empty() {
        "<root>".to_string()
    } else {
        format!("'{}'", resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_not_found_message() {
        let err = CatalogError::LookupNotFound {
            kind: DeclarationKind::Library,
            segment: "text".to_string(),
            resolved: "androidx.ui".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No library accessor for segment 'text' under 'androidx.ui'"
        );
        assert!(err.is_lookup());

        let err = CatalogError::LookupNotFound {
            kind: DeclarationKind::Plugin,
            segment: "kapt".to_string(),
            resolved: String::new(),
        };
        assert_eq!(err.to_string(), "No plugin accessor for segment 'kapt' under <root>");
    }

    #[test]
    fn test_core_errors_are_not_lookups() {
        let err: CatalogError = CoreError::DuplicateAlias {
            kind: DeclarationKind::Version,
            name: "agp".to_string(),
        }
        .into();
        assert!(!err.is_lookup());
        assert!(err.to_string().contains("Duplicate version alias 'agp'"));
    }

    #[test]
    fn test_invalid_catalog_name_is_not_a_lookup() {
        let err = CatalogError::InvalidCatalogName {
            name: "my.libs".to_string(),
            reason: "contains '.'".to_string(),
        };
        assert!(!err.is_lookup());
        assert_eq!(err.to_string(), "Invalid catalog name 'my.libs': contains '.'");
    }
}
