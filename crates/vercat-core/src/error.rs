use thiserror::Error;

use crate::declaration::DeclarationKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid {kind} alias '{name}': {reason}")]
    InvalidName {
        kind: DeclarationKind,
        name: String,
        reason: String,
    },

    #[error("Duplicate {kind} alias '{name}': two declarations share this dotted name")]
    DuplicateAlias { kind: DeclarationKind, name: String },

    #[error(
        "Naming collision in {kind} namespace '{parent}': segments '{first}' and '{second}' both map to identifier '{identifier}'"
    )]
    NamingCollision {
        kind: DeclarationKind,
        parent: String,
        first: String,
        second: String,
        identifier: String,
    },
}

impl CoreError {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            CoreError::InvalidName { kind, .. }
            | CoreError::DuplicateAlias { kind, .. }
            | CoreError::NamingCollision { kind, .. } => *kind,
        }
    }
}
