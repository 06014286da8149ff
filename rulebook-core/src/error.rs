use std::fmt;

use thiserror::Error;

/// The kind of taxonomy entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Layer,
    Stack,
    Library,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Layer => "layer",
            Self::Stack => "stack",
            Self::Library => "library",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("duplicate {kind} identifier: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("{kind} '{id}' references unknown {parent_kind} '{parent}'")]
    DanglingParent {
        kind: EntityKind,
        id: String,
        parent_kind: EntityKind,
        parent: String,
    },

    #[error("invalid {kind} identifier '{id}': expected lowercase letters and digits separated by '-'")]
    InvalidId { kind: EntityKind, id: String },

    #[error("library '{id}' has no rule fragments")]
    EmptyRules { id: String },

    #[error("failed to parse taxonomy: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read taxonomy: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown {what}: {value}")]
    InvalidValue { what: &'static str, value: String },

    #[error("{file_name} has unresolved placeholders: {}", .placeholders.join(", "))]
    UnresolvedPlaceholders {
        file_name: String,
        placeholders: Vec<String>,
    },
}

impl Error {
    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
