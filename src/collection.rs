use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rulebook_core::models::LibraryId;
use serde::{Deserialize, Serialize};

/// A saved selection, as exported by the collections service.
///
/// Only the library ids matter to selection state; name and description
/// feed the project context when generating from a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub libraries: Vec<LibraryId>,
}

impl Collection {
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read collection {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse collection {}", path.display()))
    }
}
