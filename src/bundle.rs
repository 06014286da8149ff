//! Flat rules bundle for offline lookup.
//!
//! `export` renders every library in the taxonomy as a standalone document
//! and writes them to one JSON file keyed by library id. The consumer only
//! ever reads the file and looks entries up by key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rulebook_core::models::*;
use rulebook_core::strategy::library_rules_content;
use rulebook_core::{iterate_layers_stacks_libraries, SelectionGroups, Taxonomy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub layer: LayerId,
    pub stack: StackId,
    #[serde(flatten)]
    pub content: RulesContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesBundle {
    pub generated_at: DateTime<Utc>,
    pub target: OutputTarget,
    /// Entries keyed by library id, sorted for stable output.
    pub rules: BTreeMap<String, BundleEntry>,
}

impl RulesBundle {
    /// Render every library of `taxonomy`.
    ///
    /// No project context is applied: placeholders stay in the text for the
    /// consumer to fill.
    pub fn build(taxonomy: &Taxonomy, target: OutputTarget) -> rulebook_core::Result<Self> {
        let all = SelectionGroups::build(taxonomy, taxonomy.libraries().iter().map(|l| &l.id))?;
        let mut rules = BTreeMap::new();

        iterate_layers_stacks_libraries(taxonomy, &all, |layer, stack, library| {
            rules.insert(
                library.id.to_string(),
                BundleEntry {
                    layer: layer.id.clone(),
                    stack: stack.id.clone(),
                    content: library_rules_content(layer, stack, library, None, target),
                },
            );
        })?;

        tracing::debug!(entries = rules.len(), "Built rules bundle");

        Ok(Self {
            generated_at: Utc::now(),
            target,
            rules,
        })
    }

    pub fn lookup(&self, key: &str) -> Option<&RulesContent> {
        self.rules.get(key).map(|entry| &entry.content)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create bundle directory")?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize bundle")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write bundle {}", path.display()))?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read bundle {}", path.display()))?;
        serde_json::from_str(&json).context("Failed to parse bundle")
    }
}
