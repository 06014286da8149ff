//! Command implementations behind the CLI.
//!
//! Each function takes already-parsed inputs and returns what the binary
//! prints or writes, so they can be exercised without a process.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rulebook_core::markdown::ensure_placeholders_resolved;
use rulebook_core::models::*;
use rulebook_core::store::url_codec;
use rulebook_core::{SelectionStore, StrategyKind, Taxonomy};

use crate::collection::Collection;
use crate::config::Config;

/// Where the selection for a command comes from. Applied in field order:
/// the collection becomes the baseline, the query replaces the current
/// selection, then listed libraries are added.
#[derive(Debug, Clone, Default)]
pub struct SelectionInput {
    pub collection: Option<Collection>,
    pub query: Option<String>,
    pub libraries: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub project: ProjectContext,
    pub strategy: StrategyKind,
    pub target: OutputTarget,
    pub strict_placeholders: bool,
}

pub fn load_taxonomy(path: Option<&Path>) -> Result<Arc<Taxonomy>> {
    let taxonomy = match path {
        Some(path) => Taxonomy::from_path(path)
            .with_context(|| format!("Failed to load taxonomy from {}", path.display()))?,
        None => Taxonomy::builtin().context("Built-in taxonomy is inconsistent")?,
    };
    Ok(Arc::new(taxonomy))
}

pub fn build_store(taxonomy: Arc<Taxonomy>, input: &SelectionInput) -> Result<SelectionStore> {
    let mut store = SelectionStore::new(taxonomy);

    if let Some(collection) = &input.collection {
        store.load_original(collection.libraries.iter().cloned());
    }
    if let Some(query) = &input.query {
        store.apply_query(query);
    }
    for id in &input.libraries {
        if !store.is_library_selected(id) {
            store.toggle_library(id)?;
        }
    }

    Ok(store)
}

/// Project context from explicit values, falling back to the collection.
pub fn project_context(
    name: Option<String>,
    description: Option<String>,
    collection: Option<&Collection>,
) -> ProjectContext {
    let name = name
        .or_else(|| collection.map(|c| c.name.clone()))
        .unwrap_or_default();
    let description = description
        .or_else(|| collection.and_then(|c| c.description.clone()))
        .unwrap_or_default();
    ProjectContext::new(name, description)
}

pub fn generate(store: &SelectionStore, options: &GenerateOptions) -> Result<Vec<RulesContent>> {
    let strategy = options.strategy.strategy(options.target);
    let contents = store.generate(strategy.as_ref(), &options.project)?;

    if options.strict_placeholders {
        ensure_placeholders_resolved(&contents)?;
    }

    tracing::info!(
        strategy = %options.strategy,
        target = %options.target,
        documents = contents.len(),
        "Generated rules"
    );
    Ok(contents)
}

pub fn encode(taxonomy: &Taxonomy, libraries: &[String]) -> Result<String> {
    let ids = libraries
        .iter()
        .map(|id| taxonomy.library(id).map(|library| library.id.clone()))
        .collect::<rulebook_core::Result<Vec<_>>>()?;
    Ok(url_codec::encode_selection(taxonomy, &ids))
}

pub fn decode(taxonomy: &Taxonomy, query: &str) -> Vec<LibraryId> {
    url_codec::decode_selection(taxonomy, query)
}

/// Human-readable dirty-state summary.
pub fn status_report(store: &SelectionStore) -> String {
    if !store.is_dirty() {
        return "No unsaved changes\n".to_string();
    }

    let changes = store.changes();
    let mut report = String::from("Unsaved changes\n");
    for id in &changes.added {
        report.push_str(&format!("  + {}\n", id));
    }
    for id in &changes.removed {
        report.push_str(&format!("  - {}\n", id));
    }
    report
}

/// Effective configuration as pretty JSON, in the config file format.
pub fn render_config(config: &Config) -> Result<String> {
    let mut json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    json.push('\n');
    Ok(json)
}
