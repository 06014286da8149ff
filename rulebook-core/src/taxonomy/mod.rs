//! The static Layer → Stack → Library catalog.
//!
//! A [`Taxonomy`] is built once from a [`TaxonomySource`], validated, and then
//! only read. All lookups by identifier are hash lookups.

mod catalog;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{EntityKind, Error, Result};
use crate::models::*;

#[derive(Debug, Clone)]
pub struct Taxonomy {
    layers: Vec<Layer>,
    stacks: Vec<Stack>,
    libraries: Vec<Library>,
    layer_index: HashMap<LayerId, usize>,
    stack_index: HashMap<StackId, usize>,
    library_index: HashMap<LibraryId, usize>,
    /// Stack positions per layer position, in declared order.
    layer_stacks: Vec<Vec<usize>>,
    /// Library positions per stack position, in declared order.
    stack_libraries: Vec<Vec<usize>>,
    /// Traversal ordinal of each library (layer, then stack, then library).
    library_order: Vec<usize>,
}

impl Taxonomy {
    /// Validate a source and build the lookup indices.
    ///
    /// Fails on the first structural problem: a malformed or duplicate id, a
    /// stack or library whose parent does not exist, or a library without
    /// rule fragments.
    pub fn from_source(source: TaxonomySource) -> Result<Self> {
        let TaxonomySource {
            layers,
            stacks,
            libraries,
        } = source;

        let layer_index = index_ids(EntityKind::Layer, layers.iter().map(|l| &l.id))?;
        let stack_index = index_ids(EntityKind::Stack, stacks.iter().map(|s| &s.id))?;
        let library_index = index_ids(EntityKind::Library, libraries.iter().map(|l| &l.id))?;

        let mut layer_stacks = vec![Vec::new(); layers.len()];
        for (pos, stack) in stacks.iter().enumerate() {
            let parent = layer_index
                .get(&stack.layer)
                .ok_or_else(|| Error::DanglingParent {
                    kind: EntityKind::Stack,
                    id: stack.id.to_string(),
                    parent_kind: EntityKind::Layer,
                    parent: stack.layer.to_string(),
                })?;
            layer_stacks[*parent].push(pos);
        }

        let mut stack_libraries = vec![Vec::new(); stacks.len()];
        for (pos, library) in libraries.iter().enumerate() {
            let parent = stack_index
                .get(&library.stack)
                .ok_or_else(|| Error::DanglingParent {
                    kind: EntityKind::Library,
                    id: library.id.to_string(),
                    parent_kind: EntityKind::Stack,
                    parent: library.stack.to_string(),
                })?;
            if library.rules.is_empty() {
                return Err(Error::EmptyRules {
                    id: library.id.to_string(),
                });
            }
            stack_libraries[*parent].push(pos);
        }

        let mut library_order = vec![0; libraries.len()];
        let traversal = layer_stacks
            .iter()
            .flatten()
            .flat_map(|stack| stack_libraries[*stack].iter());
        for (ordinal, library) in traversal.enumerate() {
            library_order[*library] = ordinal;
        }

        tracing::debug!(
            layers = layers.len(),
            stacks = stacks.len(),
            libraries = libraries.len(),
            "Loaded taxonomy"
        );

        Ok(Self {
            layers,
            stacks,
            libraries,
            layer_index,
            stack_index,
            library_index,
            layer_stacks,
            stack_libraries,
            library_order,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let source: TaxonomySource = serde_json::from_str(json)?;
        Self::from_source(source)
    }

    /// Load a taxonomy from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The catalog embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_source(catalog::builtin_source())
    }

    // ============================================================
    // Declared-order listings
    // ============================================================

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    // ============================================================
    // Lookups
    // ============================================================

    pub fn layer(&self, id: &str) -> Result<&Layer> {
        self.layer_index
            .get(id)
            .map(|pos| &self.layers[*pos])
            .ok_or_else(|| Error::not_found(EntityKind::Layer, id))
    }

    pub fn stack(&self, id: &str) -> Result<&Stack> {
        self.stack_index
            .get(id)
            .map(|pos| &self.stacks[*pos])
            .ok_or_else(|| Error::not_found(EntityKind::Stack, id))
    }

    pub fn library(&self, id: &str) -> Result<&Library> {
        self.library_index
            .get(id)
            .map(move |pos| &self.libraries[*pos])
            .ok_or_else(|| Error::not_found(EntityKind::Library, id))
    }

    pub fn contains_library(&self, id: &str) -> bool {
        self.library_index.contains_key(id)
    }

    pub fn layer_of_stack(&self, stack_id: &str) -> Result<&Layer> {
        let stack = self.stack(stack_id)?;
        self.layer(stack.layer.as_str())
    }

    pub fn stack_of_library(&self, library_id: &str) -> Result<&Stack> {
        let library = self.library(library_id)?;
        self.stack(library.stack.as_str())
    }

    pub fn layer_of_library(&self, library_id: &str) -> Result<&Layer> {
        let stack = self.stack_of_library(library_id)?;
        self.layer(stack.layer.as_str())
    }

    /// Stacks of a layer in declared order.
    pub fn stacks_in_layer(&self, layer_id: &str) -> Result<Vec<&Stack>> {
        let pos = self
            .layer_index
            .get(layer_id)
            .ok_or_else(|| Error::not_found(EntityKind::Layer, layer_id))?;
        Ok(self.stacks_at(*pos).map(|(_, stack)| stack).collect())
    }

    /// Libraries of a stack in declared order.
    pub fn libraries_in_stack(&self, stack_id: &str) -> Result<Vec<&Library>> {
        let pos = self
            .stack_index
            .get(stack_id)
            .ok_or_else(|| Error::not_found(EntityKind::Stack, stack_id))?;
        Ok(self.libraries_at(*pos).collect())
    }

    /// Stacks of the layer at `layer_pos` with their own positions, in
    /// declared order.
    pub(crate) fn stacks_at(&self, layer_pos: usize) -> impl Iterator<Item = (usize, &Stack)> {
        self.layer_stacks[layer_pos]
            .iter()
            .map(move |pos| (*pos, &self.stacks[*pos]))
    }

    /// Libraries of the stack at `stack_pos`, in declared order.
    pub(crate) fn libraries_at(&self, stack_pos: usize) -> impl Iterator<Item = &Library> {
        self.stack_libraries[stack_pos]
            .iter()
            .map(move |pos| &self.libraries[*pos])
    }

    /// Position of a library in traversal order (layer, stack, library).
    pub fn library_position(&self, id: &str) -> Option<usize> {
        self.library_index
            .get(id)
            .map(|pos| self.library_order[*pos])
    }

    /// Libraries whose id or display name contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Library> {
        let needle = query.trim().to_lowercase();
        let mut found: Vec<&Library> = self
            .libraries
            .iter()
            .filter(|library| {
                needle.is_empty()
                    || library.id.as_str().contains(&needle)
                    || library.name.to_lowercase().contains(&needle)
            })
            .collect();
        found.sort_by_key(|library| self.library_position(library.id.as_str()));
        found
    }
}

fn index_ids<'a, T>(
    kind: EntityKind,
    ids: impl Iterator<Item = &'a T>,
) -> Result<HashMap<T, usize>>
where
    T: AsRef<str> + Clone + Eq + std::hash::Hash + 'a,
{
    let mut index = HashMap::new();
    for (pos, id) in ids.enumerate() {
        if !is_valid_id(id.as_ref()) {
            return Err(Error::InvalidId {
                kind,
                id: id.as_ref().to_string(),
            });
        }
        if index.insert(id.clone(), pos).is_some() {
            return Err(Error::DuplicateId {
                kind,
                id: id.as_ref().to_string(),
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(id: &str) -> Layer {
        Layer {
            id: id.into(),
            name: id.to_uppercase(),
        }
    }

    fn stack(id: &str, layer: &str) -> Stack {
        Stack {
            id: id.into(),
            name: id.to_uppercase(),
            layer: layer.into(),
        }
    }

    fn library(id: &str, stack: &str) -> Library {
        Library {
            id: id.into(),
            name: id.to_uppercase(),
            stack: stack.into(),
            rules: vec![format!("Use {id} well")],
        }
    }

    fn source() -> TaxonomySource {
        TaxonomySource {
            layers: vec![layer("frontend"), layer("backend")],
            stacks: vec![stack("express", "backend"), stack("react", "frontend")],
            libraries: vec![
                library("zustand", "react"),
                library("helmet", "express"),
                library("react-query", "react"),
            ],
        }
    }

    #[test]
    fn resolves_parents() {
        let taxonomy = Taxonomy::from_source(source()).unwrap();
        assert_eq!(taxonomy.stack_of_library("zustand").unwrap().id.as_str(), "react");
        assert_eq!(taxonomy.layer_of_library("helmet").unwrap().id.as_str(), "backend");
        assert_eq!(taxonomy.layer_of_stack("react").unwrap().id.as_str(), "frontend");
    }

    #[test]
    fn children_follow_declared_order() {
        let taxonomy = Taxonomy::from_source(source()).unwrap();
        let libraries: Vec<_> = taxonomy
            .libraries_in_stack("react")
            .unwrap()
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(libraries, vec!["zustand", "react-query"]);
    }

    #[test]
    fn positions_follow_layer_then_stack_order() {
        let taxonomy = Taxonomy::from_source(source()).unwrap();
        assert_eq!(taxonomy.library_position("zustand"), Some(0));
        assert_eq!(taxonomy.library_position("react-query"), Some(1));
        assert_eq!(taxonomy.library_position("helmet"), Some(2));
        assert_eq!(taxonomy.library_position("unknown"), None);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let taxonomy = Taxonomy::from_source(source()).unwrap();
        assert!(matches!(
            taxonomy.library("angular"),
            Err(Error::NotFound { kind: EntityKind::Library, .. })
        ));
        assert!(matches!(
            taxonomy.stacks_in_layer("mobile"),
            Err(Error::NotFound { kind: EntityKind::Layer, .. })
        ));
    }

    #[test]
    fn rejects_dangling_stack() {
        let mut src = source();
        src.stacks.push(stack("flutter", "mobile"));
        assert!(matches!(
            Taxonomy::from_source(src),
            Err(Error::DanglingParent { kind: EntityKind::Stack, .. })
        ));
    }

    #[test]
    fn rejects_dangling_library() {
        let mut src = source();
        src.libraries.push(library("pinia", "vue"));
        assert!(matches!(
            Taxonomy::from_source(src),
            Err(Error::DanglingParent { kind: EntityKind::Library, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_library() {
        let mut src = source();
        src.libraries.push(library("zustand", "express"));
        assert!(matches!(
            Taxonomy::from_source(src),
            Err(Error::DuplicateId { kind: EntityKind::Library, .. })
        ));
    }

    #[test]
    fn rejects_library_without_rules() {
        let mut src = source();
        src.libraries[0].rules.clear();
        assert!(matches!(Taxonomy::from_source(src), Err(Error::EmptyRules { .. })));
    }

    #[test]
    fn rejects_unsafe_ids() {
        let mut src = source();
        src.layers.push(layer("dev_ops"));
        assert!(matches!(
            Taxonomy::from_source(src),
            Err(Error::InvalidId { kind: EntityKind::Layer, .. })
        ));
    }

    #[test]
    fn search_matches_id_and_name() {
        let taxonomy = Taxonomy::from_source(source()).unwrap();
        let found: Vec<_> = taxonomy.search("Query").iter().map(|l| l.id.as_str()).collect();
        assert_eq!(found, vec!["react-query"]);
        assert_eq!(taxonomy.search("").len(), 3);
    }

    #[test]
    fn builtin_catalog_is_consistent() {
        let taxonomy = Taxonomy::builtin().unwrap();
        assert!(!taxonomy.libraries().is_empty());
        for library in taxonomy.libraries() {
            assert!(taxonomy.layer_of_library(library.id.as_str()).is_ok());
        }
    }
}
