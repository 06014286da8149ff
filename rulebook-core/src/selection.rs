//! Selection groupings and the ordered traversal both strategies share.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::models::*;
use crate::taxonomy::Taxonomy;

/// Layers with at least one selected library, each with its non-empty
/// stacks, in declared order.
pub type StacksByLayer = Vec<(LayerId, Vec<StackId>)>;

/// Selected libraries per stack, in declared order.
pub type LibrariesByStack = HashMap<StackId, Vec<LibraryId>>;

/// Derived views of a selection.
///
/// Only constructible from a taxonomy walk, so layer, stack and library
/// order always match the taxonomy no matter how the selection was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionGroups {
    stacks_by_layer: StacksByLayer,
    libraries_by_stack: LibrariesByStack,
}

impl SelectionGroups {
    /// Group a raw selection. Every id must exist in the taxonomy.
    pub fn build<'a, I>(taxonomy: &Taxonomy, selected: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LibraryId>,
    {
        let mut ids = HashSet::new();
        for id in selected {
            taxonomy.library(id.as_str())?;
            ids.insert(id.as_str());
        }
        Ok(Self::collect(taxonomy, |id| ids.contains(id.as_str())))
    }

    /// Walk the taxonomy and keep the libraries `is_selected` accepts.
    pub(crate) fn collect(taxonomy: &Taxonomy, is_selected: impl Fn(&LibraryId) -> bool) -> Self {
        let mut stacks_by_layer = Vec::new();
        let mut libraries_by_stack = HashMap::new();

        for (layer_pos, layer) in taxonomy.layers().iter().enumerate() {
            let mut stacks = Vec::new();
            for (stack_pos, stack) in taxonomy.stacks_at(layer_pos) {
                let libraries: Vec<LibraryId> = taxonomy
                    .libraries_at(stack_pos)
                    .filter(|l| is_selected(&l.id))
                    .map(|l| l.id.clone())
                    .collect();
                if !libraries.is_empty() {
                    stacks.push(stack.id.clone());
                    libraries_by_stack.insert(stack.id.clone(), libraries);
                }
            }
            if !stacks.is_empty() {
                stacks_by_layer.push((layer.id.clone(), stacks));
            }
        }

        Self {
            stacks_by_layer,
            libraries_by_stack,
        }
    }

    pub fn stacks_by_layer(&self) -> &StacksByLayer {
        &self.stacks_by_layer
    }

    pub fn libraries_by_stack(&self) -> &LibrariesByStack {
        &self.libraries_by_stack
    }

    pub fn stacks_for_layer(&self, layer_id: &str) -> &[StackId] {
        self.stacks_by_layer
            .iter()
            .find(|(layer, _)| layer.as_str() == layer_id)
            .map(|(_, stacks)| stacks.as_slice())
            .unwrap_or_default()
    }

    pub fn libraries_for_stack(&self, stack_id: &str) -> &[LibraryId] {
        self.libraries_by_stack
            .get(stack_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks_by_layer.is_empty()
    }

    /// Number of libraries in the grouping.
    pub fn len(&self) -> usize {
        self.libraries_by_stack.values().map(Vec::len).sum()
    }
}

/// Visit every grouped library once, layer by layer then stack by stack.
///
/// The callback receives the resolved layer, stack and library. Ids that do
/// not resolve against `taxonomy` abort the walk with `NotFound`.
pub fn iterate_layers_stacks_libraries<F>(
    taxonomy: &Taxonomy,
    groups: &SelectionGroups,
    mut on_library: F,
) -> Result<()>
where
    F: FnMut(&Layer, &Stack, &Library),
{
    for (layer_id, stacks) in groups.stacks_by_layer() {
        let layer = taxonomy.layer(layer_id.as_str())?;
        for stack_id in stacks {
            let stack = taxonomy.stack(stack_id.as_str())?;
            for library_id in groups.libraries_for_stack(stack_id.as_str()) {
                let library = taxonomy.library(library_id.as_str())?;
                on_library(layer, stack, library);
            }
        }
    }
    Ok(())
}
