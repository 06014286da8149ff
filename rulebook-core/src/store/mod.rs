//! Client-side selection state.
//!
//! [`SelectionStore`] owns the current selection and the baseline it was
//! loaded from. Every mutation recomputes the derived groupings from the
//! taxonomy, so they can never drift from the raw selection.

pub mod url_codec;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::*;
use crate::selection::SelectionGroups;
use crate::strategy::RulesStrategy;
use crate::taxonomy::Taxonomy;

/// Set difference between the current selection and the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChanges {
    /// Selected now but not in the baseline, in taxonomy order.
    pub added: Vec<LibraryId>,
    /// In the baseline but no longer selected, in taxonomy order.
    pub removed: Vec<LibraryId>,
}

impl SelectionChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SelectionStore {
    taxonomy: Arc<Taxonomy>,
    selected_libraries: HashSet<LibraryId>,
    original_libraries: HashSet<LibraryId>,
    // Derived; rebuilt by `recompute` after every mutation.
    selected_stacks: HashSet<StackId>,
    selected_layers: HashSet<LayerId>,
    groups: SelectionGroups,
}

impl SelectionStore {
    /// An empty store with an empty baseline (a new, unsaved project).
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            selected_libraries: HashSet::new(),
            original_libraries: HashSet::new(),
            selected_stacks: HashSet::new(),
            selected_layers: HashSet::new(),
            groups: SelectionGroups::default(),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    // ============================================================
    // Mutations
    // ============================================================

    /// Flip a library's membership and return whether it is now selected.
    ///
    /// Its stack and layer become selected with it, and drop out once their
    /// last selected library is removed.
    pub fn toggle_library(&mut self, id: &str) -> Result<bool> {
        let library = self.taxonomy.library(id)?;
        let selected = if self.selected_libraries.remove(id) {
            false
        } else {
            self.selected_libraries.insert(library.id.clone());
            true
        };
        self.recompute();
        Ok(selected)
    }

    /// Deselect everything. The baseline is kept.
    pub fn clear(&mut self) {
        self.selected_libraries.clear();
        self.recompute();
    }

    /// Replace both the current selection and the baseline, as when a saved
    /// collection is opened. Unknown ids are dropped from both.
    pub fn load_original<I>(&mut self, libraries: I)
    where
        I: IntoIterator<Item = LibraryId>,
    {
        let libraries = self.known_only(libraries);
        self.original_libraries = libraries.clone();
        self.selected_libraries = libraries;
        self.recompute();
    }

    /// Replace the current selection with the one encoded in `query`.
    ///
    /// The baseline is untouched, so opening a shared link on top of a saved
    /// collection shows up as unsaved changes.
    pub fn apply_query(&mut self, query: &str) {
        let decoded = url_codec::decode_selection(&self.taxonomy, query);
        self.selected_libraries = decoded.into_iter().collect();
        self.recompute();
    }

    fn known_only<I>(&self, libraries: I) -> HashSet<LibraryId>
    where
        I: IntoIterator<Item = LibraryId>,
    {
        let (known, stale): (HashSet<_>, HashSet<_>) = libraries
            .into_iter()
            .partition(|id| self.taxonomy.contains_library(id.as_str()));
        if !stale.is_empty() {
            tracing::warn!(?stale, "Dropping libraries missing from the taxonomy");
        }
        known
    }

    fn recompute(&mut self) {
        let selected = &self.selected_libraries;
        self.groups = SelectionGroups::collect(&self.taxonomy, |id| selected.contains(id));
        self.selected_layers = self
            .groups
            .stacks_by_layer()
            .iter()
            .map(|(layer, _)| layer.clone())
            .collect();
        self.selected_stacks = self.groups.libraries_by_stack().keys().cloned().collect();
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn is_layer_selected(&self, id: &str) -> bool {
        self.selected_layers.contains(id)
    }

    pub fn is_stack_selected(&self, id: &str) -> bool {
        self.selected_stacks.contains(id)
    }

    pub fn is_library_selected(&self, id: &str) -> bool {
        self.selected_libraries.contains(id)
    }

    /// True when the selected set differs from the baseline. Order and
    /// toggle history are irrelevant.
    pub fn is_dirty(&self) -> bool {
        self.selected_libraries != self.original_libraries
    }

    pub fn changes(&self) -> SelectionChanges {
        SelectionChanges {
            added: self.ordered(self.selected_libraries.difference(&self.original_libraries)),
            removed: self.ordered(self.original_libraries.difference(&self.selected_libraries)),
        }
    }

    /// Current selection in taxonomy order, as a collection would save it.
    pub fn selected_libraries(&self) -> Vec<LibraryId> {
        self.ordered(self.selected_libraries.iter())
    }

    pub fn original_libraries(&self) -> Vec<LibraryId> {
        self.ordered(self.original_libraries.iter())
    }

    pub fn groups(&self) -> &SelectionGroups {
        &self.groups
    }

    fn ordered<'a>(&self, ids: impl Iterator<Item = &'a LibraryId>) -> Vec<LibraryId> {
        let mut ids: Vec<LibraryId> = ids.cloned().collect();
        ids.sort_by_key(|id| self.taxonomy.library_position(id.as_str()));
        ids
    }

    // ============================================================
    // Boundaries
    // ============================================================

    /// The current selection as a URL query string.
    pub fn to_query(&self) -> String {
        url_codec::encode_selection(&self.taxonomy, &self.selected_libraries)
    }

    /// Run a generation strategy over the current selection.
    pub fn generate(
        &self,
        strategy: &dyn RulesStrategy,
        project: &ProjectContext,
    ) -> Result<Vec<RulesContent>> {
        strategy.generate_rules(
            &self.taxonomy,
            project,
            &self.selected_libraries(),
            &self.groups,
        )
    }
}
