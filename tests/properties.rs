//! Property-based tests for selection and generation invariants.
//!
//! - Round-trip: decode(encode(s)) == s
//! - Order independence: generation ignores selection order
//! - Dirty-state law: toggling twice restores the dirty flag

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::{select, subsequence};
use rulebook_core::models::*;
use rulebook_core::store::url_codec;
use rulebook_core::*;

fn library_ids() -> Vec<String> {
    Taxonomy::builtin()
        .expect("Built-in taxonomy should load")
        .libraries()
        .iter()
        .map(|l| l.id.to_string())
        .collect()
}

/// A subset of the built-in libraries in shuffled order.
fn selection() -> impl Strategy<Value = Vec<LibraryId>> {
    let all = library_ids();
    let len = all.len();
    subsequence(all, 0..=len)
        .prop_shuffle()
        .prop_map(|ids| ids.into_iter().map(LibraryId::from).collect())
}

fn as_set(ids: &[LibraryId]) -> BTreeSet<LibraryId> {
    ids.iter().cloned().collect()
}

proptest! {
    #[test]
    fn codec_round_trips(selection in selection()) {
        let taxonomy = Taxonomy::builtin().unwrap();
        let encoded = url_codec::encode_selection(&taxonomy, &selection);
        let decoded = url_codec::decode_selection(&taxonomy, &encoded);
        prop_assert_eq!(as_set(&decoded), as_set(&selection));
    }

    #[test]
    fn generation_ignores_selection_order(selection in selection()) {
        let taxonomy = Taxonomy::builtin().unwrap();
        let project = ProjectContext::new("Acme", "Demo");
        let mut reversed = selection.clone();
        reversed.reverse();

        for kind in [StrategyKind::SingleFile, StrategyKind::MultiFile] {
            let a = generate_rules(&taxonomy, &project, &selection, kind, OutputTarget::Cursor).unwrap();
            let b = generate_rules(&taxonomy, &project, &reversed, kind, OutputTarget::Cursor).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn multi_file_names_are_unique(selection in selection()) {
        let taxonomy = Taxonomy::builtin().unwrap();
        let contents = generate_rules(
            &taxonomy,
            &ProjectContext::default(),
            &selection,
            StrategyKind::MultiFile,
            OutputTarget::Generic,
        ).unwrap();

        let names: BTreeSet<_> = contents.iter().map(|c| c.file_name.clone()).collect();
        prop_assert_eq!(names.len(), contents.len());
        if !selection.is_empty() {
            prop_assert_eq!(contents.len(), selection.len() + 1);
        }
    }

    #[test]
    fn double_toggle_restores_dirty_flag(
        original in selection(),
        toggled in select(library_ids()),
    ) {
        let mut store = SelectionStore::new(Arc::new(Taxonomy::builtin().unwrap()));
        store.load_original(original);
        prop_assert!(!store.is_dirty());

        store.toggle_library(&toggled).unwrap();
        prop_assert!(store.is_dirty());

        store.toggle_library(&toggled).unwrap();
        prop_assert!(!store.is_dirty());
    }
}
