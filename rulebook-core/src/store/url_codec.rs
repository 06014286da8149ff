//! Selection ↔ URL query string.
//!
//! A selection is written as one `libraries` parameter holding the ids in
//! taxonomy order, comma-joined: `libraries=react-query%2Czustand`.

use std::collections::HashSet;

use url::{form_urlencoded, Url};

use crate::models::LibraryId;
use crate::taxonomy::Taxonomy;

pub const SELECTION_PARAM: &str = "libraries";

const SEPARATOR: &str = ",";

/// Encode a selection as a query string. Empty selections encode to `""`.
///
/// Ids are ordered by taxonomy position so equal sets encode identically.
pub fn encode_selection<'a, I>(taxonomy: &Taxonomy, selection: I) -> String
where
    I: IntoIterator<Item = &'a LibraryId>,
{
    let mut ids: Vec<&LibraryId> = selection
        .into_iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    if ids.is_empty() {
        return String::new();
    }
    ids.sort_by(|a, b| {
        let pa = taxonomy.library_position(a.as_str()).unwrap_or(usize::MAX);
        let pb = taxonomy.library_position(b.as_str()).unwrap_or(usize::MAX);
        pa.cmp(&pb).then_with(|| a.cmp(b))
    });

    let value = ids
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    form_urlencoded::Serializer::new(String::new())
        .append_pair(SELECTION_PARAM, &value)
        .finish()
}

/// Decode a selection from a query string, a `?`-prefixed query, a router
/// path with a query, or a full URL. Fragments are ignored.
///
/// Ids the taxonomy does not know are dropped rather than reported, so links
/// keep working after libraries are renamed or removed. The result is in
/// taxonomy order without duplicates.
pub fn decode_selection(taxonomy: &Taxonomy, input: &str) -> Vec<LibraryId> {
    let input = input.trim();
    let query = match Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => relative_query(input).to_string(),
    };

    let mut seen = HashSet::new();
    let mut decoded = Vec::new();
    let mut dropped = Vec::new();

    let values = form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == SELECTION_PARAM)
        .map(|(_, value)| value.into_owned());

    for value in values {
        for raw in value.split(SEPARATOR).map(str::trim).filter(|s| !s.is_empty()) {
            if !taxonomy.contains_library(raw) {
                dropped.push(raw.to_string());
            } else if seen.insert(raw.to_string()) {
                decoded.push(LibraryId::from(raw));
            }
        }
    }

    if !dropped.is_empty() {
        tracing::warn!(?dropped, "Ignoring unknown libraries in selection query");
    }

    decoded.sort_by_key(|id| taxonomy.library_position(id.as_str()));
    decoded
}

/// Query part of something that is not an absolute URL: a bare query, a
/// `?query`, or a router path such as `/builder?libraries=a#top`.
fn relative_query(input: &str) -> &str {
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    match query.split_once('#') {
        Some((query, _)) => query,
        None => query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy::from_json(
            r#"{
                "layers": [{"id": "frontend", "name": "Frontend"}],
                "stacks": [{"id": "react", "name": "React", "layer": "frontend"}],
                "libraries": [
                    {"id": "react-query", "name": "React Query", "stack": "react", "rules": ["a"]},
                    {"id": "zustand", "name": "Zustand", "stack": "react", "rules": ["b"]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn encodes_in_taxonomy_order() {
        let taxonomy = taxonomy();
        let ids = vec![LibraryId::from("zustand"), LibraryId::from("react-query")];
        assert_eq!(
            encode_selection(&taxonomy, &ids),
            "libraries=react-query%2Czustand"
        );
    }

    #[test]
    fn empty_selection_encodes_to_empty_string() {
        assert_eq!(encode_selection(&taxonomy(), &Vec::<LibraryId>::new()), "");
        assert!(decode_selection(&taxonomy(), "").is_empty());
    }

    #[test]
    fn decodes_query_prefix_and_full_url() {
        let taxonomy = taxonomy();
        let expected = vec![LibraryId::from("react-query"), LibraryId::from("zustand")];
        assert_eq!(
            decode_selection(&taxonomy, "?libraries=zustand,react-query"),
            expected
        );
        assert_eq!(
            decode_selection(
                &taxonomy,
                "https://example.com/builder?tab=rules&libraries=react-query%2Czustand"
            ),
            expected
        );
    }

    #[test]
    fn decodes_router_paths_and_fragments() {
        let taxonomy = taxonomy();
        let expected = vec![LibraryId::from("zustand")];
        assert_eq!(decode_selection(&taxonomy, "/builder?libraries=zustand"), expected);
        assert_eq!(decode_selection(&taxonomy, "libraries=zustand#top"), expected);
        assert_eq!(decode_selection(&taxonomy, "?libraries=zustand#top"), expected);
        assert_eq!(
            decode_selection(&taxonomy, "/builder?tab=rules&libraries=zustand#top"),
            expected
        );
        assert_eq!(
            decode_selection(&taxonomy, "https://x.dev/?libraries=zustand#top"),
            expected
        );
        assert!(decode_selection(&taxonomy, "/builder").is_empty());
    }

    #[test]
    fn decodes_repeated_parameters() {
        let taxonomy = taxonomy();
        let decoded = decode_selection(&taxonomy, "libraries=zustand&libraries=zustand,react-query");
        assert_eq!(
            decoded,
            vec![LibraryId::from("react-query"), LibraryId::from("zustand")]
        );
    }

    #[test]
    fn drops_unknown_ids() {
        let taxonomy = taxonomy();
        let decoded = decode_selection(&taxonomy, "libraries=redux,zustand,,angular");
        assert_eq!(decoded, vec![LibraryId::from("zustand")]);
    }
}
