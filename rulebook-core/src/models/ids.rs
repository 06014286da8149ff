use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Returns true if `id` is a lowercase, dash-separated slug (`react-query`).
///
/// Identifiers double as file name components, so `_`, `.`, `/` and
/// uppercase letters are rejected.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

macro_rules! taxonomy_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

taxonomy_id!(
    /// Identifier of a [`Layer`](super::Layer), e.g. `frontend`.
    LayerId
);
taxonomy_id!(
    /// Identifier of a [`Stack`](super::Stack), e.g. `react`.
    StackId
);
taxonomy_id!(
    /// Identifier of a [`Library`](super::Library), e.g. `react-query`.
    LibraryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dash_separated_slugs() {
        assert!(is_valid_id("react"));
        assert!(is_valid_id("react-query"));
        assert!(is_valid_id("es2022"));
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("React"));
        assert!(!is_valid_id("react_query"));
        assert!(!is_valid_id("react--query"));
        assert!(!is_valid_id("-react"));
        assert!(!is_valid_id("../etc"));
    }
}
