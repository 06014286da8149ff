use serde::{Deserialize, Serialize};

use super::ids::{LayerId, LibraryId, StackId};

/// A top-level technology category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    /// Display name used in layer headings.
    pub name: String,
}

/// A technology grouping that belongs to exactly one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub id: StackId,
    pub name: String,
    /// Parent layer.
    pub layer: LayerId,
}

/// A concrete tool or technology that belongs to exactly one stack.
///
/// Rule fragments are templates: `{{project_name}}` and
/// `{{project_description}}` are substituted at render time, anything else
/// in double braces is left as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: LibraryId,
    pub name: String,
    /// Parent stack.
    pub stack: StackId,
    pub rules: Vec<String>,
}

/// Raw taxonomy data as authored, before validation.
///
/// Each list is in declared order, which is the order generation follows.
/// Parents are referenced by id so a source file can be checked for
/// dangling references when it is loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomySource {
    pub layers: Vec<Layer>,
    pub stacks: Vec<Stack>,
    pub libraries: Vec<Library>,
}
