use serde::{Deserialize, Serialize};

/// Project details supplied by the caller. Both fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub name: String,
    pub description: String,
}

impl ProjectContext {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One generated rules document.
///
/// `file_name` is unique within a single generation call and never contains
/// a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesContent {
    pub markdown: String,
    pub label: String,
    pub file_name: String,
}
