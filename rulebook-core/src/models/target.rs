use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The AI environment whose file conventions generated documents follow.
///
/// File names returned here are bare names. Install directories are only
/// applied by whoever writes the documents to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// Plain markdown, no tool-specific layout.
    #[default]
    Generic,
    /// Cursor project rules (`.cursor/rules/*.mdc`).
    Cursor,
    /// GitHub Copilot custom instructions.
    Copilot,
    /// Windsurf rules.
    Windsurf,
}

impl OutputTarget {
    pub const ALL: [OutputTarget; 4] = [Self::Generic, Self::Cursor, Self::Copilot, Self::Windsurf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Cursor => "cursor",
            Self::Copilot => "copilot",
            Self::Windsurf => "windsurf",
        }
    }

    /// File name of the document produced by the single-file strategy.
    pub fn single_file_name(&self) -> &'static str {
        match self {
            Self::Generic => "rules.md",
            Self::Cursor => "rules.mdc",
            Self::Copilot => "copilot-instructions.md",
            Self::Windsurf => ".windsurfrules",
        }
    }

    /// File name of the project summary document.
    pub fn project_file_name(&self) -> &'static str {
        match self {
            Self::Generic | Self::Windsurf => "project.md",
            Self::Cursor => "project.mdc",
            Self::Copilot => "project.instructions.md",
        }
    }

    /// Extension appended to per-library file names, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Generic | Self::Windsurf => "md",
            Self::Cursor => "mdc",
            Self::Copilot => "instructions.md",
        }
    }

    /// Directory, relative to the project root, for a single-file document.
    pub fn single_file_dir(&self) -> &'static str {
        match self {
            Self::Generic | Self::Windsurf => "",
            Self::Cursor => ".cursor/rules",
            Self::Copilot => ".github",
        }
    }

    /// Directory, relative to the project root, for multi-file documents.
    pub fn multi_file_dir(&self) -> &'static str {
        match self {
            Self::Generic => "",
            Self::Cursor => ".cursor/rules",
            Self::Copilot => ".github/instructions",
            Self::Windsurf => ".windsurf/rules",
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| Error::InvalidValue {
                what: "output target",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_target_from_its_name() {
        for target in OutputTarget::ALL {
            assert_eq!(target.as_str().parse::<OutputTarget>().unwrap(), target);
        }
    }

    #[test]
    fn rejects_unknown_target() {
        assert!(matches!(
            "vim".parse::<OutputTarget>(),
            Err(Error::InvalidValue { what: "output target", .. })
        ));
    }

    #[test]
    fn file_names_have_no_path_separators() {
        for target in OutputTarget::ALL {
            assert!(!target.single_file_name().contains('/'));
            assert!(!target.project_file_name().contains('/'));
        }
    }
}
