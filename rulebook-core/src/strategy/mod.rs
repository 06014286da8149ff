//! Generation strategies: turn a grouped selection into rules documents.
//!
//! Both strategies return the empty-project fallback when nothing is
//! selected, and otherwise follow taxonomy order so that identical
//! selections always produce identical output.

mod multi_file;
mod single_file;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use multi_file::{library_rules_content, MultiFileStrategy};
pub use single_file::SingleFileStrategy;

use crate::error::{Error, Result};
use crate::models::*;
use crate::selection::SelectionGroups;
use crate::taxonomy::Taxonomy;

/// The capability every generation strategy provides.
pub trait RulesStrategy {
    /// Generate documents for `selected_libraries`, grouped as in `groups`.
    ///
    /// The project summary, when a strategy emits one, is always first.
    fn generate_rules(
        &self,
        taxonomy: &Taxonomy,
        project: &ProjectContext,
        selected_libraries: &[LibraryId],
        groups: &SelectionGroups,
    ) -> Result<Vec<RulesContent>>;
}

/// Which strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Everything in one document.
    SingleFile,
    /// A project summary plus one document per library.
    #[default]
    MultiFile,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleFile => "single-file",
            Self::MultiFile => "multi-file",
        }
    }

    pub fn strategy(&self, target: OutputTarget) -> Box<dyn RulesStrategy> {
        match self {
            Self::SingleFile => Box::new(SingleFileStrategy::new(target)),
            Self::MultiFile => Box::new(MultiFileStrategy::new(target)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single-file" | "single" => Ok(Self::SingleFile),
            "multi-file" | "multi" => Ok(Self::MultiFile),
            _ => Err(Error::InvalidValue {
                what: "strategy",
                value: s.to_string(),
            }),
        }
    }
}

/// Group `selected_libraries` and run the chosen strategy over them.
pub fn generate_rules(
    taxonomy: &Taxonomy,
    project: &ProjectContext,
    selected_libraries: &[LibraryId],
    kind: StrategyKind,
    target: OutputTarget,
) -> Result<Vec<RulesContent>> {
    let groups = SelectionGroups::build(taxonomy, selected_libraries)?;
    kind.strategy(target)
        .generate_rules(taxonomy, project, selected_libraries, &groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_names() {
        assert_eq!("single-file".parse::<StrategyKind>().unwrap(), StrategyKind::SingleFile);
        assert_eq!("multi".parse::<StrategyKind>().unwrap(), StrategyKind::MultiFile);
        assert!("both".parse::<StrategyKind>().is_err());
    }
}
