//! Rule generation and selection state for Rulebook.
//!
//! A user picks libraries from a fixed Layer → Stack → Library
//! [`taxonomy`]. The [`store`] tracks that selection, encodes it for URLs
//! and compares it with a saved baseline. A [`strategy`] turns the grouped
//! selection into one or more markdown rules documents.

pub mod error;
pub mod markdown;
pub mod models;
pub mod selection;
pub mod store;
pub mod strategy;
pub mod taxonomy;

pub use error::{EntityKind, Error, Result};
pub use selection::{iterate_layers_stacks_libraries, SelectionGroups};
pub use store::{SelectionChanges, SelectionStore};
pub use strategy::{generate_rules, MultiFileStrategy, RulesStrategy, SingleFileStrategy, StrategyKind};
pub use taxonomy::Taxonomy;
