//! Domain models for Rulebook.
//!
//! # Core Concepts
//!
//! ## Catalog Entities
//!
//! These come from the taxonomy data source and never change at runtime:
//!
//! - [`Layer`]: Top-level technology category (frontend, backend, ...).
//! - [`Stack`]: Technology grouping nested under exactly one layer.
//! - [`Library`]: Selectable tool nested under exactly one stack, carrying
//!   the rule fragments that end up in generated documents.
//!
//! ## Generation Values
//!
//! - [`ProjectContext`]: Caller-supplied name and description substituted
//!   into rule templates.
//! - [`RulesContent`]: One generated markdown document with its label and
//!   file name. Produced fresh per generation request.
//! - [`OutputTarget`]: The AI environment whose file conventions are used.

mod ids;
mod rules;
mod target;
mod taxonomy;

pub use ids::*;
pub use rules::*;
pub use target::*;
pub use taxonomy::*;
