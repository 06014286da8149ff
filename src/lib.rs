//! Offline tooling around `rulebook-core`: configuration, writing generated
//! rules to disk, bulk export and taxonomy listing.

pub mod bundle;
pub mod collection;
pub mod commands;
pub mod config;
pub mod output;
pub mod tree_render;
