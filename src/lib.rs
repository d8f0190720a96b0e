//! stash library - household inventory kept in a single JSON file.
//!
//! This library exposes the core of the `stash` CLI for use in tests and
//! other front ends.
//!
//! # Modules
//!
//! - `store`: rooms → storages → items, with add/clear operations
//! - `query`: item search (first match or all matches) and statistics
//! - `persist`: loading, repairing and saving the inventory file
//! - `backup`: exporting a copy of the inventory
//! - `config`: settings file and data file resolution
//! - `error`: error types with user-recoverable hints
//! - `output`: output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod persist;
pub mod prompt;
pub mod query;
pub mod store;
pub mod theme;
