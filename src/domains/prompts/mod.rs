//! Prompts domain module.
//!
//! This module owns the prompt templates exposed by the server. Templates are
//! read from a definition source, validated, and kept in an atomically
//! replaceable store; each one becomes a callable tool.
//!
//! ## Architecture
//!
//! - `models.rs` - Template, argument and message types
//! - `source.rs` - Definition sources (the prompts directory)
//! - `store.rs` - Template store with whole-set replacement
//! - `templates.rs` - Placeholder rendering
//! - `watcher.rs` - Reload signals and the polling watcher

mod error;
pub mod models;
pub mod source;
mod store;
pub mod templates;
pub mod watcher;

pub use error::PromptError;
pub use models::{Argument, Content, Message, Template};
pub use source::{DefinitionFormat, DefinitionSource, DirectorySource, RawDefinition};
pub use store::{LoadReport, StoreStats, TemplateStore};
pub use templates::{Arguments, render};
pub use watcher::{PollingWatcher, ReloadNotifier, ReloadSignal};
