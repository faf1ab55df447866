//! Domains module containing business logic organized by bounded contexts.
//!
//! - `prompts`: prompt templates, their source, store and renderer
//! - `tools`: the tool registry and the tools built from templates

pub mod prompts;
pub mod tools;
