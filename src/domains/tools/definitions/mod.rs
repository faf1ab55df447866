//! Tool definitions module.
//!
//! Each kind of tool is defined in its own file:
//! - `prompt.rs` - tools derived from prompt templates
//! - `reload.rs` - the `reload_prompts` built-in
//! - `list_names.rs` - the `get_prompt_names` built-in

pub mod list_names;
pub mod prompt;
pub mod reload;

pub use list_names::GetPromptNamesTool;
pub use prompt::PromptTool;
pub use reload::ReloadPromptsTool;
