//! Template rendering engine.
//!
//! Rendering walks a template's messages in order, substitutes `{{name}}`
//! placeholders in every user text message and joins the results with a
//! blank line. Placeholders without a matching argument are left as-is.

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::LazyLock;

use super::models::Template;

/// Argument map passed to a render call.
pub type Arguments = Map<String, Value>;

/// `{{identifier}}` where the identifier is ASCII alphanumerics or `_`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Valid placeholder regex")
});

/// Render the template with the given arguments.
///
/// This never fails: unknown arguments are ignored and missing ones leave
/// their placeholder untouched.
pub fn render(template: &Template, arguments: &Arguments) -> String {
    let bodies: Vec<String> = template
        .messages
        .iter()
        .filter(|message| message.is_renderable())
        .map(|message| substitute(&message.content.text, arguments))
        .collect();

    bodies.join("\n\n").trim().to_string()
}

/// Replace every `{{identifier}}` in `text` that has a value in `arguments`.
fn substitute(text: &str, arguments: &Arguments) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match arguments.get(&caps[1]) {
            Some(value) => display_value(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// String form of an argument value.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
