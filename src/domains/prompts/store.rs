//! Template store.
//!
//! The store owns every loaded template. A load decodes and validates the
//! definitions into a fresh map and swaps it in under one exclusive lock, so
//! readers see either the previous generation or the new one, never a mix.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::PromptError;
use super::models::Template;
use super::source::RawDefinition;

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadReport {
    /// Number of templates now in the store.
    pub count: usize,

    /// Definitions that were skipped, with the reason.
    pub warnings: Vec<PromptError>,

    /// Generation number of the freshly loaded set.
    pub generation: u64,
}

/// Store statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub total_prompts: usize,
    pub generation: u64,
    /// Argument count -> number of templates with that many arguments.
    pub argument_distribution: BTreeMap<usize, usize>,
}

#[derive(Debug, Default)]
struct Snapshot {
    generation: u64,
    templates: HashMap<String, Arc<Template>>,
}

/// Thread-safe, atomically replaceable set of templates.
#[derive(Debug, Default)]
pub struct TemplateStore {
    inner: RwLock<Snapshot>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole store with the given definitions.
    ///
    /// Invalid definitions and duplicate names are skipped and reported as
    /// warnings; the first definition seen for a name wins.
    pub fn load(&self, definitions: Vec<RawDefinition>) -> LoadReport {
        let mut templates: HashMap<String, Arc<Template>> = HashMap::new();
        let mut warnings = Vec::new();

        for raw in definitions {
            let template = match raw.decode() {
                Ok(t) => t,
                Err(e) => {
                    warn!("Warning: {}", e);
                    warnings.push(e);
                    continue;
                }
            };

            if let Err(e) = template.validate(&raw.origin) {
                warn!("Warning: {}", e);
                warnings.push(e);
                continue;
            }

            if templates.contains_key(&template.name) {
                let e = PromptError::duplicate(&template.name, &raw.origin);
                warn!("Warning: {}", e);
                warnings.push(e);
                continue;
            }

            templates.insert(template.name.clone(), Arc::new(template));
        }

        let count = templates.len();
        let generation = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.templates = templates;
            inner.generation
        };

        info!(
            "Loaded {} prompts (generation {}, {} skipped)",
            count,
            generation,
            warnings.len()
        );

        LoadReport {
            count,
            warnings,
            generation,
        }
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> Option<Arc<Template>> {
        self.inner.read().templates.get(name).cloned()
    }

    /// All templates, in no particular order.
    pub fn list(&self) -> Vec<Arc<Template>> {
        self.inner.read().templates.values().cloned().collect()
    }

    /// All template names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.inner.read().templates.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every template.
    pub fn clear(&self) {
        self.inner.write().templates.clear();
    }

    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.read();
        let mut argument_distribution = BTreeMap::new();
        for template in inner.templates.values() {
            *argument_distribution
                .entry(template.arguments.len())
                .or_insert(0) += 1;
        }

        StoreStats {
            total_prompts: inner.templates.len(),
            generation: inner.generation,
            argument_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::models::Content;
    use crate::domains::prompts::source::DefinitionFormat;
    use crate::domains::prompts::templates::render;

    fn json_def(origin: &str, body: &str) -> RawDefinition {
        RawDefinition::new(origin, DefinitionFormat::Json, body)
    }

    fn valid(name: &str, text: &str) -> String {
        serde_json::json!({
            "name": name,
            "messages": [{"role": "user", "content": {"type": "text", "text": text}}]
        })
        .to_string()
    }

    #[test]
    fn test_load_valid_definitions() {
        let store = TemplateStore::new();
        let report = store.load(vec![
            json_def("a.json", &valid("a", "A")),
            json_def("b.json", &valid("b", "B")),
        ]);

        assert_eq!(report.count, 2);
        assert!(report.warnings.is_empty());
        assert_eq!(store.len(), 2);
        assert!(store.get("a").is_some());

        let mut names = store.names();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let store = TemplateStore::new();
        let report = store.load(vec![
            json_def("first.json", &valid("dup", "first")),
            json_def("second.json", &valid("dup", "second")),
            json_def("other.json", &valid("other", "x")),
        ]);

        assert_eq!(report.count, 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(report.warnings[0], PromptError::Duplicate { .. }));
        assert_eq!(store.get("dup").unwrap().messages[0].content.text, "first");
    }

    #[test]
    fn test_invalid_definitions_skipped() {
        let store = TemplateStore::new();
        let no_messages = r#"{"name":"empty","messages":[]}"#;
        let no_user =
            r#"{"name":"sys","messages":[{"role":"system","content":{"type":"text","text":"x"}}]}"#;

        let report = store.load(vec![
            json_def("empty.json", no_messages),
            json_def("sys.json", no_user),
            json_def("broken.json", "{"),
            json_def("ok.json", &valid("ok", "fine")),
        ]);

        assert_eq!(report.count, 1);
        assert_eq!(report.warnings.len(), 3);
        assert!(store.get("empty").is_none());
        assert!(store.get("sys").is_none());
        assert!(store.get("ok").is_some());
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let store = TemplateStore::new();
        let yaml = r#"name: partial
arguments:
  - description: no name given
  - name: who
messages:
  - role: system
  - content:
      type: text
      text: orphan
  - role: user
    content:
      type: text
      text: "Hi {{who}}"
"#;

        let report = store.load(vec![RawDefinition::new(
            "partial.yaml",
            DefinitionFormat::Yaml,
            yaml,
        )]);

        assert_eq!(report.count, 1);
        assert!(report.warnings.is_empty());

        let template = store.get("partial").unwrap();
        assert_eq!(template.arguments[0].name, "");
        assert_eq!(template.messages[0].content, Content::default());
        assert_eq!(template.messages[1].role, "");

        let args = serde_json::json!({"who": "Ann"}).as_object().cloned().unwrap();
        assert_eq!(render(&template, &args), "Hi Ann");
    }

    #[test]
    fn test_load_replaces_wholesale() {
        let store = TemplateStore::new();
        store.load(vec![json_def("a.json", &valid("a", "A"))]);
        let report = store.load(vec![json_def("b.json", &valid("b", "B"))]);

        assert_eq!(report.generation, 2);
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
    }

    #[test]
    fn test_clear_and_stats() {
        let store = TemplateStore::new();
        let with_args = serde_json::json!({
            "name": "args",
            "arguments": [{"name": "x"}, {"name": "y", "required": true}],
            "messages": [{"role": "user", "content": {"type": "text", "text": "{{x}}"}}]
        })
        .to_string();
        store.load(vec![
            json_def("a.json", &valid("a", "A")),
            json_def("args.json", &with_args),
        ]);

        let stats = store.stats();
        assert_eq!(stats.total_prompts, 2);
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.argument_distribution.get(&0), Some(&1));
        assert_eq!(stats.argument_distribution.get(&2), Some(&1));

        store.clear();
        assert!(store.is_empty());
    }
}
