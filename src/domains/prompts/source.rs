//! Definition sources.
//!
//! A [`DefinitionSource`] supplies raw template definitions; decoding and
//! validation happen in the store. [`DirectorySource`] is the on-disk
//! implementation that reads `.yaml`, `.yml` and `.json` files from a
//! prompts directory.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::{debug, warn};

use super::error::PromptError;
use super::models::Template;

/// Serialization format of a raw definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Detect the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// An undecoded template definition.
#[derive(Debug, Clone)]
pub struct RawDefinition {
    /// Where the definition came from, used in warnings.
    pub origin: String,
    pub format: DefinitionFormat,
    pub content: String,
}

impl RawDefinition {
    pub fn new(
        origin: impl Into<String>,
        format: DefinitionFormat,
        content: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            format,
            content: content.into(),
        }
    }

    /// Decode the definition into a template without validating it.
    pub fn decode(&self) -> Result<Template, PromptError> {
        match self.format {
            DefinitionFormat::Json => serde_json::from_str(&self.content).map_err(|e| {
                PromptError::decode(&self.origin, format!("failed to parse JSON: {e}"))
            }),
            DefinitionFormat::Yaml => serde_yaml::from_str(&self.content).map_err(|e| {
                PromptError::decode(&self.origin, format!("failed to parse YAML: {e}"))
            }),
        }
    }
}

/// A supplier of raw template definitions.
pub trait DefinitionSource: Send + Sync {
    /// Enumerate all definitions.
    ///
    /// An error here means the source itself is unavailable and aborts the
    /// whole load.
    fn definitions(&self) -> Result<Vec<RawDefinition>, PromptError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// A cheap value that changes whenever the definitions may have changed.
    ///
    /// Sources that cannot detect changes return `None`.
    fn fingerprint(&self) -> Option<u64> {
        None
    }
}

/// Definition source backed by a prompts directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect eligible definition files below `dir`, sorted by path.
    ///
    /// Symlinked directories are not descended into.
    fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
        let mut entries = fs::read_dir(dir)?
            .map(|entry| {
                let entry = entry?;
                Ok((entry.path(), entry.file_type()?.is_dir()))
            })
            .collect::<std::io::Result<Vec<(PathBuf, bool)>>>()?;
        entries.sort();

        for (path, is_dir) in entries {
            if is_dir {
                Self::collect_files(&path, files)?;
            } else if DefinitionFormat::from_path(&path).is_some() {
                files.push(path);
            }
        }

        Ok(())
    }

    fn files(&self) -> Result<Vec<PathBuf>, PromptError> {
        let mut files = Vec::new();
        Self::collect_files(&self.root, &mut files).map_err(|e| {
            PromptError::source_unavailable(format!(
                "failed to walk prompts directory {}: {}",
                self.root.display(),
                e
            ))
        })?;
        Ok(files)
    }
}

impl DefinitionSource for DirectorySource {
    fn definitions(&self) -> Result<Vec<RawDefinition>, PromptError> {
        let mut definitions = Vec::new();

        for path in self.files()? {
            let Some(format) = DefinitionFormat::from_path(&path) else {
                continue;
            };

            match fs::read_to_string(&path) {
                Ok(content) => {
                    debug!("Read prompt file {}", path.display());
                    let origin = path.display().to_string();
                    definitions.push(RawDefinition::new(origin, format, content));
                }
                Err(e) => {
                    warn!("Failed to read prompt file {}: {}", path.display(), e);
                }
            }
        }

        Ok(definitions)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn fingerprint(&self) -> Option<u64> {
        let files = self.files().ok()?;
        let mut hasher = DefaultHasher::new();

        for path in files {
            path.hash(&mut hasher);
            if let Ok(meta) = fs::metadata(&path) {
                meta.len().hash(&mut hasher);
                let modified = meta
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_nanos());
                modified.hash(&mut hasher);
            }
        }

        Some(hasher.finish())
    }
}
