//! Server context and lifecycle.
//!
//! [`ServerContext`] owns the template store, the tool registry and the
//! definition source. `init` performs the first load, `watch` starts hot
//! reload, and `shutdown` stops the background tasks and releases state.

use parking_lot::Mutex;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::error::Result;
use crate::domains::prompts::{
    Arguments, DefinitionSource, PollingWatcher, ReloadNotifier, ReloadSignal, Template,
    TemplateStore,
};
use crate::domains::tools::definitions::{GetPromptNamesTool, PromptTool, ReloadPromptsTool};
use crate::domains::tools::{ReloadOutcome, Tool, ToolContext, ToolError, ToolRegistry};

const RELOAD_QUEUE_CAPACITY: usize = 8;

/// Shared state behind the protocol engine.
pub struct ServerContext {
    store: TemplateStore,
    registry: ToolRegistry,
    source: Arc<dyn DefinitionSource>,
    /// Serializes reloads triggered by the tool and by the watcher.
    reload_lock: Mutex<()>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ServerContext {
    /// Load every template from `source` and register the tools.
    ///
    /// Fails if the source cannot be enumerated.
    pub fn init(source: Arc<dyn DefinitionSource>) -> Result<Arc<Self>> {
        let context = Self {
            store: TemplateStore::new(),
            registry: ToolRegistry::with_builtins()?,
            source,
            reload_lock: Mutex::new(()),
            tasks: Mutex::new(Vec::new()),
        };

        let outcome = context.reload()?;
        info!("Registered {} prompt tools", outcome.tools);
        info!(
            "Registered management tools: {}, {}",
            ReloadPromptsTool::NAME,
            GetPromptNamesTool::NAME
        );

        Ok(Arc::new(context))
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn source(&self) -> &Arc<dyn DefinitionSource> {
        &self.source
    }

    /// Re-read the source, replace the store and re-register template tools.
    ///
    /// On a source failure the previous templates and tools stay in place.
    pub fn reload(&self) -> Result<ReloadOutcome> {
        let _guard = self.reload_lock.lock();

        let definitions = self.source.definitions()?;
        let report = self.store.load(definitions);
        let tools = self.registry.replace_template_tools(self.template_tools())?;

        info!(
            "Successfully loaded {} prompts from {}",
            report.count,
            self.source.describe()
        );

        Ok(ReloadOutcome {
            prompts: report.count,
            tools,
            skipped: report.warnings.len(),
        })
    }

    /// Call a tool with this context as the handler environment.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: &Arguments,
    ) -> std::result::Result<CallToolResult, ToolError> {
        self.registry.call(name, arguments, self)
    }

    /// Start a reload task and return the notifier that feeds it.
    pub fn reload_notifier(self: &Arc<Self>) -> ReloadNotifier {
        let (notifier, rx) = ReloadNotifier::channel(RELOAD_QUEUE_CAPACITY);
        let task = self.spawn_reload_task(rx);
        self.tasks.lock().push(task);
        notifier
    }

    /// Start hot reload: a polling watcher on the source feeding a reload task.
    pub fn watch(self: &Arc<Self>, interval: Duration) -> ReloadNotifier {
        let notifier = self.reload_notifier();
        let watcher = PollingWatcher::spawn(Arc::clone(&self.source), interval, notifier.clone());
        self.tasks.lock().push(watcher);
        notifier
    }

    /// Stop background tasks and drop all templates and tools.
    pub fn shutdown(&self) {
        let tasks: Vec<_> = self.tasks.lock().drain(..).collect();
        for task in &tasks {
            task.abort();
        }

        self.store.clear();
        self.registry.clear();
        info!("Server context released ({} background tasks stopped)", tasks.len());
    }

    fn template_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .store
            .list()
            .iter()
            .map(|template| PromptTool::to_tool(template))
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    fn spawn_reload_task(self: &Arc<Self>, mut rx: mpsc::Receiver<ReloadSignal>) -> JoinHandle<()> {
        let context = Arc::clone(self);
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // Signals queued while we waited are covered by this reload.
                while rx.try_recv().is_ok() {}

                let context = Arc::clone(&context);
                match tokio::task::spawn_blocking(move || context.reload()).await {
                    Ok(Ok(outcome)) => info!(
                        "Reloaded {} prompts ({} skipped)",
                        outcome.prompts, outcome.skipped
                    ),
                    Ok(Err(e)) => warn!("Failed to reload prompts: {}", e),
                    Err(e) => warn!("Reload task failed: {}", e),
                }
            }
        })
    }
}

impl ToolContext for ServerContext {
    fn template(&self, name: &str) -> Option<Arc<Template>> {
        self.store.get(name)
    }

    fn template_names(&self) -> Vec<String> {
        self.store.names()
    }

    fn reload(&self) -> Result<ReloadOutcome> {
        ServerContext::reload(self)
    }
}
