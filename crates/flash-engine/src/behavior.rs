//! Bit behavior capability registry.
//!
//! Fetched behavior text is never executed. A bit gains behavior by the
//! embedder registering a handler under its name; the handler is invoked
//! through a fixed context API each time a section of that bit renders.
//! Handler failures are caught by the renderer and discarded, never
//! reaching sibling sections or the pipeline.

use std::collections::{BTreeMap, HashMap};

use flash_config::{BitDefinition, normalize_color};
use flash_surface::{MountId, Node, Surface};
use serde_yaml::Value;

use crate::error::Result;

/// Behavior invoked when a section of the registered bit renders.
pub trait BitBehavior: Send + Sync {
    /// Populate the section's container.
    fn render(&self, ctx: &mut BitContext<'_>) -> Result<()>;
}

// Closures can be registered directly.
impl<F> BitBehavior for F
where
    F: Fn(&mut BitContext<'_>) -> Result<()> + Send + Sync,
{
    fn render(&self, ctx: &mut BitContext<'_>) -> Result<()> {
        self(ctx)
    }
}

/// Handlers keyed by bit name.
#[derive(Default)]
pub struct BehaviorRegistry {
    handlers: HashMap<String, Box<dyn BitBehavior>>,
}

impl BehaviorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `behavior` under `name`, replacing any previous handler.
    pub fn register(&mut self, name: impl Into<String>, behavior: Box<dyn BitBehavior>) {
        self.handlers.insert(name.into(), behavior);
    }

    /// Handler for a bit name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn BitBehavior> {
        self.handlers.get(name).map(Box::as_ref)
    }
}

/// The fixed API surface a behavior sees: its container, the section's own
/// configuration, the document metadata, the fetched definition, and a
/// small utility set.
pub struct BitContext<'a> {
    surface: &'a Surface,
    mount: MountId,
    container: usize,
    config: &'a Value,
    metadata: &'a BTreeMap<String, String>,
    definition: &'a BitDefinition,
}

impl<'a> BitContext<'a> {
    pub(crate) fn new(
        surface: &'a Surface,
        mount: MountId,
        container: usize,
        config: &'a Value,
        metadata: &'a BTreeMap<String, String>,
        definition: &'a BitDefinition,
    ) -> Self {
        Self {
            surface,
            mount,
            container,
            config,
            metadata,
            definition,
        }
    }

    /// The section's own configuration value.
    pub fn config(&self) -> &Value {
        self.config
    }

    /// The document's metadata map.
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        self.metadata
    }

    /// The resolved definition (style/behavior text) for handlers that
    /// interpret it.
    pub fn definition(&self) -> &BitDefinition {
        self.definition
    }

    /// Append a node into this section's container.
    pub fn append(&self, node: Node) -> Result<()> {
        self.surface
            .append_to_container(self.mount, self.container, node)?;
        Ok(())
    }

    /// Normalize a color value (same rules as text sections).
    pub fn normalize_color(&self, value: &str) -> String {
        normalize_color(value)
    }

    /// Redirect the active mount to a new document source. The lifecycle
    /// loop picks up the change and re-drives the pipeline.
    pub fn navigate(&self, target: &str) {
        self.surface.set_mount_src(self.mount, target);
    }
}
