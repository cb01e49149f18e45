//! FLASH Engine
//!
//! The engine crate drives the declarative-document pipeline:
//! - fetches and parses mount documents (cache-defeated)
//! - applies URL-parameter redirect rules before any other side effect
//! - normalizes documents and renders sections onto the host surface
//! - resolves bit plugins against a fallback source chain, with an owned
//!   per-runtime definition cache
//! - processes surface events in FIFO order, re-driving the pipeline when
//!   mounts appear or their source changes
//!
//! Construct a [`Runtime`] over a [`flash_surface::Surface`] and drive it
//! with [`Runtime::run`], or call [`Runtime::process_mount`] directly for
//! single passes.

use std::sync::Arc;

use flash_config::SourceDefaults;
use flash_surface::{MountId, Surface};
use url::Url;

mod behavior;
mod error;
mod fetch;
mod loader;
mod observer;
mod pipeline;
mod render;

#[cfg(test)]
mod test_render;
#[cfg(test)]
mod test_support;

pub use behavior::{BehaviorRegistry, BitBehavior, BitContext};
pub use error::{Error, Result};
pub use fetch::{FetchError, Fetcher, HttpFetcher, resolve_url};
pub use loader::{BitCache, BitLoader};
pub use render::bootstrap_document;

/// Conventional document name tried when a mount names no explicit source:
/// resolved as `flash.yaml`, then `flash.yml`.
pub const DEFAULT_DOCUMENT: &str = "flash";

/// One runtime instance: the pipeline plus the services it owns.
///
/// The bit-definition cache and the style-applied set live on the loader
/// and share the runtime's lifetime; separate runtimes never share state.
pub struct Runtime {
    surface: Surface,
    location: Url,
    fetcher: Arc<dyn Fetcher>,
    loader: BitLoader,
    behaviors: BehaviorRegistry,
    source_defaults: SourceDefaults,
}

impl Runtime {
    /// Create a runtime fetching over HTTP.
    ///
    /// `location` is the hosting page's URL; it supplies the query
    /// parameters the redirect rules inspect and the base for relative
    /// source resolution.
    pub fn new(surface: Surface, location: Url) -> Self {
        Self::with_fetcher(surface, location, Arc::new(HttpFetcher::new()))
    }

    /// Create a runtime with a custom fetcher (tests, embedders with their
    /// own transport).
    pub fn with_fetcher(surface: Surface, location: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            loader: BitLoader::new(fetcher.clone()),
            surface,
            location,
            fetcher,
            behaviors: BehaviorRegistry::new(),
            source_defaults: SourceDefaults::default(),
        }
    }

    /// Register a bit behavior under `name`.
    pub fn register_behavior(&mut self, name: impl Into<String>, behavior: Box<dyn BitBehavior>) {
        self.behaviors.register(name, behavior);
    }

    /// Replace the fallback source chain used by documents that declare no
    /// sources of their own.
    pub fn set_source_defaults(&mut self, defaults: SourceDefaults) {
        self.source_defaults = defaults;
    }

    /// The surface this runtime renders into.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The hosting page location.
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Insert a mount against the conventional default document.
    pub fn mount_default_document(&self) -> MountId {
        self.surface.add_sourced_mount(DEFAULT_DOCUMENT)
    }
}
