//! Bit resolution against the source chain, with an owned cache.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use flash_config::{BitDefinition, SourceEntry};
use flash_surface::Surface;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, trace};
use url::Url;

use crate::fetch::{FetchError, Fetcher, resolve_url};

/// Definition file extensions tried per base, in order.
const DEFINITION_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Cache of resolved bit definitions, owned by one runtime instance.
///
/// Keyed by bare bit name: one bit namespace per runtime, so a name always
/// resolves to whatever source answered first for the runtime's lifetime,
/// even when later documents declare a different chain. Resolution is
/// single-flight per name; failed resolutions are not cached and a later
/// reference retries the chain.
#[derive(Default)]
pub struct BitCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Arc<BitDefinition>>>>>,
}

impl BitCache {
    fn cell(&self, name: &str) -> Arc<OnceCell<Arc<BitDefinition>>> {
        self.entries
            .lock()
            .entry(name.to_string())
            .or_default()
            .clone()
    }
}

/// Resolves bits by name against an ordered source chain.
pub struct BitLoader {
    fetcher: Arc<dyn Fetcher>,
    cache: BitCache,
    styles_applied: Mutex<HashSet<String>>,
}

impl BitLoader {
    /// Create a loader with an empty cache.
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            cache: BitCache::default(),
            styles_applied: Mutex::new(HashSet::new()),
        }
    }

    /// Resolve `name`, cache-first.
    ///
    /// On a miss, each base in `sources` is tried sequentially with
    /// `{base}{name}.yaml` then `{base}{name}.yml`; the first candidate
    /// that both fetches and parses wins and all later candidates are
    /// abandoned. Candidates are resolved relative to `location`.
    pub async fn resolve(
        &self,
        name: &str,
        sources: &[SourceEntry],
        location: &Url,
    ) -> Result<Arc<BitDefinition>, FetchError> {
        let cell = self.cache.cell(name);
        cell.get_or_try_init(|| self.fetch_definition(name, sources, location))
            .await
            .cloned()
    }

    async fn fetch_definition(
        &self,
        name: &str,
        sources: &[SourceEntry],
        location: &Url,
    ) -> Result<Arc<BitDefinition>, FetchError> {
        for source in sources {
            for ext in DEFINITION_EXTENSIONS {
                let candidate = format!("{}{}.{}", source.base(), name, ext);
                let url = match resolve_url(location, &candidate) {
                    Ok(u) => u,
                    Err(e) => {
                        debug!(candidate, error = %e, "unresolvable bit candidate");
                        continue;
                    }
                };
                match self.fetcher.fetch_text(&url).await {
                    Ok(text) => match BitDefinition::parse(&text) {
                        Ok(def) => {
                            debug!(bit = name, url = %url, "bit resolved");
                            return Ok(Arc::new(def));
                        }
                        Err(e) => {
                            debug!(bit = name, url = %url, error = %e, "bit definition rejected");
                        }
                    },
                    Err(e) => {
                        trace!(bit = name, url = %url, error = %e, "bit candidate failed");
                    }
                }
            }
        }
        Err(FetchError::Exhausted {
            name: name.to_string(),
        })
    }

    /// Inject a bit's style text into the surface head, at most once per
    /// name for this loader's lifetime.
    pub fn apply_css(&self, surface: &Surface, name: &str, css: Option<&str>) {
        let Some(css) = css else { return };
        if css.trim().is_empty() {
            return;
        }
        if !self.styles_applied.lock().insert(name.to_string()) {
            return;
        }
        surface.upsert_style(name, css);
    }
}
