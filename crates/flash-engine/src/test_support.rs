//! Shared scaffolding for engine tests.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use url::Url;

use crate::{
    Runtime,
    fetch::{FetchError, Fetcher},
};
use flash_surface::{Surface, SurfaceEvent};

/// Fetcher answering from a scripted URL->body map, recording every hit.
/// Unknown URLs answer 404.
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, String>>,
    delays: Mutex<HashMap<String, Duration>>,
    hits: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            hits: Mutex::new(Vec::new()),
        })
    }

    pub fn insert(&self, url: &str, body: &str) {
        self.responses.lock().insert(url.to_string(), body.to_string());
    }

    /// Script a response that only answers after `delay_ms` of (virtual)
    /// time, for ordering tests under `start_paused`.
    pub fn insert_delayed(&self, url: &str, body: &str, delay_ms: u64) {
        self.insert(url, body);
        self.delays
            .lock()
            .insert(url.to_string(), Duration::from_millis(delay_ms));
    }

    /// Every URL requested, in request order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().clone()
    }

    pub fn hit_count(&self, url: &str) -> usize {
        self.hits.lock().iter().filter(|h| h.as_str() == url).count()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let key = url.to_string();
        self.hits.lock().push(key.clone());
        let delay = self.delays.lock().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.responses.lock().get(&key) {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Status {
                url: key,
                status: 404,
            }),
        }
    }
}

/// Runtime over a scripted fetcher, plus the surface event receiver.
pub fn scripted_runtime(
    fetcher: Arc<ScriptedFetcher>,
    location: &str,
) -> (Runtime, UnboundedReceiver<SurfaceEvent>) {
    let (surface, events) = Surface::new();
    let location = Url::parse(location).expect("test location");
    (Runtime::with_fetcher(surface, location, fetcher), events)
}

/// Poll `pred` every few milliseconds until it holds or `timeout_ms`
/// elapses. Returns whether it held.
pub async fn wait_until(timeout_ms: u64, mut pred: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        if pred() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}

/// Route test logging through `tracing`, honoring `RUST_LOG`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
