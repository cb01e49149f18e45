//! Bit source chains: ordered candidate base locations for plugin lookup.

use serde_yaml::Value;
use tracing::debug;

/// Conventional local bit directory, tried first when nothing is declared.
pub const LOCAL_BIT_SOURCE: &str = "./bits/";

/// Fixed public repository location, the final fallback of the default
/// chain. Overridable through [`SourceDefaults`].
pub const PUBLIC_BIT_SOURCE: &str = "https://raw.githubusercontent.com/rhenryw/FLASH/main/bits/";

const RAW_GITHUB_BASE: &str = "https://raw.githubusercontent.com";

/// One normalized base location, always slash-terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry(String);

impl SourceEntry {
    /// Normalize a base location, appending the trailing slash if missing.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self(base)
    }

    /// The slash-terminated base location.
    pub fn base(&self) -> &str {
        &self.0
    }
}

/// The fallback chain used when a document declares no sources.
///
/// Trust configuration is explicit: embedders that do not want the public
/// repository as an implicit anchor replace these defaults on the runtime.
#[derive(Debug, Clone)]
pub struct SourceDefaults {
    pub entries: Vec<SourceEntry>,
}

impl Default for SourceDefaults {
    fn default() -> Self {
        Self {
            entries: vec![
                SourceEntry::new(LOCAL_BIT_SOURCE),
                SourceEntry::new(PUBLIC_BIT_SOURCE),
            ],
        }
    }
}

/// Derive the ordered source chain from a document's `bits` declaration.
///
/// Order defines fallback priority. Recognized entry forms: a literal base
/// URL string, `{url}`, `{github: {repo, ref?, path?}}` expanded to the
/// raw-content convention, and `{local}`/`{base}`. An empty or missing
/// declaration yields the defaults.
pub fn resolve_sources(bits: Option<&Value>, defaults: &SourceDefaults) -> Vec<SourceEntry> {
    let mut chain = Vec::new();

    let declared = bits
        .and_then(|b| b.get("sources"))
        .and_then(Value::as_sequence);
    if let Some(entries) = declared {
        for entry in entries {
            if let Some(source) = resolve_entry(entry) {
                chain.push(source);
            } else {
                debug!(?entry, "unrecognized bit source entry, skipping");
            }
        }
    }

    if chain.is_empty() {
        return defaults.entries.clone();
    }
    chain
}

fn resolve_entry(entry: &Value) -> Option<SourceEntry> {
    if let Some(s) = entry.as_str() {
        return Some(SourceEntry::new(s));
    }
    entry.as_mapping()?;

    if let Some(url) = entry.get("url").and_then(Value::as_str) {
        return Some(SourceEntry::new(url));
    }

    if let Some(github) = entry.get("github") {
        let repo = github.get("repo").and_then(Value::as_str)?.trim();
        if repo.is_empty() {
            return None;
        }
        let reference = github.get("ref").and_then(Value::as_str).unwrap_or("main");
        let path = github.get("path").and_then(Value::as_str).unwrap_or("bits");
        let path = path.trim_end_matches('/');
        return Some(SourceEntry::new(format!(
            "{RAW_GITHUB_BASE}/{repo}/{reference}/{path}/"
        )));
    }

    if let Some(local) = entry.get("local") {
        if let Some(base) = local.as_str() {
            return Some(SourceEntry::new(base));
        }
        let base = entry
            .get("base")
            .and_then(Value::as_str)
            .unwrap_or(LOCAL_BIT_SOURCE);
        return Some(SourceEntry::new(base));
    }

    if let Some(base) = entry.get("base").and_then(Value::as_str) {
        return Some(SourceEntry::new(base));
    }

    None
}
