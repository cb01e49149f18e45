//! The per-mount render pipeline.
//!
//! One pass: fetch (or take inline) the document, check redirect rules,
//! normalize, apply document-level side effects, render sections, mark the
//! mount done. A matching redirect rule rewrites the mount source and
//! abandons the pass before any other side effect.

use std::collections::BTreeMap;

use flash_config::{
    Background, Custom, RedirectMapping, normalize, normalize_color, parse_value,
    resolve_sources,
};
use flash_surface::{MetaKey, MountId, Node, TextNode};
use tracing::{debug, trace, warn};

use crate::{
    Runtime,
    fetch::{FetchError, resolve_url},
    render::{SectionRenderer, is_document_path},
};

impl Runtime {
    /// Drive one full pass for `id`. Safe to call repeatedly: a mount that
    /// is done and whose source has not changed is skipped.
    pub async fn process_mount(&self, id: MountId) {
        let Some((src, done, processed)) = self.surface.mount_state(id) else {
            trace!(mount = id.raw(), "mount vanished before processing");
            return;
        };
        match src {
            Some(src) => {
                if done && processed.as_deref() == Some(src.as_str()) {
                    trace!(mount = id.raw(), "mount already rendered");
                    return;
                }
                self.surface.set_processed_source(id, &src);
                match self.fetch_document(&src).await {
                    Ok(text) => self.render_document(id, Some(&src), &text).await,
                    Err(e) => {
                        warn!(mount = id.raw(), src = %src, error = %e, "document fetch failed");
                        self.surface.clear_mount(id);
                        if let Err(e) = self
                            .surface
                            .push_node(id, Node::Text(TextNode::plain(format!("Failed to load {src}"))))
                        {
                            debug!(mount = id.raw(), error = %e, "placeholder dropped");
                        }
                        self.surface.set_done(id, true);
                    }
                }
            }
            None => {
                if done {
                    return;
                }
                // Inline documents render exactly once; the text is
                // consumed so a later pass has nothing to re-render.
                let Some(text) = self.surface.take_inline(id) else {
                    trace!(mount = id.raw(), "inline mount without document text");
                    return;
                };
                self.render_document(id, None, &text).await;
            }
        }
    }

    /// Fetch the document for `src`, trying `{src}.yaml` then `{src}.yml`
    /// when the source names no document extension of its own.
    async fn fetch_document(&self, src: &str) -> Result<String, FetchError> {
        let candidates: Vec<String> = if is_document_path(src) {
            vec![src.to_string()]
        } else {
            vec![format!("{src}.yaml"), format!("{src}.yml")]
        };
        let mut last = None;
        for candidate in candidates {
            let url = match resolve_url(&self.location, &candidate) {
                Ok(u) => u,
                Err(e) => {
                    debug!(candidate, error = %e, "unresolvable document candidate");
                    last = Some(e.into());
                    continue;
                }
            };
            match self.fetcher.fetch_text(&url).await {
                Ok(text) => {
                    trace!(url = %url, "document fetched");
                    return Ok(text);
                }
                Err(e) => {
                    trace!(url = %url, error = %e, "document candidate failed");
                    last = Some(e);
                }
            }
        }
        Err(last.unwrap_or_else(|| FetchError::Exhausted {
            name: src.to_string(),
        }))
    }

    async fn render_document(&self, id: MountId, current_src: Option<&str>, text: &str) {
        let doc = parse_value(text);

        if let Some(mapping) = RedirectMapping::from_document(&doc) {
            let query: Vec<(String, String)> = self
                .location
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            if let Some(dest) = mapping.resolve(&query) {
                if current_src != Some(dest) {
                    debug!(mount = id.raw(), dest, "param redirect, pass abandoned");
                    self.surface.set_mount_src(id, dest);
                    return;
                }
                trace!(mount = id.raw(), dest, "redirect destination already current");
            }
        }

        let cfg = normalize(&doc);
        let sources = resolve_sources(doc.get("bits"), &self.source_defaults);

        self.apply_background(&cfg.background);
        self.apply_metadata(&cfg.metadata);
        self.apply_custom(id, &cfg.custom);
        self.surface.set_scroll_behavior("smooth");

        self.surface.clear_mount(id);
        SectionRenderer {
            surface: &self.surface,
            loader: &self.loader,
            behaviors: &self.behaviors,
            location: &self.location,
        }
        .render(id, &cfg, &sources)
        .await;
        self.surface.set_done(id, true);
        debug!(
            mount = id.raw(),
            sections = cfg.sections.len(),
            "render pass complete"
        );
    }

    fn apply_background(&self, background: &Background) {
        if let Some(color) = &background.color {
            self.surface.set_background_color(&normalize_color(color));
        }
        if let Some(image) = &background.image {
            self.surface.set_background_image(image);
        }
    }

    /// Later renders overwrite: metadata always reflects the most recently
    /// rendered document.
    fn apply_metadata(&self, metadata: &BTreeMap<String, String>) {
        if let Some(title) = metadata.get("title") {
            self.surface.set_title(title);
            self.surface.set_meta(MetaKey::OgTitle, title);
        }
        if let Some(description) = metadata.get("description") {
            self.surface.set_meta(MetaKey::Description, description);
            self.surface.set_meta(MetaKey::OgDescription, description);
        }
        if let Some(author) = metadata.get("author") {
            self.surface.set_meta(MetaKey::Author, author);
        }
        if let Some(image) = metadata.get("image") {
            self.surface.set_meta(MetaKey::OgImage, image);
        }
    }

    fn apply_custom(&self, id: MountId, custom: &Custom) {
        if let Some(css) = &custom.css {
            if !css.trim().is_empty() {
                self.surface
                    .upsert_style(&format!("custom:{}", id.raw()), css);
            }
        }
        if custom.js.is_some() {
            // Documents cannot ship executable code; behaviors come from
            // the embedder's registry only.
            debug!(mount = id.raw(), "document script ignored");
        }
    }
}
