//! Section rendering onto the host surface.
//!
//! Containers are inserted synchronously in declaration order; bit bodies
//! populate asynchronously and are joined before the mount is marked done,
//! so final node order is guaranteed by insertion order, not completion
//! order.

use std::collections::BTreeMap;

use flash_config::{BitSection, CanonicalConfig, SectionSpec, SourceEntry, TextSection,
    normalize_color};
use flash_surface::{
    ContainerNode, FrameNode, MOUNT_TAG, MountId, Node, Surface, TextAlign, TextNode,
};
use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::{behavior::BehaviorRegistry, behavior::BitContext, loader::BitLoader};

/// Reserved bit name handled directly by the renderer.
const FRAME_BIT: &str = "frame";

/// Relative location of the distributable runtime bundle referenced by
/// generated bootstrap documents.
const RUNTIME_BUNDLE: &str = "flash.js";

/// Matches the bit-definition file-extension pattern in a target path.
static DOCUMENT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.ya?ml(?:[?#].*)?$").expect("static pattern"));

/// Whether a path points at a configuration document.
pub(crate) fn is_document_path(path: &str) -> bool {
    DOCUMENT_PATH.is_match(path)
}

/// Minimal wrapper document that re-invokes the runtime against `target`,
/// used when a frame embeds a configuration document directly.
pub fn bootstrap_document(target: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n\
         <{MOUNT_TAG} src=\"{target}\"></{MOUNT_TAG}>\n\
         <script src=\"{RUNTIME_BUNDLE}\"></script>\n</body>\n</html>\n"
    )
}

/// Renders one canonical configuration into a mount.
pub(crate) struct SectionRenderer<'a> {
    pub surface: &'a Surface,
    pub loader: &'a BitLoader,
    pub behaviors: &'a BehaviorRegistry,
    pub location: &'a Url,
}

impl SectionRenderer<'_> {
    /// Render all sections in declaration order, then await bit bodies.
    pub(crate) async fn render(
        &self,
        mount: MountId,
        cfg: &CanonicalConfig,
        sources: &[SourceEntry],
    ) {
        let mut pending = Vec::new();
        for section in &cfg.sections {
            match section {
                SectionSpec::Text(text) => {
                    if let Err(e) = self.surface.push_node(mount, text_node(text)) {
                        warn!(error = %e, "text section dropped");
                    }
                }
                SectionSpec::Bit(bit) if bit.name == FRAME_BIT => {
                    if let Err(e) = self.surface.push_node(mount, frame_node(&bit.config)) {
                        warn!(error = %e, "frame section dropped");
                    }
                }
                SectionSpec::Bit(bit) => {
                    let container = Node::Container(ContainerNode {
                        bit: bit.name.clone(),
                        id: config_id(&bit.config),
                        children: Vec::new(),
                    });
                    match self.surface.push_node(mount, container) {
                        Ok(index) => {
                            pending.push(self.populate_bit(
                                mount,
                                index,
                                bit,
                                &cfg.metadata,
                                sources,
                            ));
                        }
                        Err(e) => warn!(bit = %bit.name, error = %e, "bit container dropped"),
                    }
                }
            }
        }
        join_all(pending).await;
    }

    /// Resolve one bit and populate its container. All failures stay local
    /// to this section.
    async fn populate_bit(
        &self,
        mount: MountId,
        container: usize,
        bit: &BitSection,
        metadata: &BTreeMap<String, String>,
        sources: &[SourceEntry],
    ) {
        let definition = match self.loader.resolve(&bit.name, sources, self.location).await {
            Ok(def) => def,
            Err(e) => {
                // Exhausted chain: the container stays empty.
                debug!(bit = %bit.name, error = %e, "bit resolution failed");
                return;
            }
        };

        self.loader
            .apply_css(self.surface, &bit.name, definition.css.as_deref());

        let Some(handler) = self.behaviors.get(&bit.name) else {
            trace!(bit = %bit.name, "no behavior registered");
            return;
        };
        let mut ctx = BitContext::new(
            self.surface,
            mount,
            container,
            &bit.config,
            metadata,
            &definition,
        );
        if let Err(e) = handler.render(&mut ctx) {
            debug!(bit = %bit.name, error = %e, "bit behavior failed, discarded");
        }
    }
}

/// Map a canonical text section to its surface node.
fn text_node(text: &TextSection) -> Node {
    let align = &text.style.align;
    Node::Text(TextNode {
        content: text.content.clone(),
        color: text.color.as_deref().map(normalize_color),
        bold: text.style.bold,
        text_align: match align.horizontal.as_deref() {
            Some("center") => Some(TextAlign::Center),
            Some("right") => Some(TextAlign::Right),
            Some("left") => Some(TextAlign::Left),
            _ => None,
        },
        viewport_center: align.vertical.as_deref() == Some("middle"),
        id: text.id.clone(),
    })
}

/// Build the frame node for a `frame` section. Configuration documents get
/// a bootstrap wrapper instead of being embedded as raw text.
fn frame_node(config: &Value) -> Node {
    let target = config
        .get("src")
        .or_else(|| config.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let bootstrap = is_document_path(&target).then(|| bootstrap_document(&target));
    Node::Frame(FrameNode {
        target,
        bootstrap,
        id: config_id(config),
    })
}

/// Optional declared identifier carried on a bit's configuration.
fn config_id(config: &Value) -> Option<String> {
    config.get("id").and_then(Value::as_str).map(str::to_string)
}
