//! Host-surface model shared by the FLASH runtime crates.
//!
//! A [`Surface`] is the abstract output document the runtime renders into:
//! a head (title, meta tags, style sheets), a body style, and a set of
//! mount points each holding an ordered node tree. Every structural change
//! relevant to the lifecycle loop (mount inserted, mount source changed,
//! navigation) is published on an event channel consumed by the engine, so
//! re-rendering is driven by an explicit FIFO queue rather than a live
//! observation primitive of a particular host environment.
#![allow(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

mod events;
mod head;
mod mount;
mod node;

pub use events::SurfaceEvent;
pub use head::{Head, MetaKey};
pub use mount::{Mount, MountId};
pub use node::{ContainerNode, FrameNode, Node, TextAlign, TextNode};

/// Tag name a host document uses for declarative mount elements.
pub const MOUNT_TAG: &str = "flash-embed";

/// Errors produced by surface mutation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no mount with id {0:?}")]
    /// The referenced mount does not exist on this surface.
    NoSuchMount(MountId),
    #[error("node {index} of mount {mount:?} is not a container")]
    /// The referenced node cannot hold children.
    NotAContainer {
        /// Mount the node belongs to.
        mount: MountId,
        /// Index of the node within the mount.
        index: usize,
    },
}

/// Body-level presentation applied from a document's `background` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyStyle {
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    pub scroll_behavior: Option<String>,
}

/// Mutable surface state behind the [`Surface`] handle.
#[derive(Debug, Default)]
struct SurfaceInner {
    head: Head,
    body: BodyStyle,
    mounts: Vec<Mount>,
    next_id: u64,
}

impl SurfaceInner {
    fn mount(&self, id: MountId) -> Option<&Mount> {
        self.mounts.iter().find(|m| m.id == id)
    }

    fn mount_mut(&mut self, id: MountId) -> Option<&mut Mount> {
        self.mounts.iter_mut().find(|m| m.id == id)
    }
}

/// Cheap-to-clone handle onto one host surface.
///
/// All mutation goes through this handle; the inner state is shared and
/// locked so concurrent bit population tasks can write safely.
#[derive(Clone)]
pub struct Surface {
    inner: Arc<Mutex<SurfaceInner>>,
    events: UnboundedSender<SurfaceEvent>,
}

impl Surface {
    /// Create a surface and the event stream the lifecycle loop consumes.
    pub fn new() -> (Self, UnboundedReceiver<SurfaceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                inner: Arc::new(Mutex::new(SurfaceInner::default())),
                events: tx,
            },
            rx,
        )
    }

    fn publish(&self, event: SurfaceEvent) {
        // The receiver may be gone during shutdown; mutations still apply.
        self.events.send(event).ok();
    }

    // ----- mounts -----

    /// Insert a mount bound to an external document source.
    pub fn add_sourced_mount(&self, src: impl Into<String>) -> MountId {
        let id = self.insert_mount(Some(src.into()), None);
        self.publish(SurfaceEvent::MountInserted(id));
        id
    }

    /// Insert a mount whose document is the element's own literal text.
    pub fn add_inline_mount(&self, text: impl Into<String>) -> MountId {
        let id = self.insert_mount(None, Some(text.into()));
        self.publish(SurfaceEvent::MountInserted(id));
        id
    }

    fn insert_mount(&self, src: Option<String>, inline: Option<String>) -> MountId {
        let mut inner = self.inner.lock();
        let id = MountId::new(inner.next_id);
        inner.next_id += 1;
        inner.mounts.push(Mount::new(id, src, inline));
        id
    }

    /// Rewrite a mount's source attribute and publish the change.
    pub fn set_mount_src(&self, id: MountId, src: impl Into<String>) {
        {
            let mut inner = self.inner.lock();
            let Some(mount) = inner.mount_mut(id) else {
                return;
            };
            mount.src = Some(src.into());
        }
        self.publish(SurfaceEvent::SourceChanged(id));
    }

    /// Current source attribute of a mount.
    pub fn mount_src(&self, id: MountId) -> Option<String> {
        self.inner.lock().mount(id).and_then(|m| m.src.clone())
    }

    /// Snapshot of (source, done, processed-source) for one pass decision.
    pub fn mount_state(&self, id: MountId) -> Option<(Option<String>, bool, Option<String>)> {
        self.inner
            .lock()
            .mount(id)
            .map(|m| (m.src.clone(), m.done, m.processed_source.clone()))
    }

    /// Record the last source string a pass attempted for this mount.
    pub fn set_processed_source(&self, id: MountId, src: &str) {
        if let Some(m) = self.inner.lock().mount_mut(id) {
            m.processed_source = Some(src.to_string());
        }
    }

    /// Whether the mount completed a render pass.
    pub fn is_done(&self, id: MountId) -> bool {
        self.inner.lock().mount(id).is_some_and(|m| m.done)
    }

    /// Set or clear the done marker.
    pub fn set_done(&self, id: MountId, done: bool) {
        if let Some(m) = self.inner.lock().mount_mut(id) {
            m.done = done;
        }
    }

    /// Take and clear a mount's inline document text (rendered once).
    pub fn take_inline(&self, id: MountId) -> Option<String> {
        self.inner
            .lock()
            .mount_mut(id)
            .and_then(|m| m.inline.take())
    }

    /// Remove all rendered children of a mount ahead of a fresh pass.
    pub fn clear_mount(&self, id: MountId) {
        if let Some(m) = self.inner.lock().mount_mut(id) {
            m.children.clear();
        }
    }

    /// Append a node to a mount, returning its index.
    pub fn push_node(&self, id: MountId, node: Node) -> Result<usize, Error> {
        let mut inner = self.inner.lock();
        let mount = inner.mount_mut(id).ok_or(Error::NoSuchMount(id))?;
        mount.children.push(node);
        Ok(mount.children.len() - 1)
    }

    /// Append a child into a container node of a mount.
    pub fn append_to_container(&self, id: MountId, index: usize, child: Node) -> Result<(), Error> {
        let mut inner = self.inner.lock();
        let mount = inner.mount_mut(id).ok_or(Error::NoSuchMount(id))?;
        match mount.children.get_mut(index) {
            Some(Node::Container(c)) => {
                c.children.push(child);
                Ok(())
            }
            _ => Err(Error::NotAContainer { mount: id, index }),
        }
    }

    /// Clone the rendered node list of a mount (inspection and tests).
    pub fn mount_nodes(&self, id: MountId) -> Vec<Node> {
        self.inner
            .lock()
            .mount(id)
            .map(|m| m.children.clone())
            .unwrap_or_default()
    }

    /// Ids of all mounts in insertion order.
    pub fn mount_ids(&self) -> Vec<MountId> {
        self.inner.lock().mounts.iter().map(|m| m.id).collect()
    }

    /// Signal a navigation (history/hash change analog); re-scans mounts.
    pub fn notify_navigation(&self) {
        self.publish(SurfaceEvent::Navigated);
    }

    // ----- head -----

    /// Set the document title.
    pub fn set_title(&self, title: &str) {
        self.inner.lock().head.title = Some(title.to_string());
    }

    /// Current document title.
    pub fn title(&self) -> Option<String> {
        self.inner.lock().head.title.clone()
    }

    /// Create or overwrite a meta tag.
    pub fn set_meta(&self, key: MetaKey, content: &str) {
        self.inner.lock().head.set_meta(key, content);
    }

    /// Content of a meta tag, if present.
    pub fn meta(&self, key: MetaKey) -> Option<String> {
        self.inner.lock().head.meta(key).map(str::to_string)
    }

    /// Insert or replace the style sheet owned by `owner`.
    pub fn upsert_style(&self, owner: &str, css: &str) {
        self.inner.lock().head.upsert_style(owner, css);
    }

    /// Style sheet text for an owner, if injected.
    pub fn style(&self, owner: &str) -> Option<String> {
        self.inner.lock().head.style(owner).map(str::to_string)
    }

    // ----- body -----

    /// Set the body background color.
    pub fn set_background_color(&self, color: &str) {
        self.inner.lock().body.background_color = Some(color.to_string());
    }

    /// Set the body background image location.
    pub fn set_background_image(&self, image: &str) {
        self.inner.lock().body.background_image = Some(image.to_string());
    }

    /// Set the scroll behavior hint.
    pub fn set_scroll_behavior(&self, behavior: &str) {
        self.inner.lock().body.scroll_behavior = Some(behavior.to_string());
    }

    /// Snapshot of the body-level presentation.
    pub fn body_style(&self) -> BodyStyle {
        self.inner.lock().body.clone()
    }
}
