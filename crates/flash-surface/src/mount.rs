//! Mount points: the binding between one host element and one document.

use crate::Node;

/// Opaque identifier of a mount element on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, stable for the surface's lifetime.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One mount element and its render state.
///
/// `processed_source` records the last source string a pass attempted and
/// `done` marks a completed render; together they keep unrelated surface
/// events from re-driving an already rendered, unchanged mount.
#[derive(Debug)]
pub struct Mount {
    pub id: MountId,
    /// External document source (`src` attribute), if any.
    pub src: Option<String>,
    /// Literal inline document text; cleared after its single render.
    pub inline: Option<String>,
    pub processed_source: Option<String>,
    pub done: bool,
    pub children: Vec<Node>,
}

impl Mount {
    pub(crate) fn new(id: MountId, src: Option<String>, inline: Option<String>) -> Self {
        Self {
            id,
            src,
            inline,
            processed_source: None,
            done: false,
            children: Vec::new(),
        }
    }
}
